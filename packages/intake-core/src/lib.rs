//! Intake Core - Biblioteca da fila de atendimento da clínica
//!
//! Esta biblioteca fornece:
//! - Modelos de pacientes, médicos, horários e pagamentos
//! - Fila de pacientes (FIFO) e cadastro de médicos disponíveis
//! - Atendimento: busca de médico por sintomas, cobrança e status
//! - Escala de médicos padrão ou carregada de arquivo
//!
//! Todo o estado vive em memória e se perde ao fim do processo.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub mod engine;
pub mod error;
pub mod models;
pub mod queue;
pub mod registry;
pub mod roster;

pub use engine::{
    Clinic, IntakeDesk, PaymentCollector, ProcessingObserver, ProcessingReport, StatusCollector,
};
pub use error::IntakeError;
pub use models::{Assignment, Doctor, Patient, PatientIntake, Payment, PaymentMethod, Schedule};

/// Configuração da clínica
#[derive(Debug, Clone)]
pub struct ClinicConfig {
    /// Arquivo JSON com a escala de médicos; sem ele, usa a escala padrão
    pub roster_path: Option<PathBuf>,
    /// Filtro de log no formato do `EnvFilter`
    pub log_filter: String,
    /// Emite logs em JSON em vez de texto
    pub log_json: bool,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            log_filter: "warn".to_string(),
            log_json: false,
        }
    }
}

impl ClinicConfig {
    /// Aplica as variáveis `INTAKE_ROSTER`, `INTAKE_LOG` e `INTAKE_LOG_FORMAT` sobre o padrão
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("INTAKE_ROSTER").filter(|p| !p.trim().is_empty()) {
            config.roster_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup("INTAKE_LOG").filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(format) = lookup("INTAKE_LOG_FORMAT") {
            config.log_json = format.trim().eq_ignore_ascii_case("json");
        }

        config
    }
}

/// Monta o estado da clínica com fila vazia e a escala configurada
pub fn init_clinic(config: &ClinicConfig) -> Result<Clinic> {
    let doctors = match &config.roster_path {
        Some(path) => roster::load_roster(path)?,
        None => roster::default_roster(),
    };

    let clinic = Clinic::new(doctors.into_iter().collect());

    info!("Clínica inicializada com {} médico(s)", clinic.registry.len());
    Ok(clinic)
}
