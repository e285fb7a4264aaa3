//! Escala de médicos carregada na inicialização
//!
//! Sem arquivo configurado, a clínica abre com a escala padrão abaixo.
//! O arquivo de escala é somente leitura: nada é gravado de volta.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::error::IntakeError;
use crate::models::{Doctor, Schedule};

/// Entrada da escala padrão: nome, especialidade, dias, horário, taxa e sintomas
type SeedDoctor = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
    &'static [&'static str],
);

/// Escala padrão da clínica, em ordem de prioridade de busca
const DEFAULT_ROSTER: &[SeedDoctor] = &[
    (
        "Dr. Smith",
        "Cardiologist",
        "Mon-Wed",
        "7:00am - 5:00pm",
        150,
        &[
            "Chest pain or discomfort",
            "Shortness of breath",
            "Irregular heartbeats (arrhythmias)",
            "High blood pressure",
            "Fatigue or weakness",
            "Dizziness or fainting",
            "Swelling in the legs, ankles, or abdomen",
            "High cholesterol",
        ],
    ),
    (
        "Dr. Johnson",
        "Pediatrician",
        "Tue-Thurs",
        "7:00am - 5:00pm",
        120,
        &[
            "Fever",
            "Cough and cold symptoms",
            "Ear infections",
            "Respiratory issues",
            "Developmental concerns",
            "Behavioral issues",
            "Immunization and vaccination",
            "Growth and nutrition concerns",
        ],
    ),
    (
        "Dr. Rob",
        "Surgeon",
        "Fri-Sat",
        "7:00am - 5:00pm",
        140,
        &[
            "Acute injuries (such as fractures)",
            "Abdominal pain",
            "Tumors or growths",
            "Infections requiring surgical intervention",
            "Need for elective surgery (e.g., hernia repair, gallbladder removal)",
            "Trauma or injuries requiring surgical intervention",
            "Gastrointestinal issues",
            "Orthopedic issues (e.g., joint problems)",
        ],
    ),
];

/// Entrada de um arquivo de escala (JSON)
#[derive(Debug, Deserialize)]
struct RosterEntry {
    name: String,
    specialty: String,
    symptoms: Vec<String>,
    schedule: Schedule,
    fee: Decimal,
}

impl From<RosterEntry> for Doctor {
    fn from(entry: RosterEntry) -> Self {
        Doctor::new(entry.name, entry.specialty, entry.symptoms, entry.schedule, entry.fee)
    }
}

/// Escala padrão, com identidades novas a cada chamada
pub fn default_roster() -> Vec<Doctor> {
    DEFAULT_ROSTER
        .iter()
        .map(|&(name, specialty, date, time, fee, symptoms)| {
            Doctor::new(
                name,
                specialty,
                symptoms.iter().map(|s| s.to_string()).collect(),
                Schedule::new(date, time),
                Decimal::new(fee, 0),
            )
        })
        .collect()
}

/// Interpreta uma escala em JSON (lista de médicos)
pub fn parse_roster(json: &str) -> Result<Vec<Doctor>, IntakeError> {
    let entries: Vec<RosterEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(Doctor::from).collect())
}

/// Lê a escala de um arquivo JSON
pub fn load_roster(path: &Path) -> Result<Vec<Doctor>> {
    info!("Carregando escala de médicos: {}", path.display());

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler escala de médicos em {}", path.display()))?;

    let doctors = parse_roster(&json)
        .with_context(|| format!("Escala de médicos inválida em {}", path.display()))?;

    info!("Escala carregada com {} médico(s)", doctors.len());
    Ok(doctors)
}
