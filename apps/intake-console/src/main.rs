//! Intake Console
//!
//! Ponto de entrada do console de atendimento da clínica.

use anyhow::{anyhow, Context, Result};
use intake_core::{init_clinic, ClinicConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod console;
mod menu;
mod render;

use console::Console;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Logs vão para stderr para não se misturar à conversa com o operador
fn init_tracing(config: &ClinicConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Filtro de log inválido: {}", config.log_filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("Falha ao inicializar logs: {}", e))
}

fn main() -> Result<()> {
    let config = ClinicConfig::from_env();
    init_tracing(&config)?;

    info!(
        version = built_info::PKG_VERSION,
        "Iniciando {}", built_info::PKG_NAME
    );

    let mut clinic = init_clinic(&config).context("Falha ao inicializar a clínica")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    // A sessão sempre termina com sucesso; uma falha de entrada apenas encerra o menu
    if let Err(e) = console.run(&mut clinic) {
        error!("Sessão encerrada: {}", e);
    }

    info!(
        pending = clinic.queue.len(),
        "Encerrando; pacientes na fila são descartados"
    );
    Ok(())
}
