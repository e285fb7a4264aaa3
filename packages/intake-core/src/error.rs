//! Definições de erro para a biblioteca intake-core
//!
//! Apenas `EmptyQueue` interrompe um atendimento. Os erros de entrada do operador
//! são tratados no próprio console, que substitui um valor padrão e segue adiante.

use thiserror::Error;

/// Erros das operações de triagem
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Queue is empty.")]
    EmptyQueue,

    #[error("Invalid menu choice: {0}")]
    InvalidMenuChoice(String),

    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Operator input failed: {0}")]
    Input(#[from] std::io::Error),

    #[error("Invalid doctor roster: {0}")]
    Roster(String),
}

/// Conversão de erros do serde_json ao ler a escala de médicos
impl From<serde_json::Error> for IntakeError {
    fn from(error: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match error.classify() {
            Category::Syntax | Category::Eof => {
                IntakeError::Roster(format!("malformed JSON: {}", error))
            }
            Category::Data => IntakeError::Roster(format!("unexpected entry: {}", error)),
            Category::Io => IntakeError::Roster(format!("read failure: {}", error)),
        }
    }
}
