//! Modelos de dados da triagem
//!
//! Este módulo define as estruturas usadas pela fila, pelo cadastro de médicos
//! e pelo atendimento

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IntakeError;

/// Status inicial de todo paciente registrado
pub const INITIAL_STATUS: &str = "Pending";

/// Horário de atendimento de um médico
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Faixa de dias (ex.: "Mon-Wed")
    pub date: String,
    /// Faixa de horário (ex.: "7:00am - 5:00pm")
    pub time: String,
}

impl Schedule {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Formas de pagamento aceitas no balcão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DigitalBank,
    Bank,
}

impl PaymentMethod {
    /// Converte a opção numerada do menu de pagamento (1, 2 ou 3)
    pub fn from_selection(selection: &str) -> Result<Self, IntakeError> {
        match selection.trim().parse::<i64>() {
            Ok(1) => Ok(PaymentMethod::Cash),
            Ok(2) => Ok(PaymentMethod::DigitalBank),
            Ok(3) => Ok(PaymentMethod::Bank),
            _ => Err(IntakeError::InvalidPaymentMethod(selection.trim().to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::DigitalBank => write!(f, "Digital Bank"),
            PaymentMethod::Bank => write!(f, "Bank"),
        }
    }
}

/// Pagamento registrado em um atendimento
///
/// O valor é digitado pelo operador e não é conferido contra a taxa do médico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

/// Médico disponível para atendimento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// Identidade usada para remover o médico após a atribuição
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    /// Vocabulário de sintomas, comparado literalmente com o motivo da consulta
    pub symptoms: Vec<String>,
    pub schedule: Schedule,
    pub fee: Decimal,
}

impl Doctor {
    pub fn new(
        name: impl Into<String>,
        specialty: impl Into<String>,
        symptoms: Vec<String>,
        schedule: Schedule,
        fee: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            specialty: specialty.into(),
            symptoms,
            schedule,
            fee,
        }
    }

    /// Verifica se algum sintoma do médico aparece literalmente no texto
    pub fn treats(&self, reason: &str) -> bool {
        self.symptoms
            .iter()
            .any(|symptom| reason.contains(symptom.as_str()))
    }
}

/// Resultado da busca de médico para um paciente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Assignment {
    /// Médico encontrado e atribuído
    Assigned { doctor_name: String, specialty: String },
    /// Há médicos, mas nenhum cobre o motivo informado
    NoSpecialtyMatch { reason: String },
    /// Cadastro de médicos vazio
    NoDoctorAvailable,
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assignment::Assigned { doctor_name, .. } => write!(f, "{}", doctor_name),
            Assignment::NoSpecialtyMatch { reason } => {
                write!(f, "No doctor available for the specialty: {}", reason)
            }
            Assignment::NoDoctorAvailable => write!(f, "No doctor available"),
        }
    }
}

/// Dados coletados no cadastro de um paciente
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIntake {
    pub name: String,
    pub birthdate: String,
    pub gender: String,
    pub address: String,
    /// Motivo da consulta, em texto livre
    pub reason: String,
}

/// Paciente na fila de atendimento
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub registered_at: DateTime<Utc>,
    pub name: String,
    pub birthdate: String,
    pub gender: String,
    pub address: String,
    /// Nunca solicitado no cadastro; permanece vazio
    pub contact_details: String,
    pub reason: String,
    /// Preenchido apenas durante o atendimento
    pub assignment: Option<Assignment>,
    pub status: String,
}

impl Patient {
    pub fn new(intake: PatientIntake) -> Self {
        Self {
            id: Uuid::new_v4(),
            registered_at: Utc::now(),
            name: intake.name,
            birthdate: intake.birthdate,
            gender: intake.gender,
            address: intake.address,
            contact_details: String::new(),
            reason: intake.reason,
            assignment: None,
            status: INITIAL_STATUS.to_string(),
        }
    }

    /// Texto do médico atribuído, vazio enquanto o paciente aguarda
    pub fn assigned_doctor(&self) -> String {
        self.assignment
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
