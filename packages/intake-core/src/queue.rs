//! Fila de pacientes aguardando atendimento (FIFO estrita)

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::error::IntakeError;
use crate::models::Patient;

/// Fila de pacientes em ordem de chegada
#[derive(Debug, Default)]
pub struct PatientQueue {
    patients: VecDeque<Patient>,
}

impl PatientQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona o paciente ao final da fila
    pub fn enqueue(&mut self, patient: Patient) -> &Patient {
        info!(patient_id = %patient.id, "{} added to the queue.", patient.name);
        self.patients.push_back(patient);
        &self.patients[self.patients.len() - 1]
    }

    /// Remove e devolve o paciente do início da fila
    pub fn dequeue_front(&mut self) -> Result<Patient, IntakeError> {
        let patient = self.patients.pop_front().ok_or(IntakeError::EmptyQueue)?;
        debug!(
            patient_id = %patient.id,
            remaining = self.patients.len(),
            "Paciente retirado da fila"
        );
        Ok(patient)
    }

    /// Percorre a fila atual em ordem de chegada, sem consumi-la
    pub fn peek_all(&self) -> impl Iterator<Item = &Patient> + '_ {
        self.patients.iter()
    }

    /// Primeiro paciente ainda na fila com o nome exato informado
    ///
    /// Pacientes já atendidos não ficam guardados em lugar nenhum e nunca são encontrados.
    pub fn find_by_name(&self, name: &str) -> Option<&Patient> {
        self.peek_all().find(|patient| patient.name == name)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
