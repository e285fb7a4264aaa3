//! Cadastro de médicos disponíveis
//!
//! A busca percorre os médicos em ordem de cadastro e o primeiro compatível vence.
//! Um médico atribuído é removido e não volta ao cadastro.

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::Doctor;

#[derive(Debug, Default)]
pub struct DoctorRegistry {
    doctors: Vec<Doctor>,
}

impl DoctorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cadastra um médico no final da lista, sem validação nem deduplicação
    pub fn add(&mut self, doctor: Doctor) {
        info!(doctor_id = %doctor.id, "{} added as a doctor.", doctor.name);
        self.doctors.push(doctor);
    }

    /// Primeiro médico com algum sintoma contido literalmente em `reason`
    pub fn find_match(&self, reason: &str) -> Option<&Doctor> {
        let found = self.doctors.iter().find(|doctor| doctor.treats(reason));
        debug!(reason, matched = ?found.map(|d| d.name.as_str()), "Busca por sintomas");
        found
    }

    /// Remove o médico pela identidade; devolve `None` se ele não estiver cadastrado
    pub fn remove(&mut self, id: Uuid) -> Option<Doctor> {
        let index = self.doctors.iter().position(|doctor| doctor.id == id)?;
        let doctor = self.doctors.remove(index);
        info!(
            doctor_id = %doctor.id,
            remaining = self.doctors.len(),
            "{} removed from the registry",
            doctor.name
        );
        Some(doctor)
    }

    pub fn list_all(&self) -> impl Iterator<Item = &Doctor> + '_ {
        self.doctors.iter()
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

impl FromIterator<Doctor> for DoctorRegistry {
    fn from_iter<I: IntoIterator<Item = Doctor>>(iter: I) -> Self {
        let mut registry = DoctorRegistry::new();
        for doctor in iter {
            registry.add(doctor);
        }
        registry
    }
}
