//! Atendimento do próximo paciente da fila
//!
//! Cada chamada de [`Clinic::process_next`] faz uma única passagem:
//! retira o paciente, busca o médico, cobra, atualiza o status e remove o médico.
//! Pagamento e status vêm de colaboradores externos (o console, em produção).

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::IntakeError;
use crate::models::{Assignment, Doctor, Patient, PatientIntake, Payment};
use crate::queue::PatientQueue;
use crate::registry::DoctorRegistry;

/// Coleta o pagamento de um atendimento
pub trait PaymentCollector {
    /// `fee` é apenas informativo; o valor devolvido não é conferido
    fn collect_payment(&mut self, fee: Decimal) -> Result<Payment, IntakeError>;
}

/// Coleta o novo status do paciente, em texto livre
pub trait StatusCollector {
    fn collect_status(&mut self, patient: &Patient) -> Result<String, IntakeError>;
}

/// Notificações das etapas do atendimento, para narração ao operador
pub trait ProcessingObserver {
    fn assigned(&mut self, _patient: &Patient, _doctor: &Doctor) -> Result<(), IntakeError> {
        Ok(())
    }

    fn billed(&mut self, _payment: &Payment) -> Result<(), IntakeError> {
        Ok(())
    }

    fn status_updated(&mut self, _patient: &Patient) -> Result<(), IntakeError> {
        Ok(())
    }
}

/// Balcão de atendimento: quem cobra, pergunta o status e acompanha as etapas
pub trait IntakeDesk: PaymentCollector + StatusCollector + ProcessingObserver {}

impl<T> IntakeDesk for T where
    T: PaymentCollector + StatusCollector + ProcessingObserver + ?Sized
{
}

/// Resultado de um atendimento
///
/// É a única representação do paciente depois de atendido: ele não volta à fila.
#[derive(Debug, Clone)]
pub struct ProcessingReport {
    pub patient: Patient,
    pub assignment: Assignment,
    /// Presente apenas quando houve atribuição
    pub payment: Option<Payment>,
    /// Taxa do médico atribuído
    pub fee: Option<Decimal>,
}

impl ProcessingReport {
    /// Valor pago difere da taxa do médico
    pub fn fee_mismatch(&self) -> bool {
        match (&self.payment, self.fee) {
            (Some(payment), Some(fee)) => payment.amount != fee,
            _ => false,
        }
    }
}

/// Estado da clínica durante a execução do processo
#[derive(Debug, Default)]
pub struct Clinic {
    pub queue: PatientQueue,
    pub registry: DoctorRegistry,
}

impl Clinic {
    pub fn new(registry: DoctorRegistry) -> Self {
        Self {
            queue: PatientQueue::new(),
            registry,
        }
    }

    /// Registra um paciente com status inicial e o coloca no final da fila
    pub fn register_patient(&mut self, intake: PatientIntake) -> &Patient {
        self.queue.enqueue(Patient::new(intake))
    }

    /// Atende o próximo paciente da fila
    ///
    /// Retorna `IntakeError::EmptyQueue` sem alterar nada quando não há pacientes.
    /// A falta de médico não é erro: o resultado vem em `ProcessingReport::assignment`.
    pub fn process_next<D>(&mut self, desk: &mut D) -> Result<ProcessingReport, IntakeError>
    where
        D: IntakeDesk + ?Sized,
    {
        let mut patient = self.queue.dequeue_front()?;

        if self.registry.is_empty() {
            info!(patient_id = %patient.id, "Nenhum médico cadastrado");
            return Ok(Self::unassigned(patient, Assignment::NoDoctorAvailable));
        }

        let doctor = match self.registry.find_match(&patient.reason) {
            Some(doctor) => doctor.clone(),
            None => {
                info!(
                    patient_id = %patient.id,
                    reason = %patient.reason,
                    "Nenhuma especialidade compatível"
                );
                let assignment = Assignment::NoSpecialtyMatch {
                    reason: patient.reason.clone(),
                };
                return Ok(Self::unassigned(patient, assignment));
            }
        };

        let assignment = Assignment::Assigned {
            doctor_name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
        };
        patient.assignment = Some(assignment.clone());
        info!(
            patient_id = %patient.id,
            doctor_id = %doctor.id,
            "Paciente {} atribuído a {}",
            patient.name,
            doctor.name
        );
        desk.assigned(&patient, &doctor)?;

        let payment = desk.collect_payment(doctor.fee)?;
        if payment.amount != doctor.fee {
            warn!(
                patient_id = %patient.id,
                fee = %doctor.fee,
                amount = %payment.amount,
                "Valor pago difere da taxa do médico"
            );
        }
        desk.billed(&payment)?;

        patient.status = desk.collect_status(&patient)?;
        desk.status_updated(&patient)?;

        // O médico foi encontrado neste mesmo passo; a remoção não pode falhar
        let removed = self.registry.remove(doctor.id);
        debug_assert!(removed.is_some(), "médico atribuído ausente do cadastro");
        if removed.is_none() {
            warn!(doctor_id = %doctor.id, "Médico atribuído já não estava no cadastro");
        }

        Ok(ProcessingReport {
            patient,
            assignment,
            payment: Some(payment),
            fee: Some(doctor.fee),
        })
    }

    fn unassigned(mut patient: Patient, assignment: Assignment) -> ProcessingReport {
        patient.assignment = Some(assignment.clone());
        ProcessingReport {
            patient,
            assignment,
            payment: None,
            fee: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, Schedule, INITIAL_STATUS};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Desk {}

        impl PaymentCollector for Desk {
            fn collect_payment(&mut self, fee: Decimal) -> Result<Payment, IntakeError>;
        }

        impl StatusCollector for Desk {
            fn collect_status(&mut self, patient: &Patient) -> Result<String, IntakeError>;
        }
    }

    impl ProcessingObserver for MockDesk {}

    fn doctor(name: &str, specialty: &str, symptoms: &[&str], fee: i64) -> Doctor {
        Doctor::new(
            name,
            specialty,
            symptoms.iter().map(|s| s.to_string()).collect(),
            Schedule::new("Mon-Wed", "7:00am - 5:00pm"),
            Decimal::new(fee, 0),
        )
    }

    fn intake(name: &str, reason: &str) -> PatientIntake {
        PatientIntake {
            name: name.to_string(),
            birthdate: "1990-01-01".to_string(),
            gender: "F".to_string(),
            address: "Rua A, 1".to_string(),
            reason: reason.to_string(),
        }
    }

    /// Balcão que não pode ser consultado
    fn idle_desk() -> MockDesk {
        let mut desk = MockDesk::new();
        desk.expect_collect_payment().times(0);
        desk.expect_collect_status().times(0);
        desk
    }

    /// Balcão com respostas fixas que registra a ordem das etapas
    #[derive(Default)]
    struct RecordingDesk {
        events: Vec<String>,
    }

    impl PaymentCollector for RecordingDesk {
        fn collect_payment(&mut self, fee: Decimal) -> Result<Payment, IntakeError> {
            self.events.push(format!("payment prompt {}", fee));
            Ok(Payment { amount: fee, method: PaymentMethod::DigitalBank })
        }
    }

    impl StatusCollector for RecordingDesk {
        fn collect_status(&mut self, patient: &Patient) -> Result<String, IntakeError> {
            self.events.push(format!("status prompt {}", patient.name));
            Ok("In Progress".to_string())
        }
    }

    impl ProcessingObserver for RecordingDesk {
        fn assigned(&mut self, patient: &Patient, doctor: &Doctor) -> Result<(), IntakeError> {
            self.events.push(format!("assigned {} {}", patient.name, doctor.specialty));
            Ok(())
        }

        fn billed(&mut self, payment: &Payment) -> Result<(), IntakeError> {
            self.events.push(format!("billed {} {}", payment.amount, payment.method));
            Ok(())
        }

        fn status_updated(&mut self, patient: &Patient) -> Result<(), IntakeError> {
            self.events.push(format!("status {}", patient.status));
            Ok(())
        }
    }

    #[test]
    fn test_matching_doctor_is_assigned_billed_and_removed() -> Result<(), IntakeError> {
        let registry: DoctorRegistry = vec![doctor(
            "Dr. Smith",
            "Cardiologist",
            &["Shortness of breath", "Chest pain or discomfort"],
            150,
        )]
        .into_iter()
        .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Ana", "Chest pain or discomfort and dizziness"));

        let mut desk = MockDesk::new();
        desk.expect_collect_payment()
            .with(eq(Decimal::new(150, 0)))
            .times(1)
            .returning(|fee| Ok(Payment { amount: fee, method: PaymentMethod::Bank }));
        desk.expect_collect_status()
            .withf(|patient: &Patient| patient.assigned_doctor() == "Dr. Smith")
            .times(1)
            .returning(|_| Ok("In Progress".to_string()));

        let report = clinic.process_next(&mut desk)?;

        assert_eq!(report.patient.assigned_doctor(), "Dr. Smith");
        assert_eq!(report.patient.status, "In Progress");
        assert_eq!(
            report.assignment,
            Assignment::Assigned {
                doctor_name: "Dr. Smith".to_string(),
                specialty: "Cardiologist".to_string(),
            }
        );
        assert_eq!(report.payment.as_ref().map(|p| p.method), Some(PaymentMethod::Bank));
        assert!(!report.fee_mismatch());
        assert!(clinic.registry.is_empty());
        assert!(clinic.queue.is_empty());

        Ok(())
    }

    #[test]
    fn test_steps_run_in_order() -> Result<(), IntakeError> {
        let registry: DoctorRegistry = vec![doctor("Dr. Rob", "Surgeon", &["Abdominal pain"], 140)]
            .into_iter()
            .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Ana", "Abdominal pain"));
        let mut desk = RecordingDesk::default();

        clinic.process_next(&mut desk)?;

        assert_eq!(
            desk.events,
            [
                "assigned Ana Surgeon",
                "payment prompt 140",
                "billed 140 Digital Bank",
                "status prompt Ana",
                "status In Progress",
            ]
        );

        Ok(())
    }

    #[test]
    fn test_empty_registry_reports_no_doctor_available() -> Result<(), IntakeError> {
        let mut clinic = Clinic::default();
        clinic.register_patient(intake("Bruno", "anything"));
        let mut desk = idle_desk();

        let report = clinic.process_next(&mut desk)?;

        assert_eq!(report.assignment, Assignment::NoDoctorAvailable);
        assert_eq!(report.patient.assigned_doctor(), "No doctor available");
        assert_eq!(report.patient.status, INITIAL_STATUS);
        assert!(report.payment.is_none());
        assert!(clinic.queue.is_empty());

        Ok(())
    }

    #[test]
    fn test_unmatched_reason_keeps_doctor_available() -> Result<(), IntakeError> {
        let registry: DoctorRegistry = vec![doctor(
            "Dr. Johnson",
            "Pediatrician",
            &["Fever", "Ear infections"],
            120,
        )]
        .into_iter()
        .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Carla", "unrelated issue"));
        let mut desk = idle_desk();

        let report = clinic.process_next(&mut desk)?;

        assert!(report.patient.assigned_doctor().contains("unrelated issue"));
        assert_eq!(
            report.assignment,
            Assignment::NoSpecialtyMatch { reason: "unrelated issue".to_string() }
        );
        let names: Vec<_> = clinic.registry.list_all().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Dr. Johnson"]);

        Ok(())
    }

    #[test]
    fn test_empty_queue_changes_nothing() {
        let registry: DoctorRegistry = vec![doctor("Dr. Rob", "Surgeon", &["Abdominal pain"], 140)]
            .into_iter()
            .collect();
        let mut clinic = Clinic::new(registry);
        let mut desk = idle_desk();

        let result = clinic.process_next(&mut desk);

        assert!(matches!(result, Err(IntakeError::EmptyQueue)));
        assert_eq!(clinic.registry.len(), 1);
        assert!(clinic.queue.is_empty());
    }

    #[test]
    fn test_amount_divergent_from_fee_is_accepted() -> Result<(), IntakeError> {
        let registry: DoctorRegistry = vec![doctor("Dr. Rob", "Surgeon", &["Abdominal pain"], 140)]
            .into_iter()
            .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Davi", "Abdominal pain since monday"));

        let mut desk = MockDesk::new();
        desk.expect_collect_payment()
            .returning(|_| {
                Ok(Payment {
                    amount: Decimal::new(-5, 0),
                    method: PaymentMethod::Cash,
                })
            });
        desk.expect_collect_status().returning(|_| Ok("Recovered".to_string()));

        let report = clinic.process_next(&mut desk)?;

        assert!(report.fee_mismatch());
        assert_eq!(report.payment.map(|p| p.amount), Some(Decimal::new(-5, 0)));
        assert!(clinic.registry.is_empty());

        Ok(())
    }

    #[test]
    fn test_collaborator_failure_keeps_doctor() {
        let registry: DoctorRegistry = vec![doctor("Dr. Rob", "Surgeon", &["Abdominal pain"], 140)]
            .into_iter()
            .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Davi", "Abdominal pain"));

        let mut desk = MockDesk::new();
        desk.expect_collect_payment().returning(|_| {
            Err(IntakeError::Input(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)))
        });
        desk.expect_collect_status().times(0);

        let result = clinic.process_next(&mut desk);

        assert!(matches!(result, Err(IntakeError::Input(_))));
        assert_eq!(clinic.registry.len(), 1);
        assert!(clinic.queue.is_empty());
    }

    #[test]
    fn test_processed_patient_cannot_be_found() -> Result<(), IntakeError> {
        let mut clinic = Clinic::default();
        clinic.register_patient(intake("Eva", "Fever"));
        clinic.register_patient(intake("Fabio", "Fever"));
        assert!(clinic.queue.find_by_name("Eva").is_some());

        let report = clinic.process_next(&mut idle_desk())?;

        assert_eq!(report.patient.name, "Eva");
        assert!(clinic.queue.find_by_name("Eva").is_none());
        assert_eq!(clinic.queue.len(), 1);

        Ok(())
    }

    #[test]
    fn test_only_the_assigned_doctor_leaves_the_registry() -> Result<(), IntakeError> {
        let registry: DoctorRegistry = vec![
            doctor("Dr. Smith", "Cardiologist", &["High blood pressure"], 150),
            doctor("Dr. Johnson", "Pediatrician", &["Fever"], 120),
            doctor("Dr. Rob", "Surgeon", &["Fever"], 140),
        ]
        .into_iter()
        .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Ivo", "Fever since sunday"));
        let assigned_id = clinic.registry.find_match("Fever").map(|d| d.id);

        let mut desk = RecordingDesk::default();
        let report = clinic.process_next(&mut desk)?;

        assert_eq!(report.patient.assigned_doctor(), "Dr. Johnson");
        assert!(clinic.registry.list_all().all(|d| Some(d.id) != assigned_id));
        let names: Vec<_> = clinic.registry.list_all().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Dr. Smith", "Dr. Rob"]);
        assert_eq!(
            clinic.registry.find_match("Fever").map(|d| d.name.as_str()),
            Some("Dr. Rob")
        );

        Ok(())
    }

    #[test]
    fn test_each_doctor_serves_one_patient() -> Result<(), IntakeError> {
        let registry: DoctorRegistry = vec![doctor("Dr. Johnson", "Pediatrician", &["Fever"], 120)]
            .into_iter()
            .collect();
        let mut clinic = Clinic::new(registry);
        clinic.register_patient(intake("Gil", "Fever"));
        clinic.register_patient(intake("Hana", "Fever"));

        let mut desk = MockDesk::new();
        desk.expect_collect_payment()
            .times(1)
            .returning(|fee| Ok(Payment { amount: fee, method: PaymentMethod::Bank }));
        desk.expect_collect_status().times(1).returning(|_| Ok("Recovered".to_string()));

        let first = clinic.process_next(&mut desk)?;
        let second = clinic.process_next(&mut desk)?;

        assert_eq!(first.patient.assigned_doctor(), "Dr. Johnson");
        assert_eq!(second.assignment, Assignment::NoDoctorAvailable);

        Ok(())
    }
}
