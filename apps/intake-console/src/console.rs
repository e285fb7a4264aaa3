//! Console do operador
//!
//! Laço de menu síncrono sobre qualquer par leitor/escritor. O mesmo console faz o
//! papel de balcão no atendimento: pergunta forma de pagamento, valor e status.

use std::io::{self, BufRead, Write};

use intake_core::{
    Clinic, Doctor, IntakeError, Patient, PatientIntake, Payment, PaymentCollector,
    PaymentMethod, ProcessingObserver, StatusCollector,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::menu::MenuChoice;
use crate::render;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Executa o menu até a opção de saída ou o fim da entrada
    pub fn run(&mut self, clinic: &mut Clinic) -> Result<(), IntakeError> {
        loop {
            writeln!(self.output, "Hospital Queue System")?;
            writeln!(self.output, "{}", MenuChoice::MENU)?;

            let Some(line) = self.prompt("Enter your choice: ")? else {
                debug!("Fim da entrada no menu principal");
                writeln!(self.output)?;
                writeln!(self.output, "Exiting...")?;
                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    warn!("{}", e);
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            match choice {
                MenuChoice::ListDoctors => {
                    render::doctors(&mut self.output, clinic.registry.list_all())?
                }
                MenuChoice::RegisterPatient => self.register_patient(clinic)?,
                MenuChoice::ProcessNext => self.process_next(clinic)?,
                MenuChoice::ListQueue => {
                    render::queue(&mut self.output, clinic.queue.peek_all())?
                }
                MenuChoice::SearchPatient => self.search_patient(clinic)?,
                MenuChoice::Exit => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
            }
        }
    }

    fn register_patient(&mut self, clinic: &mut Clinic) -> Result<(), IntakeError> {
        // Contato nunca é solicitado; o paciente fica com o campo vazio
        let intake = PatientIntake {
            name: self.require("Enter patient's name: ")?,
            birthdate: self.require("Enter patient's birthdate: ")?,
            gender: self.require("Enter patient's gender: ")?,
            address: self.require("Enter patient's address: ")?,
            reason: self.require("Enter reason for visit: ")?,
        };

        let patient = clinic.register_patient(intake);
        writeln!(self.output, "{} added to the queue.", patient.name)?;
        Ok(())
    }

    fn process_next(&mut self, clinic: &mut Clinic) -> Result<(), IntakeError> {
        match clinic.process_next(self) {
            Ok(report) => {
                if report.fee_mismatch() {
                    if let (Some(payment), Some(fee)) = (&report.payment, report.fee) {
                        writeln!(
                            self.output,
                            "Note: amount paid (${}) differs from the doctor's fee (${}).",
                            payment.amount, fee
                        )?;
                    }
                }
                writeln!(
                    self.output,
                    "Processing patient: {} - Doctor: {}",
                    report.patient.name, report.assignment
                )?;
                Ok(())
            }
            Err(IntakeError::EmptyQueue) => {
                writeln!(self.output, "Queue is empty.")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn search_patient(&mut self, clinic: &Clinic) -> Result<(), IntakeError> {
        let name = self.require("Enter patient name to search: ")?;

        match clinic.queue.find_by_name(&name) {
            Some(patient) => {
                writeln!(self.output, "Patient found:")?;
                render::patient(&mut self.output, patient)?;
            }
            None => writeln!(self.output, "Patient not found.")?,
        }
        Ok(())
    }

    /// Exibe o texto e lê uma linha; `None` no fim da entrada
    fn prompt(&mut self, text: &str) -> Result<Option<String>, IntakeError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Bytes fora de UTF-8 viram texto comum; só o fim da entrada encerra a sessão
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Como `prompt`, mas o fim da entrada no meio de uma operação é erro
    fn require(&mut self, text: &str) -> Result<String, IntakeError> {
        self.prompt(text)?.ok_or_else(|| {
            IntakeError::Input(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for the operator",
            ))
        })
    }
}

/// Valor digitado pelo operador; qualquer decimal é aceito, inclusive zero ou negativo
pub fn parse_amount(input: &str) -> Result<Decimal, IntakeError> {
    input
        .trim()
        .parse::<Decimal>()
        .map_err(|e| IntakeError::InvalidAmount(format!("{:?}: {}", input.trim(), e)))
}

impl<R: BufRead, W: Write> PaymentCollector for Console<R, W> {
    fn collect_payment(&mut self, _fee: Decimal) -> Result<Payment, IntakeError> {
        writeln!(self.output, "Select payment method:")?;
        writeln!(self.output, "1. Cash\n2. Digital Bank\n3. Bank")?;
        let selection = self.require("Selected payment method: ")?;

        let method = match PaymentMethod::from_selection(&selection) {
            Ok(method) => method,
            Err(e) => {
                warn!("{}", e);
                writeln!(self.output, "Invalid payment method. Defaulting to Cash.")?;
                PaymentMethod::Cash
            }
        };

        let entered = self.require("Enter the amount: $")?;
        let amount = parse_amount(&entered).unwrap_or_else(|e| {
            warn!("{}; registrando zero", e);
            Decimal::ZERO
        });

        Ok(Payment { amount, method })
    }
}

impl<R: BufRead, W: Write> StatusCollector for Console<R, W> {
    fn collect_status(&mut self, _patient: &Patient) -> Result<String, IntakeError> {
        self.require("Update patient status (e.g., Recovered, In Progress, etc.): ")
    }
}

impl<R: BufRead, W: Write> ProcessingObserver for Console<R, W> {
    fn assigned(&mut self, patient: &Patient, doctor: &Doctor) -> Result<(), IntakeError> {
        writeln!(
            self.output,
            "Processing patient: {} - Doctor: {} - Specialty: {}",
            patient.name, doctor.name, doctor.specialty
        )?;
        writeln!(self.output, "Doctor's Fee: ${}", doctor.fee)?;
        Ok(())
    }

    fn billed(&mut self, payment: &Payment) -> Result<(), IntakeError> {
        writeln!(
            self.output,
            "Payment Details - Amount: ${} Method: {}",
            payment.amount, payment.method
        )?;
        Ok(())
    }

    fn status_updated(&mut self, patient: &Patient) -> Result<(), IntakeError> {
        writeln!(self.output, "Patient status updated to: {}", patient.status)?;
        Ok(())
    }
}
