//! Listagens exibidas ao operador

use std::io::{self, Write};

use intake_core::{Doctor, Patient};

const RULE_WIDTH: usize = 105;

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "*".repeat(RULE_WIDTH))
}

/// Tabela de médicos disponíveis, com os sintomas de cada um
pub fn doctors<'a>(
    out: &mut impl Write,
    doctors: impl IntoIterator<Item = &'a Doctor>,
) -> io::Result<()> {
    let mut doctors = doctors.into_iter().peekable();
    if doctors.peek().is_none() {
        return writeln!(out, "No doctors available.");
    }

    writeln!(out, "Available Doctors:")?;
    rule(out)?;
    writeln!(
        out,
        "{:<20}{:<20}{:<20}{:>35}",
        "Doctor Name", "Specialty", "Schedule", "Fee"
    )?;
    rule(out)?;

    for doctor in doctors {
        writeln!(
            out,
            "{:<20}{:<20}{:<20} Time: {}{:>10}{}",
            doctor.name,
            doctor.specialty,
            doctor.schedule.date,
            doctor.schedule.time,
            "$",
            doctor.fee
        )?;
        writeln!(out, "Specialty Symptoms:")?;
        for symptom in &doctor.symptoms {
            writeln!(out, " - {}", symptom)?;
        }
        writeln!(out)?;
    }

    rule(out)
}

/// Pacientes aguardando, em ordem de chegada
pub fn queue<'a>(
    out: &mut impl Write,
    patients: impl IntoIterator<Item = &'a Patient>,
) -> io::Result<()> {
    writeln!(out, "Current Queue:")?;
    for patient in patients {
        writeln!(out, "Name: {} - Reason: {}", patient.name, patient.reason)?;
    }
    Ok(())
}

/// Ficha completa de um paciente
pub fn patient(out: &mut impl Write, patient: &Patient) -> io::Result<()> {
    writeln!(out, "Name: {}", patient.name)?;
    writeln!(out, "Birthdate: {}", patient.birthdate)?;
    writeln!(out, "Gender: {}", patient.gender)?;
    writeln!(out, "Address: {}", patient.address)?;
    writeln!(out, "Contact Details: {}", patient.contact_details)?;
    writeln!(out, "Reason: {}", patient.reason)?;
    writeln!(out, "Assigned Doctor: {}", patient.assigned_doctor())?;
    writeln!(out, "Status: {}", patient.status)
}
