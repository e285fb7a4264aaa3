//! Opções do menu principal do console

use std::str::FromStr;

use intake_core::IntakeError;

/// Ação escolhida pelo operador no menu principal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListDoctors,
    RegisterPatient,
    ProcessNext,
    ListQueue,
    SearchPatient,
    Exit,
}

impl MenuChoice {
    /// Texto do menu, na ordem numérica das opções
    pub const MENU: &'static str = "1. Display Doctors\n\
                                    2. Add Patient\n\
                                    3. Process Patient\n\
                                    4. Display Queue\n\
                                    5. Search Patient\n\
                                    6. Exit";
}

impl FromStr for MenuChoice {
    type Err = IntakeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().parse::<i64>() {
            Ok(1) => Ok(MenuChoice::ListDoctors),
            Ok(2) => Ok(MenuChoice::RegisterPatient),
            Ok(3) => Ok(MenuChoice::ProcessNext),
            Ok(4) => Ok(MenuChoice::ListQueue),
            Ok(5) => Ok(MenuChoice::SearchPatient),
            Ok(6) => Ok(MenuChoice::Exit),
            _ => Err(IntakeError::InvalidMenuChoice(input.trim().to_string())),
        }
    }
}
