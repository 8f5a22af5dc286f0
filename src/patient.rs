//! Patient metadata carried into the rendered report.
//!
//! Values are validated once at construction and immutable for the duration
//! of a report generation; the renderer treats them as plain display strings.

use crate::error::MedscanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient gender as captured by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Gender {
    type Err = MedscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(MedscanError::UnknownGender { value: s.to_string() }),
        }
    }
}

/// Immutable patient details for one report.
///
/// Age is validated to the intake form's 0–120 range at construction so the
/// renderer never has to re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientMetadata {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

impl PatientMetadata {
    /// Create validated patient metadata.
    pub fn new(name: impl Into<String>, age: u32, gender: Gender) -> Result<Self, MedscanError> {
        if age > 120 {
            return Err(MedscanError::AgeOutOfRange { age });
        }
        Ok(Self {
            name: name.into(),
            age,
            gender,
        })
    }

    /// Download filename for this patient's report: `Medical_Report_<name>.pdf`.
    pub fn report_filename(&self) -> String {
        format!("Medical_Report_{}.pdf", self.name)
    }
}
