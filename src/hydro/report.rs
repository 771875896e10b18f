// src/hydro/report.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schweregrad einer Laufzeitmeldung an den Aufrufer.
///
/// `Error` bezeichnet blockierende Fehler; die Pipeline selbst liefert
/// blockierende Zustände als `HydroError`, Hosts können sie aber über
/// [`Diagnostic::from_error`] einheitlich darstellen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Meldung mit Kontext für den Aufrufer; kein maschinenlesbares
/// Fehlercode-Schema, nur Schweregrad plus Beschreibung.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Verpackt einen blockierenden Fehler als darstellbare Meldung
    pub fn from_error(error: &crate::hydro::error::HydroError) -> Self {
        Self::error(error.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
