use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A per-document failure, kept so a caller can list it without re-deriving the cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub file_name: String,
    pub message: String,
    pub severity: Severity,
}

impl ErrorRecord {
    pub fn error(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.file_name, self.message)
    }
}
