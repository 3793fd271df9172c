//! Closed enumerations for the status-like strings the upstream sends.
//!
//! Every enum carries an explicit fallback so an unexpected upstream value
//! decodes instead of failing the whole snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Bus status
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum BusStatus {
    Active,
    Maintenance,
    #[serde(rename = "Out of Service")]
    #[strum(serialize = "Out of Service")]
    OutOfService,
    /// Any status string the upstream adds later.
    #[serde(other)]
    Unknown,
}

impl BusStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

// ============================================================================
// Incident priority and lifecycle
// ============================================================================

/// Incident priority, matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("High"),
            Self::Medium => f.write_str("Medium"),
            Self::Low => f.write_str("Low"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentStatus {
    Reported,
    Resolved,
    Other(String),
}

impl From<String> for IncidentStatus {
    fn from(raw: String) -> Self {
        if raw.eq_ignore_ascii_case("reported") {
            Self::Reported
        } else if raw.eq_ignore_ascii_case("resolved") {
            Self::Resolved
        } else {
            Self::Other(raw)
        }
    }
}

impl From<IncidentStatus> for String {
    fn from(status: IncidentStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reported => f.write_str("Reported"),
            Self::Resolved => f.write_str("Resolved"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}
