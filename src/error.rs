//! Error types for configuration loading and view-state operations.
//!
//! The dashboard's data operations are total; errors only appear where
//! outside input enters the system (configuration files, environment,
//! selection requests that name a patient outside the roster).

use thiserror::Error;

/// Errors raised by the dashboard library.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("patient {0} is not in the roster")]
    UnknownPatient(u32),

    #[error("patient roster is empty")]
    EmptyRoster,

    #[error("patient id {0} appears more than once in the roster")]
    DuplicatePatientId(u32),

    #[error("patient {patient}: risk score {score} is outside 0-100")]
    RiskScoreOutOfRange { patient: u32, score: u8 },

    #[error("device type '{device}': {online} online exceeds {count} total")]
    OnlineExceedsTotal {
        device: String,
        online: u32,
        count: u32,
    },

    #[error("status slice '{slice}': invalid color '{value}' (expected #RRGGBB)")]
    InvalidColor { slice: String, value: String },

    #[error("vital '{field}': center {center} must be finite")]
    InvalidCenter { field: &'static str, center: f64 },

    #[error("vital '{field}': spread {spread} must be non-negative and keep the range finite")]
    InvalidSpread { field: &'static str, spread: f64 },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
