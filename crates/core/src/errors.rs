use thiserror::Error;

/// Unified error type for the balance-dashboard-core library.
///
/// The computation engine itself never fails: bad input is defaulted to zero.
/// Errors only surface at the configuration, import/export and report
/// boundaries.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── Import / Export ─────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Report generation failed: {0}")]
    Report(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<std::fmt::Error> for CoreError {
    fn from(e: std::fmt::Error) -> Self {
        CoreError::Report(e.to_string())
    }
}
