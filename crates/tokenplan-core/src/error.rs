use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    // ── Category errors ──────────────────────────────────────────────────────
    #[error("unknown allocation category: {0}")]
    UnknownCategory(String),

    #[error("duplicate allocation category: {0}")]
    DuplicateCategory(String),

    #[error("allocation would reach {attempted_bps} bps; maximum is {max_bps} bps")]
    AllocationExceeded { attempted_bps: i64, max_bps: i64 },

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("total supply must be positive, got {0}")]
    InvalidTotalSupply(f64),

    #[error("initial token price must be positive, got {0}")]
    InvalidTokenPrice(f64),

    // ── Serialization / storage ──────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(e: serde_json::Error) -> Self {
        PlannerError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(e: std::io::Error) -> Self {
        PlannerError::Io(e.to_string())
    }
}
