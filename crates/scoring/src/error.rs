use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Invalid input for {symbol}: {reason}")]
    InvalidInput { symbol: String, reason: String },

    #[error("Module {found} supplied in the {expected} slot")]
    ModuleMismatch { expected: String, found: String },

    #[error("A calculation error occurred: {0}")]
    Calculation(String),
}
