use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Calibrator needs at least one registered endpoint")]
    EmptyRegistry,

    #[error("Calibration parameters are invalid: {0}")]
    InvalidParameters(String),
}
