use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("The provider reported a failure: {0}")]
    Provider(String),

    #[error("Failed to deserialize the provider response: {0}")]
    Deserialization(String),

    #[error("No fixture payload for endpoint '{0}'")]
    MissingFixture(String),

    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Calibration(#[from] calibration::CalibrationError),
}
