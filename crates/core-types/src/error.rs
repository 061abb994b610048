use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown endpoint name: {0}")]
    UnknownEndpoint(String),

    #[error("Unknown module name: {0}")]
    UnknownModule(String),
}
