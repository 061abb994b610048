use thiserror::Error;

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Payload for {0} is empty")]
    EmptyPayload(String),

    #[error("Failed to decode payload for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Registry weights must be positive, got {weight} for {endpoint}")]
    InvalidWeight { endpoint: String, weight: f64 },

    #[error("Endpoint {0} is registered twice")]
    DuplicateEndpoint(String),
}
