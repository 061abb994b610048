use crate::error::ApiError;
use async_trait::async_trait;
use core_types::Endpoint;
use serde_json::Value;

pub mod analyzer;
pub mod cryptometer;
pub mod error;
pub mod fixture;
pub mod responses;

// --- Public API ---
pub use analyzer::EndpointAnalyzer;
pub use cryptometer::CryptometerClient;
pub use fixture::FixtureProvider;
pub use responses::ProviderStatus;

/// The interface for anything that can supply raw endpoint payloads.
///
/// This trait is the data boundary of the scoring pipeline, allowing the live
/// HTTP provider to be swapped for recorded fixtures.
#[async_trait]
pub trait EndpointProvider: Send + Sync {
    /// Fetches the raw JSON payload of one endpoint for one symbol.
    async fn fetch(&self, symbol: &str, endpoint: Endpoint) -> Result<Value, ApiError>;
}
