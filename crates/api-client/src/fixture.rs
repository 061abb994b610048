use crate::EndpointProvider;
use crate::error::ApiError;
use async_trait::async_trait;
use core_types::Endpoint;
use serde_json::{Map, Value};
use std::path::Path;

/// Serves recorded payloads from a JSON object keyed by endpoint name.
///
/// Endpoints missing from the object fail like an unreachable endpoint would.
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    payloads: Map<String, Value>,
}

impl FixtureProvider {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(payloads) => Ok(Self { payloads }),
            other => Err(ApiError::Deserialization(format!(
                "fixture must be a JSON object keyed by endpoint name, got {}",
                kind(&other)
            ))),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let text = std::fs::read_to_string(path)?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let provider = Self::from_value(value)?;

        for key in provider.payloads.keys() {
            if key.parse::<Endpoint>().is_err() {
                tracing::warn!(key = %key, path = %path.display(), "Fixture key is not a known endpoint.");
            }
        }
        Ok(provider)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl EndpointProvider for FixtureProvider {
    async fn fetch(&self, _symbol: &str, endpoint: Endpoint) -> Result<Value, ApiError> {
        self.payloads
            .get(endpoint.name())
            .cloned()
            .ok_or_else(|| ApiError::MissingFixture(endpoint.to_string()))
    }
}
