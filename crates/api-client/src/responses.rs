use serde::Deserialize;
use serde_json::Value;

/// The status fields the provider wraps around every payload.
///
/// `success` arrives as either a boolean or the strings `"true"`/`"false"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderStatus {
    #[serde(default)]
    pub success: Option<Value>,
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

impl ProviderStatus {
    /// Reads the status out of a response body. Non-object bodies have none.
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Object(_) => Self::deserialize(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn is_failure(&self) -> bool {
        match &self.success {
            Some(Value::Bool(ok)) => !ok,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("false"),
            _ => false,
        }
    }

    pub fn reason(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "success=false without a message".to_string())
    }
}
