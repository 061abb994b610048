use crate::EndpointProvider;
use crate::error::ApiError;
use crate::responses::ProviderStatus;
use async_trait::async_trait;
use configuration::ProviderSettings;
use core_types::Endpoint;
use serde_json::Value;
use std::time::Duration;

/// An `EndpointProvider` backed by the Cryptometer HTTP API.
#[derive(Clone)]
pub struct CryptometerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    exchange: String,
}

impl CryptometerClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ApiError> {
        if settings.api_key.is_empty() {
            return Err(ApiError::InvalidConfig(
                "provider.api_key is empty; set ZMART__PROVIDER__API_KEY".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            exchange: settings.exchange.clone(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}/", self.base_url, endpoint.name())
    }
}

/// Drops the request URL from a transport error. The URL carries the API key.
fn redact(error: reqwest::Error) -> ApiError {
    ApiError::Http(error.without_url())
}

#[async_trait]
impl EndpointProvider for CryptometerClient {
    async fn fetch(&self, symbol: &str, endpoint: Endpoint) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(self.url(endpoint))
            .query(&[
                ("e", self.exchange.as_str()),
                ("symbol", symbol),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        let text = response.text().await.map_err(redact)?;
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let provider_status = ProviderStatus::from_body(&body);
        if provider_status.is_failure() {
            return Err(ApiError::Provider(provider_status.reason()));
        }

        tracing::debug!(%endpoint, symbol, bytes = text.len(), "Fetched endpoint payload.");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: &str) -> ProviderSettings {
        ProviderSettings {
            base_url: "https://api.cryptometer.io/".to_string(),
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_api_key_is_rejected() {
        assert!(matches!(
            CryptometerClient::new(&settings("")),
            Err(ApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn url_has_one_slash_per_segment() {
        let client = CryptometerClient::new(&settings("key")).unwrap();
        assert_eq!(
            client.url(Endpoint::TrendIndicatorV3),
            "https://api.cryptometer.io/trend_indicator_v3/"
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_carry_the_api_key() {
        let settings = ProviderSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "SUPERSECRET".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = CryptometerClient::new(&settings).unwrap();

        let err = client.fetch("BTC", Endpoint::Ticker).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert!(!err.to_string().contains("SUPERSECRET"), "{err}");
        assert!(!format!("{err:?}").contains("SUPERSECRET"));
    }
}
