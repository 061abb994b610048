use crate::EndpointProvider;
use crate::error::ApiError;
use calibration::Calibrator;
use configuration::Config;
use core_types::{CalibratedScore, EndpointScore, ModuleKind, ModuleScore};
use endpoints::{EndpointRegistry, score_endpoint};
use std::sync::Arc;
use std::time::Duration;

/// Fetches every registered endpoint for a symbol, scores each payload and
/// calibrates the result.
///
/// Requests are strictly sequential with a fixed pause between them. A failed
/// fetch is recorded as a failed endpoint score and never retried.
pub struct EndpointAnalyzer {
    provider: Arc<dyn EndpointProvider>,
    calibrator: Calibrator,
    request_delay: Duration,
}

impl EndpointAnalyzer {
    pub fn new(
        provider: Arc<dyn EndpointProvider>,
        calibrator: Calibrator,
        request_delay: Duration,
    ) -> Self {
        Self {
            provider,
            calibrator,
            request_delay,
        }
    }

    /// Builds an analyzer over the default endpoint registry.
    pub fn from_config(
        provider: Arc<dyn EndpointProvider>,
        config: &Config,
    ) -> Result<Self, ApiError> {
        let calibrator = Calibrator::new(config.calibration.clone(), EndpointRegistry::default())?;
        Ok(Self::new(
            provider,
            calibrator,
            Duration::from_millis(config.provider.request_delay_ms),
        ))
    }

    /// Fetches and scores each registered endpoint in registry order.
    pub async fn score_endpoints(&self, symbol: &str) -> Vec<EndpointScore> {
        let registry = self.calibrator.registry();
        let mut scores = Vec::with_capacity(registry.len());

        for (i, endpoint) in registry.endpoints().enumerate() {
            if i > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let score = match self.provider.fetch(symbol, endpoint).await {
                Ok(payload) => score_endpoint(endpoint, &payload),
                Err(e) => {
                    tracing::warn!(symbol, %endpoint, error = %e, "Endpoint fetch failed.");
                    EndpointScore::failed(endpoint, e.to_string())
                }
            };
            tracing::debug!(
                symbol,
                %endpoint,
                score = score.score,
                confidence = score.confidence,
                success = score.success,
                "Scored endpoint."
            );
            scores.push(score);
        }
        scores
    }

    pub async fn analyze(&self, symbol: &str) -> CalibratedScore {
        let scores = self.score_endpoints(symbol).await;
        let calibrated = self.calibrator.calibrate(symbol, &scores);
        tracing::info!(
            symbol,
            score = calibrated.score,
            confidence = calibrated.confidence,
            direction = %calibrated.direction,
            successful = calibrated.successful_endpoints,
            total = calibrated.total_endpoints,
            "Endpoint analysis complete."
        );
        calibrated
    }

    /// Runs the analysis and presents it as one module's opinion.
    pub async fn analyze_module(&self, module: ModuleKind, symbol: &str) -> ModuleScore {
        let calibrated = self.analyze(symbol).await;
        ModuleScore::from_calibrated(module, &calibrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixtureProvider;
    use configuration::CalibrationSettings;
    use core_types::{Direction, Endpoint};
    use serde_json::json;

    fn analyzer(fixture: serde_json::Value) -> EndpointAnalyzer {
        let registry = EndpointRegistry::from_weights(vec![
            (Endpoint::Ticker, 20.0),
            (Endpoint::LsRatio, 30.0),
            (Endpoint::TrendIndicatorV3, 50.0),
        ])
        .unwrap();
        let calibrator = Calibrator::new(CalibrationSettings::default(), registry).unwrap();
        EndpointAnalyzer::new(
            Arc::new(FixtureProvider::from_value(fixture).unwrap()),
            calibrator,
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn missing_endpoints_become_failed_scores() {
        let analyzer = analyzer(json!({
            "trend_indicator_v3": {"trend_score": 70, "buy_pressure": 55, "sell_pressure": 45},
        }));
        let scores = analyzer.score_endpoints("BTC").await;
        assert_eq!(scores.len(), 3);
        assert!(!scores[0].success);
        assert!(!scores[1].success);
        assert!(scores[2].success);

        let calibrated = analyzer.analyze("BTC").await;
        assert_eq!(calibrated.successful_endpoints, 1);
        assert_eq!(calibrated.total_endpoints, 3);
    }

    #[tokio::test]
    async fn empty_fixture_is_neutral_zero() {
        let calibrated = analyzer(json!({})).analyze("BTC").await;
        assert_eq!(calibrated.score, 0.0);
        assert_eq!(calibrated.confidence, 0.0);
        assert_eq!(calibrated.direction, Direction::Neutral);
    }

    #[tokio::test]
    async fn module_score_carries_the_module_kind() {
        let analyzer = analyzer(json!({
            "ticker": {"last_price": 100.0, "change_24h": 1.0},
            "ls_ratio": {"ratio": 1.0},
            "trend_indicator_v3": {"trend_score": 50},
        }));
        let module = analyzer.analyze_module(ModuleKind::KingFisher, "BTC").await;
        assert_eq!(module.module, ModuleKind::KingFisher);
        assert!((0.0..=100.0).contains(&module.score));
    }
}
