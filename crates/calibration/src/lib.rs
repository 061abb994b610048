//! # Endpoint Calibration
//!
//! Combines the per-endpoint scores of one module into a single calibrated
//! percentage, an overall confidence and a direction.
//!
//! The pipeline is:
//! 1. Redistribute the declared weights of the successful endpoints back onto
//!    a 100-point budget and take the weighted mean (`base_score`).
//! 2. Subtract a coverage penalty proportional to the failed fraction.
//! 3. Compress whatever is left above the compression threshold.
//! 4. Clamp to `[0, 100]`.

use configuration::CalibrationSettings;
use core_types::{CalibratedScore, Direction, EndpointScore, Polarity};
use endpoints::EndpointRegistry;

pub mod error;

pub use error::CalibrationError;

/// The calibration aggregator for one endpoint registry.
#[derive(Debug, Clone)]
pub struct Calibrator {
    settings: CalibrationSettings,
    registry: EndpointRegistry,
}

impl Calibrator {
    pub fn new(
        settings: CalibrationSettings,
        registry: EndpointRegistry,
    ) -> Result<Self, CalibrationError> {
        if registry.is_empty() {
            return Err(CalibrationError::EmptyRegistry);
        }
        if !(settings.compression_factor > 0.0 && settings.compression_factor <= 1.0) {
            return Err(CalibrationError::InvalidParameters(
                "compression_factor must be within (0, 1]".to_string(),
            ));
        }
        if !(settings.coverage_penalty_points.is_finite() && settings.coverage_penalty_points >= 0.0)
        {
            return Err(CalibrationError::InvalidParameters(
                "coverage_penalty_points must be finite and not negative".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&settings.compression_threshold) {
            return Err(CalibrationError::InvalidParameters(
                "compression_threshold must be within 0..=100".to_string(),
            ));
        }
        Ok(Self { settings, registry })
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Calibrates a set of endpoint scores for `symbol`.
    ///
    /// Registered endpoints with no successful score count against coverage.
    /// Scores for endpoints outside the registry are ignored.
    pub fn calibrate(&self, symbol: &str, scores: &[EndpointScore]) -> CalibratedScore {
        let total = self.registry.len();

        for stray in scores
            .iter()
            .filter(|s| self.registry.declared_weight(s.endpoint).is_none())
        {
            tracing::warn!(endpoint = %stray.endpoint, "Score for unregistered endpoint ignored.");
        }

        // --- 1. Partition by success, keeping declared weights ---
        let successful: Vec<(&EndpointScore, f64)> = self
            .registry
            .iter()
            .filter_map(|(endpoint, weight)| {
                scores
                    .iter()
                    .find(|s| s.endpoint == endpoint && s.success)
                    .map(|s| (s, weight))
            })
            .collect();

        let successful_weight: f64 = successful.iter().map(|(_, w)| w).sum();
        if successful.is_empty() || successful_weight <= 0.0 {
            tracing::warn!(symbol, total, "No successful endpoints to calibrate.");
            return CalibratedScore {
                symbol: symbol.to_string(),
                score: 0.0,
                confidence: 0.0,
                direction: Direction::Neutral,
                summary: "No successful endpoint analysis".to_string(),
                base_score: 0.0,
                successful_endpoints: 0,
                total_endpoints: total,
                endpoint_scores: scores.to_vec(),
            };
        }

        // --- 2. Redistribute weights onto a 100-point budget ---
        let redistribution_factor = 100.0 / successful_weight;
        let (weighted_sum, weight_sum) =
            successful
                .iter()
                .fold((0.0, 0.0), |(sum, wsum), (score, declared)| {
                    let redistributed = declared * redistribution_factor;
                    (sum + score.score * redistributed, wsum + redistributed)
                });
        let base_score = weighted_sum / weight_sum;

        // --- 3. Direction and curve ---
        let direction = self.classify_direction(successful.iter().map(|(s, _)| *s));
        let score = self.apply_calibration_curve(base_score, successful.len(), total);

        // --- 4. Confidence ---
        let mean_confidence = successful.iter().map(|(s, _)| s.confidence).sum::<f64>()
            / successful.len() as f64;
        let coverage = successful.len() as f64 / total as f64;
        let confidence = (mean_confidence + coverage) / 2.0;

        tracing::debug!(
            symbol,
            successful = successful.len(),
            total,
            successful_weight,
            redistribution_factor,
            base_score,
            score,
            "Calibrated endpoint scores."
        );

        CalibratedScore {
            symbol: symbol.to_string(),
            score,
            confidence,
            direction,
            summary: format!(
                "{}: {:.1}% {} from {}/{} endpoints (base {:.1}, confidence {:.2})",
                symbol,
                score,
                direction,
                successful.len(),
                total,
                base_score,
                confidence
            ),
            base_score,
            successful_endpoints: successful.len(),
            total_endpoints: total,
            endpoint_scores: scores.to_vec(),
        }
    }

    /// Applies the coverage penalty and the high-score compression.
    ///
    /// `successful` and `total` are endpoint counts; `total == 0` is treated as
    /// full coverage.
    pub fn apply_calibration_curve(&self, base_score: f64, successful: usize, total: usize) -> f64 {
        let coverage = if total == 0 {
            1.0
        } else {
            successful as f64 / total as f64
        };
        let penalty = (1.0 - coverage) * self.settings.coverage_penalty_points;
        let mut calibrated = base_score - penalty;

        let threshold = self.settings.compression_threshold;
        if calibrated > threshold {
            let excess = calibrated - threshold;
            calibrated = threshold + excess * self.settings.compression_factor;
        }

        calibrated.clamp(0.0, 100.0)
    }

    /// Counts pattern polarities across successful endpoints.
    fn classify_direction<'a>(&self, scores: impl Iterator<Item = &'a EndpointScore>) -> Direction {
        let (longs, shorts) = scores
            .flat_map(|s| s.patterns.iter())
            .fold((0usize, 0usize), |(l, s), p| match p.polarity() {
                Polarity::Bullish => (l + 1, s),
                Polarity::Bearish => (l, s + 1),
                Polarity::Neutral => (l, s),
            });

        let margin = self.settings.direction_margin;
        if longs > shorts + margin {
            Direction::Long
        } else if shorts > longs + margin {
            Direction::Short
        } else {
            Direction::Neutral
        }
    }
}
