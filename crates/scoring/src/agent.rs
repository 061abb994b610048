use crate::condition::classify_market_condition;
use crate::error::ScoringError;
use crate::history::{HistoryStore, InMemoryHistory};
use crate::insights::{NarrativeInput, build_narrative};
use crate::learning::{self, LearningSystem};
use crate::patterns::{detect_patterns, pattern_coefficient};
use crate::risk::{recommend_position, risk_score};
use crate::trading::trading_parameters;
use crate::weights::calculate_dynamic_weights;
use chrono::Utc;
use configuration::{Config, MasterSettings};
use core_types::{FinalScore, MarketData, ModuleContribution, ModuleKind, ModuleSet, ScoreRecord};
use std::sync::Arc;
use std::time::Instant;

/// Blends the three module opinions into one final score for a symbol.
///
/// The agent holds no mutable state of its own; the injected history store is
/// the only thing a call writes to.
pub struct MasterScoringAgent {
    settings: MasterSettings,
    history: Arc<dyn HistoryStore>,
    learning: Option<Arc<dyn LearningSystem>>,
    trend_window: usize,
}

impl MasterScoringAgent {
    pub fn new(settings: MasterSettings, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            settings,
            history,
            learning: None,
            trend_window: 5,
        }
    }

    /// Builds an agent with an in-memory history sized from the config.
    pub fn from_config(config: &Config) -> Self {
        let history = Arc::new(InMemoryHistory::new(config.history.capacity));
        Self::new(config.master.clone(), history).with_trend_window(config.history.trend_window)
    }

    pub fn with_learning(mut self, learning: Arc<dyn LearningSystem>) -> Self {
        self.learning = Some(learning);
        self
    }

    pub fn with_trend_window(mut self, trend_window: usize) -> Self {
        self.trend_window = trend_window.max(1);
        self
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Computes the final score, logging and returning any failure.
    pub fn calculate_final_score(
        &self,
        symbol: &str,
        modules: &ModuleSet,
        market: Option<&MarketData>,
    ) -> Result<FinalScore, ScoringError> {
        self.score(symbol, modules, market).inspect_err(|e| {
            tracing::error!(symbol, error = %e, "Final score calculation failed.");
        })
    }

    fn score(
        &self,
        symbol: &str,
        modules: &ModuleSet,
        market: Option<&MarketData>,
    ) -> Result<FinalScore, ScoringError> {
        let started = Instant::now();
        validate_inputs(symbol, modules, market)?;

        let default_market = MarketData::default();
        let market_data = market.unwrap_or(&default_market);

        // --- 1. Regime and weights ---
        let condition = classify_market_condition(
            market_data,
            modules,
            self.settings.uncertain_confidence_threshold,
        );
        let weights = calculate_dynamic_weights(&self.settings, condition, modules);

        // --- 2. Patterns ---
        let patterns = detect_patterns(modules, market_data);
        let coefficient = pattern_coefficient(
            &patterns,
            self.settings.pattern_coefficient_min,
            self.settings.pattern_coefficient_max,
        );

        // --- 3. Composition ---
        let contributions: Vec<ModuleContribution> = ModuleKind::ALL
            .into_iter()
            .map(|kind| {
                let raw_score = modules.get(kind).score;
                let weight = weights[kind.index()];
                ModuleContribution {
                    module: kind,
                    weight,
                    raw_score,
                    contribution: weight * raw_score,
                }
            })
            .collect();
        let base: f64 = contributions.iter().map(|c| c.contribution).sum();
        let weighted_confidence: f64 = ModuleKind::ALL
            .into_iter()
            .map(|kind| weights[kind.index()] * modules.get(kind).confidence)
            .sum();

        let adjusted = base * coefficient;
        let mut score = adjusted * (0.7 + 0.3 * weighted_confidence);

        if let Some(learner) = &self.learning {
            if let Some(adjustment) = learner.adjust(symbol, modules, score) {
                let blended = learning::blend(score, adjustment, self.settings.learning_max_weight);
                tracing::debug!(symbol, before = score, after = blended, "Applied learning adjustment.");
                score = blended;
            }
        }

        let final_score = score.clamp(0.0, 100.0);
        if !final_score.is_finite() {
            return Err(ScoringError::Calculation(format!(
                "final score for {} is not finite",
                symbol
            )));
        }

        // --- 4. Position, risk and parameters ---
        let position = recommend_position(final_score, modules);
        let risk = risk_score(modules);
        let trading = trading_parameters(risk, condition, position);

        let mean_confidence = modules
            .as_array()
            .iter()
            .map(|m| m.confidence.clamp(0.0, 1.0))
            .sum::<f64>()
            / 3.0;
        let market_present = if market.is_some() { 1.0 } else { 0.0 };
        let data_quality = 0.8 * mean_confidence + 0.2 * market_present;

        // --- 5. Narrative, from history before this score is recorded ---
        let history = self.history.recent(symbol);
        let narrative = build_narrative(&NarrativeInput {
            modules,
            weights,
            final_score,
            condition,
            patterns: &patterns,
            risk_score: risk,
            data_quality,
            history: &history,
            trend_window: self.trend_window,
        });

        let result = FinalScore {
            symbol: symbol.to_string(),
            final_score,
            position,
            confidence: weighted_confidence.clamp(0.0, 1.0),
            contributions,
            pattern_coefficient: coefficient,
            market_condition: condition,
            patterns,
            risk_score: risk,
            trading,
            insights: narrative.insights,
            warnings: narrative.warnings,
            opportunities: narrative.opportunities,
            timestamp: Utc::now(),
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            data_quality,
        };

        self.history.record(symbol, ScoreRecord::from(&result));
        if let Some(learner) = &self.learning {
            learner.observe(&result);
        }

        tracing::info!(
            symbol,
            final_score = result.final_score,
            position = %result.position,
            condition = %result.market_condition,
            coefficient,
            "Final score calculated."
        );
        Ok(result)
    }
}

fn validate_inputs(
    symbol: &str,
    modules: &ModuleSet,
    market: Option<&MarketData>,
) -> Result<(), ScoringError> {
    let invalid = |reason: String| ScoringError::InvalidInput {
        symbol: symbol.to_string(),
        reason,
    };

    for kind in ModuleKind::ALL {
        let module = modules.get(kind);
        if module.module != kind {
            return Err(ScoringError::ModuleMismatch {
                expected: kind.to_string(),
                found: module.module.to_string(),
            });
        }
        let fields = [
            ("score", module.score),
            ("confidence", module.confidence),
            ("win_rate_long", module.win_rate_long),
            ("win_rate_short", module.win_rate_short),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{} {} is {}", kind, name, value)));
        }
    }

    if let Some(market) = market {
        let fields = [
            market.volatility_index,
            market.trend_strength,
            market.price,
            market.ema_9,
            market.ema_21,
            market.ema_50,
            market.ema_200,
            market.volume_ratio,
            market.support_level,
            market.resistance_level,
        ];
        if fields.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid("market data contains a non-finite value".to_string()));
        }
    }
    Ok(())
}
