use configuration::{PATTERN_COEFFICIENT_CEILING, PATTERN_COEFFICIENT_FLOOR};
use core_types::{MarketData, ModuleKind, ModuleSet, PatternType};

/// Win-rate gap that counts as a divergence between long and short outcomes.
const DIVERGENCE_GAP: f64 = 15.0;
/// Module score range that signals a regime turn.
const REVERSAL_SPREAD: f64 = 40.0;

/// The fixed multiplicative coefficient for each pattern.
pub fn coefficient(pattern: PatternType) -> f64 {
    match pattern {
        PatternType::GoldenCross => 1.15,
        PatternType::DeathCross => 0.85,
        PatternType::SupportBounce => 1.10,
        PatternType::ResistanceRejection => 0.90,
        PatternType::LiquidationCluster => 1.20,
        PatternType::BullishDivergence => 1.12,
        PatternType::BearishDivergence => 0.88,
        PatternType::VolumeSpike => 1.05,
        PatternType::BreakoutConfirmed => 1.18,
        PatternType::FalseBreakout => 0.75,
        PatternType::TrendContinuation => 1.08,
        PatternType::TrendReversal => 0.80,
    }
}

/// Multiplies the coefficients of all detected patterns and clamps the product.
///
/// The configured `min`/`max` are themselves held inside `[0.5, 1.5]`; a NaN
/// limit falls back to the hard bound.
pub fn pattern_coefficient(patterns: &[PatternType], min: f64, max: f64) -> f64 {
    let min = min
        .max(PATTERN_COEFFICIENT_FLOOR)
        .min(PATTERN_COEFFICIENT_CEILING);
    let max = max.min(PATTERN_COEFFICIENT_CEILING).max(min);
    patterns
        .iter()
        .map(|p| coefficient(*p))
        .product::<f64>()
        .clamp(min, max)
}

fn any_module_has(modules: &ModuleSet, factor: &str) -> bool {
    modules.as_array().iter().any(|m| m.has_factor(factor))
}

/// Runs every pattern check against the three modules and the market context.
///
/// Returned patterns are in `PatternType::ALL` order.
pub fn detect_patterns(modules: &ModuleSet, market: &MarketData) -> Vec<PatternType> {
    let scores = modules.as_array().map(|m| m.score);
    let mean_long = modules.as_array().iter().map(|m| m.win_rate_long).sum::<f64>() / 3.0;
    let mean_short = modules.as_array().iter().map(|m| m.win_rate_short).sum::<f64>() / 3.0;
    let volume_ratio = market.volume_ratio.unwrap_or(1.0);

    let emas = (market.ema_9, market.ema_21, market.ema_50, market.ema_200);
    let golden = matches!(emas, (Some(e9), Some(e21), Some(e50), Some(e200)) if e9 > e21 && e50 > e200);
    let death = matches!(emas, (Some(e9), Some(e21), Some(e50), Some(e200)) if e9 < e21 && e50 < e200);

    let above_resistance = matches!(
        (market.price, market.resistance_level),
        (Some(price), Some(resistance)) if price > resistance
    );

    let all_bullish = scores.iter().all(|s| *s > 50.0);
    let all_bearish = scores.iter().all(|s| *s < 50.0);
    let spread = scores.iter().cloned().fold(f64::MIN, f64::max)
        - scores.iter().cloned().fold(f64::MAX, f64::min);

    let detected: Vec<PatternType> = PatternType::ALL
        .into_iter()
        .filter(|pattern| match pattern {
            PatternType::GoldenCross => golden,
            PatternType::DeathCross => death,
            PatternType::SupportBounce => any_module_has(modules, "support_bounce"),
            PatternType::ResistanceRejection => any_module_has(modules, "resistance_rejection"),
            PatternType::LiquidationCluster => {
                modules.get(ModuleKind::KingFisher).has_factor("liquidation_cluster")
            }
            PatternType::BullishDivergence => mean_long - mean_short > DIVERGENCE_GAP,
            PatternType::BearishDivergence => mean_short - mean_long > DIVERGENCE_GAP,
            PatternType::VolumeSpike => volume_ratio > 2.0,
            PatternType::BreakoutConfirmed => above_resistance && volume_ratio > 1.5,
            PatternType::FalseBreakout => {
                any_module_has(modules, "false_breakout")
                    || (above_resistance && volume_ratio < 0.8)
            }
            PatternType::TrendContinuation => {
                market.trend() > 0.7 && (all_bullish || all_bearish)
            }
            PatternType::TrendReversal => {
                any_module_has(modules, "trend_reversal") || spread > REVERSAL_SPREAD
            }
        })
        .collect();

    if !detected.is_empty() {
        tracing::debug!(?detected, "Patterns detected.");
    }
    detected
}
