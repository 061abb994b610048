use core_types::{MarketCondition, MarketData, ModuleSet};

/// Derives the market regime from volatility, trend strength and module confidence.
///
/// Checks run in priority order; the first match wins.
pub fn classify_market_condition(
    market: &MarketData,
    modules: &ModuleSet,
    uncertain_confidence_threshold: f64,
) -> MarketCondition {
    let volatility = market.volatility();
    let trend = market.trend();

    if volatility > 0.8 {
        MarketCondition::ExtremeVolatility
    } else if volatility > 0.6 {
        MarketCondition::HighVolatility
    } else if volatility < 0.3 {
        MarketCondition::LowVolatility
    } else if trend > 0.7 {
        MarketCondition::TrendingStrong
    } else if trend < 0.3 {
        MarketCondition::Ranging
    } else if modules.mean_confidence() < uncertain_confidence_threshold {
        MarketCondition::Uncertain
    } else {
        MarketCondition::Normal
    }
}
