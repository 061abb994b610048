use crate::responses::LiquidationData;
use core_types::{Endpoint, EndpointPattern, EndpointScore};

const ONE_MILLION: f64 = 1_000_000.0;

/// Buckets total liquidated USD into one of five score tiers.
pub fn liquidation_tier(total_usd: f64) -> f64 {
    if total_usd > 100.0 * ONE_MILLION {
        85.0
    } else if total_usd > 50.0 * ONE_MILLION {
        70.0
    } else if total_usd > 10.0 * ONE_MILLION {
        55.0
    } else if total_usd > ONE_MILLION {
        50.0
    } else {
        45.0
    }
}

pub fn score_liquidations(endpoint: Endpoint, data: &LiquidationData) -> EndpointScore {
    if data.long_liquidations.is_none() && data.short_liquidations.is_none() {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Liquidations: no long or short totals",
        );
    }
    let longs = data.long_liquidations.unwrap_or(0.0).max(0.0);
    let shorts = data.short_liquidations.unwrap_or(0.0).max(0.0);
    let total = longs + shorts;

    let score = liquidation_tier(total);
    let mut patterns = Vec::new();
    if total > 50.0 * ONE_MILLION {
        patterns.push(EndpointPattern::MassiveLiquidations);
    }
    let skew = if longs > 2.0 * shorts && longs > 0.0 {
        patterns.push(EndpointPattern::LongLiquidationCascade);
        "longs flushed"
    } else if shorts > 2.0 * longs && shorts > 0.0 {
        patterns.push(EndpointPattern::ShortSqueeze);
        "shorts squeezed"
    } else {
        "balanced"
    };

    let confidence = if total > 10.0 * ONE_MILLION { 0.7 } else { 0.55 };

    EndpointScore::new(
        endpoint,
        score,
        confidence,
        patterns,
        format!(
            "Liquidations: ${:.1}M total (longs ${:.1}M, shorts ${:.1}M), {}",
            total / ONE_MILLION,
            longs / ONE_MILLION,
            shorts / ONE_MILLION,
            skew
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(longs: f64, shorts: f64) -> LiquidationData {
        LiquidationData {
            long_liquidations: Some(longs),
            short_liquidations: Some(shorts),
        }
    }

    #[test]
    fn tiers_follow_total_usd() {
        assert_eq!(liquidation_tier(150e6), 85.0);
        assert_eq!(liquidation_tier(60e6), 70.0);
        assert_eq!(liquidation_tier(20e6), 55.0);
        assert_eq!(liquidation_tier(2e6), 50.0);
        assert_eq!(liquidation_tier(500_000.0), 45.0);
    }

    #[test]
    fn long_heavy_flush_is_tagged() {
        let s = score_liquidations(Endpoint::LiquidationDataV2, &data(90e6, 20e6));
        assert_eq!(s.score, 85.0);
        assert!(s.patterns.contains(&EndpointPattern::LongLiquidationCascade));
        assert!(s.patterns.contains(&EndpointPattern::MassiveLiquidations));
    }

    #[test]
    fn short_heavy_flush_is_a_squeeze() {
        let s = score_liquidations(Endpoint::TotalLiquidationData, &data(1e6, 5e6));
        assert_eq!(s.score, 50.0);
        assert_eq!(s.patterns, vec![EndpointPattern::ShortSqueeze]);
    }

    #[test]
    fn missing_totals_are_neutral() {
        let s = score_liquidations(Endpoint::LiquidationDataV2, &LiquidationData::default());
        assert_eq!(s.score, 50.0);
        assert!(s.confidence <= 0.3);
    }
}
