use crate::responses::TrendData;
use core_types::{Endpoint, EndpointPattern, EndpointScore};

/// Buy/sell pressure gap that nudges the banded trend score.
const PRESSURE_GAP: f64 = 20.0;
const PRESSURE_ADJUSTMENT: f64 = 5.0;

/// Maps a provider trend score (0-100) to one of five bands.
pub fn trend_band(trend_score: f64) -> (f64, EndpointPattern) {
    if trend_score >= 80.0 {
        (80.0, EndpointPattern::StrongUptrend)
    } else if trend_score >= 60.0 {
        (65.0, EndpointPattern::Uptrend)
    } else if trend_score >= 40.0 {
        (50.0, EndpointPattern::Sideways)
    } else if trend_score >= 20.0 {
        (35.0, EndpointPattern::Downtrend)
    } else {
        (20.0, EndpointPattern::StrongDowntrend)
    }
}

pub fn score_trend(endpoint: Endpoint, data: &TrendData) -> EndpointScore {
    let Some(trend_score) = data.trend_score else {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Trend: trend_score missing",
        );
    };

    let (mut score, band) = trend_band(trend_score);
    let mut patterns = vec![band];

    if let (Some(buy), Some(sell)) = (data.buy_pressure, data.sell_pressure) {
        if buy - sell > PRESSURE_GAP {
            score += PRESSURE_ADJUSTMENT;
            patterns.push(EndpointPattern::BuyPressureDominant);
        } else if sell - buy > PRESSURE_GAP {
            score -= PRESSURE_ADJUSTMENT;
            patterns.push(EndpointPattern::SellPressureDominant);
        }
    }

    let score = score.clamp(0.0, 100.0);
    EndpointScore::new(
        endpoint,
        score,
        0.75,
        patterns,
        format!("Trend: provider score {:.0} -> {} ({:.0})", trend_score, band, score),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(score: f64, buy: f64, sell: f64) -> TrendData {
        TrendData {
            trend_score: Some(score),
            buy_pressure: Some(buy),
            sell_pressure: Some(sell),
        }
    }

    #[test]
    fn bands_cover_the_range() {
        assert_eq!(trend_band(95.0).0, 80.0);
        assert_eq!(trend_band(60.0).0, 65.0);
        assert_eq!(trend_band(45.0).0, 50.0);
        assert_eq!(trend_band(20.0).0, 35.0);
        assert_eq!(trend_band(5.0).0, 20.0);
    }

    #[test]
    fn pressure_gap_adjusts_by_five() {
        let up = score_trend(Endpoint::TrendIndicatorV3, &trend(85.0, 70.0, 30.0));
        assert_eq!(up.score, 85.0);
        assert!(up.patterns.contains(&EndpointPattern::BuyPressureDominant));

        let down = score_trend(Endpoint::TrendIndicatorV3, &trend(10.0, 20.0, 60.0));
        assert_eq!(down.score, 15.0);

        let flat = score_trend(Endpoint::TrendIndicatorV3, &trend(50.0, 55.0, 45.0));
        assert_eq!(flat.score, 50.0);
        assert_eq!(flat.patterns, vec![EndpointPattern::Sideways]);
    }
}
