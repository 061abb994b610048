use crate::responses::LsRatioData;
use core_types::{Endpoint, EndpointPattern, EndpointScore};

/// Scores long/short positioning with contrarian logic.
///
/// Crowded positioning on either side is treated as a reversal setup and gets
/// the same high score; the attached tag carries the direction.
pub fn score_ls_ratio(endpoint: Endpoint, data: &LsRatioData) -> EndpointScore {
    // Either percentage implies the other.
    let long_pct = data.long_pct.or_else(|| data.short_pct.map(|s| 100.0 - s));
    let short_pct = data.short_pct.or_else(|| long_pct.map(|l| 100.0 - l));

    let ratio = data.ratio.or_else(|| match (long_pct, short_pct) {
        (Some(long), Some(short)) if short > 0.0 => Some(long / short),
        // No shorts at all.
        (Some(long), Some(_)) if long > 0.0 => Some(f64::INFINITY),
        _ => None,
    });
    let Some(ratio) = ratio.filter(|r| *r >= 0.0) else {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Long/short: ratio unavailable",
        );
    };

    let long_pct = long_pct.unwrap_or(if ratio.is_finite() {
        ratio / (1.0 + ratio) * 100.0
    } else {
        100.0
    });
    let short_pct = short_pct.unwrap_or(100.0 - long_pct);

    let (score, confidence, pattern, note) = if ratio > 3.0 || long_pct > 75.0 {
        (75.0, 0.7, EndpointPattern::ExtremeLongCrowding, "crowded longs, reversal risk")
    } else if ratio < 0.33 || short_pct > 75.0 {
        (75.0, 0.7, EndpointPattern::ExtremeShortCrowding, "crowded shorts, squeeze setup")
    } else if ratio > 1.5 {
        (58.0, 0.5, EndpointPattern::LongBias, "longs lead")
    } else if ratio < 0.67 {
        (42.0, 0.5, EndpointPattern::ShortBias, "shorts lead")
    } else {
        (50.0, 0.4, EndpointPattern::BalancedPositioning, "balanced")
    };

    EndpointScore::new(
        endpoint,
        score,
        confidence,
        vec![pattern],
        format!(
            "Long/short: ratio {:.2} ({:.0}% long / {:.0}% short), {}",
            ratio, long_pct, short_pct, note
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(r: f64) -> LsRatioData {
        LsRatioData {
            ratio: Some(r),
            ..Default::default()
        }
    }

    #[test]
    fn extreme_positioning_is_a_reversal_opportunity() {
        let longs = score_ls_ratio(Endpoint::LsRatio, &ratio(3.5));
        assert_eq!(longs.score, 75.0);
        assert_eq!(longs.patterns, vec![EndpointPattern::ExtremeLongCrowding]);

        let shorts = score_ls_ratio(Endpoint::LsRatio, &ratio(0.25));
        assert_eq!(shorts.score, 75.0);
        assert_eq!(shorts.patterns, vec![EndpointPattern::ExtremeShortCrowding]);
    }

    #[test]
    fn one_side_above_seventy_five_percent_is_extreme() {
        let data = LsRatioData {
            ratio: None,
            long_pct: Some(22.0),
            short_pct: Some(78.0),
        };
        let s = score_ls_ratio(Endpoint::LsRatio, &data);
        assert_eq!(s.score, 75.0);
        assert_eq!(s.patterns, vec![EndpointPattern::ExtremeShortCrowding]);
    }

    #[test]
    fn one_sided_percentages_are_extreme() {
        let all_long = LsRatioData {
            ratio: None,
            long_pct: Some(100.0),
            short_pct: Some(0.0),
        };
        let s = score_ls_ratio(Endpoint::LsRatio, &all_long);
        assert_eq!(s.score, 75.0);
        assert_eq!(s.patterns, vec![EndpointPattern::ExtremeLongCrowding]);

        let long_only = LsRatioData {
            long_pct: Some(80.0),
            ..Default::default()
        };
        let s = score_ls_ratio(Endpoint::LsRatio, &long_only);
        assert_eq!(s.score, 75.0);
        assert_eq!(s.patterns, vec![EndpointPattern::ExtremeLongCrowding]);

        let short_only = LsRatioData {
            short_pct: Some(90.0),
            ..Default::default()
        };
        let s = score_ls_ratio(Endpoint::LsRatio, &short_only);
        assert_eq!(s.patterns, vec![EndpointPattern::ExtremeShortCrowding]);
    }

    #[test]
    fn moderate_positioning_leans_with_the_ratio() {
        assert_eq!(score_ls_ratio(Endpoint::LsRatio, &ratio(2.0)).score, 58.0);
        assert_eq!(score_ls_ratio(Endpoint::LsRatio, &ratio(0.5)).score, 42.0);
        assert_eq!(score_ls_ratio(Endpoint::LsRatio, &ratio(1.0)).score, 50.0);
    }

    #[test]
    fn missing_ratio_is_neutral() {
        let s = score_ls_ratio(Endpoint::LsRatio, &LsRatioData::default());
        assert_eq!(s.score, 50.0);
        assert!(s.patterns.is_empty());
    }
}
