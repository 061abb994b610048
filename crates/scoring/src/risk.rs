use core_types::{ModuleSet, PositionRecommendation};

/// Folds the module risk levels into a 0-100 score, weighted toward the worst module.
pub fn risk_score(modules: &ModuleSet) -> f64 {
    let buckets = modules.as_array().map(|m| m.risk_level.bucket());
    let max = buckets.iter().cloned().fold(0.0, f64::max);
    let mean = buckets.iter().sum::<f64>() / buckets.len() as f64;
    (max * 0.6 + mean * 0.4).clamp(0.0, 100.0)
}

/// Maps the final score and the averaged module win rates to a discrete position.
pub fn recommend_position(final_score: f64, modules: &ModuleSet) -> PositionRecommendation {
    let long_win = modules.as_array().iter().map(|m| m.win_rate_long).sum::<f64>() / 3.0;
    let short_win = modules.as_array().iter().map(|m| m.win_rate_short).sum::<f64>() / 3.0;

    if final_score >= 70.0 && long_win > 65.0 {
        PositionRecommendation::StrongLong
    } else if final_score >= 55.0 && long_win > 55.0 {
        PositionRecommendation::Long
    } else if final_score <= 30.0 && short_win > 65.0 {
        PositionRecommendation::StrongShort
    } else if final_score <= 45.0 && short_win > 55.0 {
        PositionRecommendation::Short
    } else {
        PositionRecommendation::Neutral
    }
}
