use configuration::MasterSettings;
use core_types::{MarketCondition, ModuleSet};

/// Blends the condition's base weight row with confidence-proportional weights.
///
/// Returns weights in `ModuleKind::ALL` order, normalized to sum to 1.0. When
/// total confidence is zero (or not positive) the base row is used alone.
pub fn calculate_dynamic_weights(
    settings: &MasterSettings,
    condition: MarketCondition,
    modules: &ModuleSet,
) -> [f64; 3] {
    let base = settings.weights.row(condition).as_array();
    let confidences = modules.as_array().map(|m| m.confidence.max(0.0));
    let total_confidence: f64 = confidences.iter().sum();

    let share = settings.condition_weight_share;
    let mut weights = if total_confidence > 0.0 {
        std::array::from_fn(|i| share * base[i] + (1.0 - share) * confidences[i] / total_confidence)
    } else {
        base
    };

    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        for w in weights.iter_mut() {
            *w /= sum;
        }
    } else {
        weights = [1.0 / 3.0; 3];
    }

    tracing::debug!(?condition, ?weights, "Dynamic module weights.");
    weights
}
