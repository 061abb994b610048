use core_types::{FinalScore, ModuleSet};

/// A correction proposed by an external learning system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningAdjustment {
    /// The score the learner believes is right, 0-100.
    pub corrected_score: f64,
    /// How much of the correction to blend in, 0-1. The agent caps this.
    pub weight: f64,
}

/// An optional collaborator that learns from past outcomes.
///
/// Returning `None` leaves the score untouched.
pub trait LearningSystem: Send + Sync {
    fn adjust(&self, symbol: &str, modules: &ModuleSet, score: f64) -> Option<LearningAdjustment>;

    /// Called once the final score is assembled. Default does nothing.
    fn observe(&self, _score: &FinalScore) {}
}

/// Blends `score` toward the learner's correction, with the blend weight capped at `max_weight`.
pub fn blend(score: f64, adjustment: LearningAdjustment, max_weight: f64) -> f64 {
    if !adjustment.corrected_score.is_finite() || !adjustment.weight.is_finite() {
        tracing::warn!(?adjustment, "Ignoring non-finite learning adjustment.");
        return score;
    }
    let weight = adjustment.weight.clamp(0.0, max_weight);
    score * (1.0 - weight) + adjustment.corrected_score * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_capped() {
        let adjustment = LearningAdjustment {
            corrected_score: 100.0,
            weight: 0.9,
        };
        assert!((blend(50.0, adjustment, 0.3) - 65.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_adjustment_is_ignored() {
        let adjustment = LearningAdjustment {
            corrected_score: f64::NAN,
            weight: 0.2,
        };
        assert_eq!(blend(42.0, adjustment, 0.3), 42.0);
    }
}
