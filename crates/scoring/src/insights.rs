use core_types::{MarketCondition, ModuleKind, ModuleSet, PatternType, ScoreRecord};

/// Everything the narrative text is phrased from.
pub struct NarrativeInput<'a> {
    pub modules: &'a ModuleSet,
    pub weights: [f64; 3],
    pub final_score: f64,
    pub condition: MarketCondition,
    pub patterns: &'a [PatternType],
    pub risk_score: f64,
    pub data_quality: f64,
    /// Prior records for the symbol, oldest first, excluding the current score.
    pub history: &'a [ScoreRecord],
    pub trend_window: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Narrative {
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
    pub opportunities: Vec<String>,
}

fn is_bullish(pattern: PatternType) -> bool {
    crate::patterns::coefficient(pattern) > 1.0
}

pub fn build_narrative(input: &NarrativeInput<'_>) -> Narrative {
    let mut narrative = Narrative::default();
    let scores = input.modules.as_array().map(|m| m.score);

    // Dominant module by weighted contribution.
    let (dominant, contribution) = ModuleKind::ALL
        .into_iter()
        .map(|k| (k, input.weights[k.index()] * scores[k.index()]))
        .fold((ModuleKind::Cryptometer, f64::MIN), |best, cur| {
            if cur.1 > best.1 { cur } else { best }
        });
    narrative.insights.push(format!(
        "{} leads the blend with a weighted contribution of {:.1}",
        dominant, contribution
    ));

    narrative.insights.push(format!(
        "Market condition is {} (weights {:.2}/{:.2}/{:.2})",
        input.condition, input.weights[0], input.weights[1], input.weights[2]
    ));

    if !input.patterns.is_empty() {
        let names: Vec<&str> = input.patterns.iter().map(|p| p.label()).collect();
        narrative
            .insights
            .push(format!("Detected patterns: {}", names.join(", ")));
    }

    let window = input.trend_window.max(1);
    let tail = &input.history[input.history.len().saturating_sub(window)..];
    if !tail.is_empty() {
        let previous = tail.iter().map(|r| r.final_score).sum::<f64>() / tail.len() as f64;
        let delta = input.final_score - previous;
        let trend = if delta > 5.0 {
            "improving"
        } else if delta < -5.0 {
            "deteriorating"
        } else {
            "stable"
        };
        narrative.insights.push(format!(
            "Score trend is {} ({:+.1} vs. the last {} readings)",
            trend,
            delta,
            tail.len()
        ));
    }

    // --- Warnings ---
    if input.risk_score >= 70.0 {
        narrative
            .warnings
            .push(format!("Elevated risk score of {:.0}", input.risk_score));
    }
    if input.data_quality < 0.5 {
        narrative.warnings.push(format!(
            "Low data quality ({:.2}); treat the score with caution",
            input.data_quality
        ));
    }
    let spread = scores.iter().cloned().fold(f64::MIN, f64::max)
        - scores.iter().cloned().fold(f64::MAX, f64::min);
    if spread > 30.0 {
        narrative.warnings.push(format!(
            "Modules disagree by {:.0} points",
            spread
        ));
    }
    match input.condition {
        MarketCondition::ExtremeVolatility | MarketCondition::HighVolatility => narrative
            .warnings
            .push("Volatile market; widen stops and reduce size".to_string()),
        MarketCondition::Uncertain => narrative
            .warnings
            .push("Module confidence is low across the board".to_string()),
        _ => {}
    }

    // --- Opportunities ---
    for pattern in input.patterns.iter().filter(|p| is_bullish(**p)) {
        narrative
            .opportunities
            .push(format!("{} supports the setup", pattern.label()));
    }
    if input.condition == MarketCondition::TrendingStrong {
        narrative
            .opportunities
            .push("Strong trend favours continuation entries".to_string());
    }
    if input.final_score >= 70.0 || input.final_score <= 30.0 {
        narrative.opportunities.push(format!(
            "Decisive score of {:.1} with {:.0} risk",
            input.final_score, input.risk_score
        ));
    }

    narrative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{module, module_set};
    use chrono::Utc;
    use core_types::PositionRecommendation;

    fn input<'a>(
        modules: &'a ModuleSet,
        patterns: &'a [PatternType],
        history: &'a [ScoreRecord],
    ) -> NarrativeInput<'a> {
        NarrativeInput {
            modules,
            weights: [0.35, 0.35, 0.30],
            final_score: 60.0,
            condition: MarketCondition::Normal,
            patterns,
            risk_score: 50.0,
            data_quality: 0.8,
            history,
            trend_window: 5,
        }
    }

    fn record(score: f64) -> ScoreRecord {
        ScoreRecord {
            symbol: "BTC".to_string(),
            final_score: score,
            position: PositionRecommendation::Neutral,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn calm_inputs_have_no_warnings() {
        let modules = module_set(60.0, 0.8);
        let narrative = build_narrative(&input(&modules, &[], &[]));
        assert!(narrative.warnings.is_empty());
        assert!(narrative.opportunities.is_empty());
        assert_eq!(narrative.insights.len(), 2);
    }

    #[test]
    fn disagreement_and_quality_raise_warnings() {
        let modules = ModuleSet::new(
            module(ModuleKind::Cryptometer, 85.0, 0.2),
            module(ModuleKind::RiskMetric, 40.0, 0.2),
            module(ModuleKind::KingFisher, 50.0, 0.2),
        );
        let mut inp = input(&modules, &[], &[]);
        inp.data_quality = 0.3;
        let narrative = build_narrative(&inp);
        assert_eq!(narrative.warnings.len(), 2);
        assert!(narrative.insights[0].starts_with("cryptometer"));
    }

    #[test]
    fn history_trend_uses_the_window() {
        let modules = module_set(60.0, 0.8);
        let history: Vec<ScoreRecord> = [10.0, 10.0, 40.0, 40.0, 40.0, 40.0, 40.0]
            .into_iter()
            .map(record)
            .collect();
        let narrative = build_narrative(&input(&modules, &[], &history));
        let trend = narrative.insights.last().unwrap();
        assert!(trend.contains("improving"), "{trend}");
        assert!(trend.contains("+20.0"), "{trend}");
    }

    #[test]
    fn bullish_patterns_become_opportunities() {
        let modules = module_set(60.0, 0.8);
        let patterns = [PatternType::GoldenCross, PatternType::DeathCross];
        let narrative = build_narrative(&input(&modules, &patterns, &[]));
        assert_eq!(narrative.opportunities.len(), 1);
        assert!(narrative.opportunities[0].contains(PatternType::GoldenCross.label()));
    }
}
