use chrono::Utc;
use core_types::{ModuleKind, ModuleScore, ModuleSet, RiskLevel};
use std::collections::BTreeSet;

/// A module opinion with even win rates, medium risk and no key factors.
pub fn module(kind: ModuleKind, score: f64, confidence: f64) -> ModuleScore {
    ModuleScore {
        module: kind,
        score,
        confidence,
        timeframe: "24h".to_string(),
        win_rate_long: 50.0,
        win_rate_short: 50.0,
        risk_level: RiskLevel::Medium,
        key_factors: BTreeSet::new(),
        timestamp: Utc::now(),
        report: String::new(),
    }
}

pub fn module_set(score: f64, confidence: f64) -> ModuleSet {
    ModuleSet::new(
        module(ModuleKind::Cryptometer, score, confidence),
        module(ModuleKind::RiskMetric, score, confidence),
        module(ModuleKind::KingFisher, score, confidence),
    )
}
