use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three upstream scoring sources blended by the master agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Cryptometer,
    RiskMetric,
    KingFisher,
}

impl ModuleKind {
    /// Fixed iteration order. Weight rows are laid out in this order.
    pub const ALL: [ModuleKind; 3] = [
        ModuleKind::Cryptometer,
        ModuleKind::RiskMetric,
        ModuleKind::KingFisher,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Cryptometer => "cryptometer",
            ModuleKind::RiskMetric => "riskmetric",
            ModuleKind::KingFisher => "kingfisher",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ModuleKind::Cryptometer => 0,
            ModuleKind::RiskMetric => 1,
            ModuleKind::KingFisher => 2,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModuleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cryptometer" => Ok(ModuleKind::Cryptometer),
            "riskmetric" | "risk_metric" => Ok(ModuleKind::RiskMetric),
            "kingfisher" | "king_fisher" => Ok(ModuleKind::KingFisher),
            other => Err(CoreError::UnknownModule(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    /// The numeric bucket used when folding module risk into a 0-100 risk score.
    pub fn bucket(&self) -> f64 {
        match self {
            RiskLevel::Low => 25.0,
            RiskLevel::Medium => 50.0,
            RiskLevel::High => 75.0,
            RiskLevel::Extreme => 90.0,
        }
    }
}

/// Directional lean of a calibrated module score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
    Neutral,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
            Direction::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of the market a detected endpoint pattern argues for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Bullish,
    Bearish,
    Neutral,
}

/// One of the seven volatility/trend regimes used to pick a base weight row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    ExtremeVolatility,
    HighVolatility,
    LowVolatility,
    TrendingStrong,
    Ranging,
    Uncertain,
    Normal,
}

impl MarketCondition {
    pub const ALL: [MarketCondition; 7] = [
        MarketCondition::ExtremeVolatility,
        MarketCondition::HighVolatility,
        MarketCondition::LowVolatility,
        MarketCondition::TrendingStrong,
        MarketCondition::Ranging,
        MarketCondition::Uncertain,
        MarketCondition::Normal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MarketCondition::ExtremeVolatility => "extreme_volatility",
            MarketCondition::HighVolatility => "high_volatility",
            MarketCondition::LowVolatility => "low_volatility",
            MarketCondition::TrendingStrong => "trending_strong",
            MarketCondition::Ranging => "ranging",
            MarketCondition::Uncertain => "uncertain",
            MarketCondition::Normal => "normal",
        }
    }
}

impl fmt::Display for MarketCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cross-module technical/historical patterns detected by the master agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    GoldenCross,
    DeathCross,
    SupportBounce,
    ResistanceRejection,
    LiquidationCluster,
    BullishDivergence,
    BearishDivergence,
    VolumeSpike,
    BreakoutConfirmed,
    FalseBreakout,
    TrendContinuation,
    TrendReversal,
}

impl PatternType {
    pub const ALL: [PatternType; 12] = [
        PatternType::GoldenCross,
        PatternType::DeathCross,
        PatternType::SupportBounce,
        PatternType::ResistanceRejection,
        PatternType::LiquidationCluster,
        PatternType::BullishDivergence,
        PatternType::BearishDivergence,
        PatternType::VolumeSpike,
        PatternType::BreakoutConfirmed,
        PatternType::FalseBreakout,
        PatternType::TrendContinuation,
        PatternType::TrendReversal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PatternType::GoldenCross => "golden_cross",
            PatternType::DeathCross => "death_cross",
            PatternType::SupportBounce => "support_bounce",
            PatternType::ResistanceRejection => "resistance_rejection",
            PatternType::LiquidationCluster => "liquidation_cluster",
            PatternType::BullishDivergence => "bullish_divergence",
            PatternType::BearishDivergence => "bearish_divergence",
            PatternType::VolumeSpike => "volume_spike",
            PatternType::BreakoutConfirmed => "breakout_confirmed",
            PatternType::FalseBreakout => "false_breakout",
            PatternType::TrendContinuation => "trend_continuation",
            PatternType::TrendReversal => "trend_reversal",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionRecommendation {
    StrongLong,
    Long,
    Neutral,
    Short,
    StrongShort,
}

impl PositionRecommendation {
    pub fn label(&self) -> &'static str {
        match self {
            PositionRecommendation::StrongLong => "STRONG_LONG",
            PositionRecommendation::Long => "LONG",
            PositionRecommendation::Neutral => "NEUTRAL",
            PositionRecommendation::Short => "SHORT",
            PositionRecommendation::StrongShort => "STRONG_SHORT",
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(
            self,
            PositionRecommendation::StrongLong | PositionRecommendation::StrongShort
        )
    }
}

impl fmt::Display for PositionRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_kind_parses_loose_names() {
        assert_eq!("RiskMetric".parse::<ModuleKind>().unwrap(), ModuleKind::RiskMetric);
        assert_eq!("king_fisher".parse::<ModuleKind>().unwrap(), ModuleKind::KingFisher);
        assert!("sentiment".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn module_indices_follow_all_order() {
        for (i, module) in ModuleKind::ALL.iter().enumerate() {
            assert_eq!(module.index(), i);
        }
    }

    #[test]
    fn position_serializes_screaming_snake() {
        let json = serde_json::to_string(&PositionRecommendation::StrongShort).unwrap();
        assert_eq!(json, "\"STRONG_SHORT\"");
    }
}
