use crate::endpoint::{Endpoint, EndpointPattern};
use crate::enums::{
    Direction, MarketCondition, ModuleKind, PatternType, PositionRecommendation, RiskLevel,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One endpoint's contribution to a module score.
///
/// Produced and consumed within a single analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointScore {
    pub endpoint: Endpoint,
    /// 0-100.
    pub score: f64,
    /// 0-1.
    pub confidence: f64,
    pub patterns: Vec<EndpointPattern>,
    pub analysis: String,
    pub success: bool,
    pub error: Option<String>,
}

impl EndpointScore {
    pub fn new(
        endpoint: Endpoint,
        score: f64,
        confidence: f64,
        patterns: Vec<EndpointPattern>,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            score,
            confidence,
            patterns,
            analysis: analysis.into(),
            success: true,
            error: None,
        }
    }

    /// A fetch or transport failure. Excluded from calibration.
    pub fn failed(endpoint: Endpoint, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            endpoint,
            score: 0.0,
            confidence: 0.0,
            patterns: Vec::new(),
            analysis: format!("{} request failed", endpoint),
            success: false,
            error: Some(error),
        }
    }

    /// A response that arrived but could not be interpreted.
    pub fn neutral(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        Self::new(endpoint, 50.0, 0.2, Vec::new(), reason)
    }
}

/// The calibrated output of one module's endpoint set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedScore {
    pub symbol: String,
    pub score: f64,
    pub confidence: f64,
    pub direction: Direction,
    pub summary: String,
    /// Redistributed weighted mean before the coverage penalty and curve.
    pub base_score: f64,
    pub successful_endpoints: usize,
    pub total_endpoints: usize,
    pub endpoint_scores: Vec<EndpointScore>,
}

/// One module's opinion on a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleScore {
    pub module: ModuleKind,
    pub score: f64,
    pub confidence: f64,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    pub win_rate_long: f64,
    pub win_rate_short: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub key_factors: BTreeSet<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub report: String,
}

fn default_timeframe() -> String {
    "24h".to_string()
}

impl ModuleScore {
    /// Builds a module opinion from a calibrated endpoint aggregate.
    ///
    /// The calibrated score is read as the long-side win rate when the aggregate
    /// leans long and as the short-side win rate when it leans short; the other
    /// side gets the complement.
    pub fn from_calibrated(module: ModuleKind, calibrated: &CalibratedScore) -> Self {
        let score = calibrated.score;
        let (win_rate_long, win_rate_short) = match calibrated.direction {
            Direction::Long => (score, 100.0 - score),
            Direction::Short => (100.0 - score, score),
            Direction::Neutral => (score.min(55.0), (100.0 - score).min(55.0)),
        };

        let extremity = (score - 50.0).abs();
        let risk_level = if calibrated.confidence < 0.3 {
            RiskLevel::Extreme
        } else if calibrated.confidence < 0.5 || extremity > 35.0 {
            RiskLevel::High
        } else if extremity > 15.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let key_factors = calibrated
            .endpoint_scores
            .iter()
            .filter(|s| s.success)
            .flat_map(|s| s.patterns.iter().map(|p| p.name().to_string()))
            .collect();

        Self {
            module,
            score,
            confidence: calibrated.confidence,
            timeframe: default_timeframe(),
            win_rate_long,
            win_rate_short,
            risk_level,
            key_factors,
            timestamp: Utc::now(),
            report: calibrated.summary.clone(),
        }
    }

    pub fn has_factor(&self, factor: &str) -> bool {
        self.key_factors.contains(factor)
    }
}

/// The three module opinions consumed by the master agent, one per module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSet {
    pub cryptometer: ModuleScore,
    pub riskmetric: ModuleScore,
    pub kingfisher: ModuleScore,
}

impl ModuleSet {
    pub fn new(cryptometer: ModuleScore, riskmetric: ModuleScore, kingfisher: ModuleScore) -> Self {
        Self {
            cryptometer,
            riskmetric,
            kingfisher,
        }
    }

    pub fn get(&self, module: ModuleKind) -> &ModuleScore {
        match module {
            ModuleKind::Cryptometer => &self.cryptometer,
            ModuleKind::RiskMetric => &self.riskmetric,
            ModuleKind::KingFisher => &self.kingfisher,
        }
    }

    /// Modules in `ModuleKind::ALL` order.
    pub fn as_array(&self) -> [&ModuleScore; 3] {
        [&self.cryptometer, &self.riskmetric, &self.kingfisher]
    }

    pub fn mean_confidence(&self) -> f64 {
        self.as_array().iter().map(|m| m.confidence).sum::<f64>() / 3.0
    }
}

/// Optional market context supplied alongside the three module scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketData {
    pub volatility_index: Option<f64>,
    pub trend_strength: Option<f64>,
    pub price: Option<f64>,
    pub ema_9: Option<f64>,
    pub ema_21: Option<f64>,
    pub ema_50: Option<f64>,
    pub ema_200: Option<f64>,
    /// Current volume relative to its recent average.
    pub volume_ratio: Option<f64>,
    pub support_level: Option<f64>,
    pub resistance_level: Option<f64>,
}

impl MarketData {
    pub fn volatility(&self) -> f64 {
        self.volatility_index.unwrap_or(0.5)
    }

    pub fn trend(&self) -> f64 {
        self.trend_strength.unwrap_or(0.5)
    }
}

/// How one module fed into the final blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleContribution {
    pub module: ModuleKind,
    pub weight: f64,
    pub raw_score: f64,
    /// `weight * raw_score`.
    pub contribution: f64,
}

/// Position sizing and exit levels looked up for a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingParameters {
    pub position_size: String,
    pub position_fraction: Decimal,
    pub stop_loss_pct: Decimal,
    pub take_profit_pct: Vec<Decimal>,
}

/// The blended output of the master scoring agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub symbol: String,
    pub final_score: f64,
    pub position: PositionRecommendation,
    pub confidence: f64,
    pub contributions: Vec<ModuleContribution>,
    pub pattern_coefficient: f64,
    pub market_condition: MarketCondition,
    pub patterns: Vec<PatternType>,
    pub risk_score: f64,
    pub trading: TradingParameters,
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
    pub opportunities: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: f64,
    pub data_quality: f64,
}

impl FinalScore {
    pub fn weight_of(&self, module: ModuleKind) -> Option<f64> {
        self.contributions
            .iter()
            .find(|c| c.module == module)
            .map(|c| c.weight)
    }
}

/// A rolling-history entry kept per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub symbol: String,
    pub final_score: f64,
    pub position: PositionRecommendation,
    pub timestamp: DateTime<Utc>,
}

impl From<&FinalScore> for ScoreRecord {
    fn from(score: &FinalScore) -> Self {
        Self {
            symbol: score.symbol.clone(),
            final_score: score.final_score,
            position: score.position,
            timestamp: score.timestamp,
        }
    }
}
