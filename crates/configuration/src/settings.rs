use core_types::{MarketCondition, ModuleKind};
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its `Default` so an empty or missing
/// `config.toml` still yields a complete, valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calibration: CalibrationSettings,
    pub master: MasterSettings,
    pub provider: ProviderSettings,
    pub history: HistorySettings,
}

/// Constants of the endpoint calibration curve.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Points subtracted at zero coverage, scaled by the failed fraction.
    pub coverage_penalty_points: f64,
    /// Scores above this value are compressed.
    pub compression_threshold: f64,
    /// Fraction of the excess above the threshold that is kept.
    pub compression_factor: f64,
    /// A direction needs this many more agreeing pattern tags than opposing ones.
    pub direction_margin: usize,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            coverage_penalty_points: 20.0,
            compression_threshold: 70.0,
            compression_factor: 0.5,
            direction_margin: 2,
        }
    }
}

/// One row of the condition weight table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModuleWeights {
    pub cryptometer: f64,
    pub riskmetric: f64,
    pub kingfisher: f64,
}

impl ModuleWeights {
    pub const fn new(cryptometer: f64, riskmetric: f64, kingfisher: f64) -> Self {
        Self {
            cryptometer,
            riskmetric,
            kingfisher,
        }
    }

    pub fn get(&self, module: ModuleKind) -> f64 {
        match module {
            ModuleKind::Cryptometer => self.cryptometer,
            ModuleKind::RiskMetric => self.riskmetric,
            ModuleKind::KingFisher => self.kingfisher,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.cryptometer, self.riskmetric, self.kingfisher]
    }

    pub fn sum(&self) -> f64 {
        self.cryptometer + self.riskmetric + self.kingfisher
    }
}

/// Base module weights for each market condition.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub normal: ModuleWeights,
    pub extreme_volatility: ModuleWeights,
    pub high_volatility: ModuleWeights,
    pub low_volatility: ModuleWeights,
    pub trending_strong: ModuleWeights,
    pub ranging: ModuleWeights,
    pub uncertain: ModuleWeights,
}

impl WeightTable {
    pub fn row(&self, condition: MarketCondition) -> ModuleWeights {
        match condition {
            MarketCondition::Normal => self.normal,
            MarketCondition::ExtremeVolatility => self.extreme_volatility,
            MarketCondition::HighVolatility => self.high_volatility,
            MarketCondition::LowVolatility => self.low_volatility,
            MarketCondition::TrendingStrong => self.trending_strong,
            MarketCondition::Ranging => self.ranging,
            MarketCondition::Uncertain => self.uncertain,
        }
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            normal: ModuleWeights::new(0.35, 0.35, 0.30),
            extreme_volatility: ModuleWeights::new(0.25, 0.45, 0.30),
            high_volatility: ModuleWeights::new(0.30, 0.40, 0.30),
            low_volatility: ModuleWeights::new(0.40, 0.30, 0.30),
            trending_strong: ModuleWeights::new(0.45, 0.25, 0.30),
            ranging: ModuleWeights::new(0.30, 0.30, 0.40),
            uncertain: ModuleWeights::new(0.30, 0.40, 0.30),
        }
    }
}

/// Parameters of the cross-module blend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MasterSettings {
    /// Share of each dynamic weight taken from the condition table; the rest is
    /// confidence-proportional.
    pub condition_weight_share: f64,
    /// Mean module confidence below which the market is treated as uncertain.
    pub uncertain_confidence_threshold: f64,
    pub pattern_coefficient_min: f64,
    pub pattern_coefficient_max: f64,
    /// Upper bound on the blend weight an external learning system may claim.
    pub learning_max_weight: f64,
    pub weights: WeightTable,
}

impl Default for MasterSettings {
    fn default() -> Self {
        Self {
            condition_weight_share: 0.7,
            uncertain_confidence_threshold: 0.5,
            pattern_coefficient_min: 0.5,
            pattern_coefficient_max: 1.5,
            learning_max_weight: 0.3,
            weights: WeightTable::default(),
        }
    }
}

/// Connection settings for the endpoint data provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub exchange: String,
    /// Serialized delay between consecutive endpoint requests.
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.cryptometer.io".to_string(),
            api_key: String::new(),
            exchange: "binance".to_string(),
            request_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}

/// Rolling per-symbol score history.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub capacity: usize,
    /// How many recent records feed the trend insight.
    pub trend_window: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: 100,
            trend_window: 5,
        }
    }
}

/// Command-line overrides applied on top of the loaded file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Overrides {
    /// Override the provider base URL.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub base_url: Option<String>,

    /// Override the delay between endpoint requests, in milliseconds.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub request_delay_ms: Option<u64>,
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.base_url {
            self.provider.base_url = url.clone();
        }
        if let Some(delay) = overrides.request_delay_ms {
            self.provider.request_delay_ms = delay;
        }
    }
}
