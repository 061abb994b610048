use crate::error::ConfigError;
use core_types::MarketCondition;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    CalibrationSettings, Config, HistorySettings, MasterSettings, ModuleWeights, Overrides,
    ProviderSettings, WeightTable,
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Hard bounds on the pattern coefficient. Configured limits must lie inside.
pub const PATTERN_COEFFICIENT_FLOOR: f64 = 0.5;
pub const PATTERN_COEFFICIENT_CEILING: f64 = 1.5;

/// Loads the application configuration.
///
/// Reads the optional TOML file at `path` (defaults to `config.toml`), then
/// layers `ZMART__SECTION__KEY` environment variables on top. Missing values
/// fall back to the built-in defaults. The result is validated before return.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.toml"));

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ZMART")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// Checks the invariants the scoring crates rely on.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let cal = &config.calibration;
    let master = &config.master;
    require_finite("calibration.coverage_penalty_points", cal.coverage_penalty_points)?;
    require_finite("calibration.compression_threshold", cal.compression_threshold)?;
    require_finite("calibration.compression_factor", cal.compression_factor)?;
    require_finite("master.condition_weight_share", master.condition_weight_share)?;
    require_finite(
        "master.uncertain_confidence_threshold",
        master.uncertain_confidence_threshold,
    )?;
    require_finite("master.pattern_coefficient_min", master.pattern_coefficient_min)?;
    require_finite("master.pattern_coefficient_max", master.pattern_coefficient_max)?;
    require_finite("master.learning_max_weight", master.learning_max_weight)?;

    if cal.coverage_penalty_points < 0.0 {
        return Err(ConfigError::ValidationError(
            "calibration.coverage_penalty_points must not be negative".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&cal.compression_threshold) {
        return Err(ConfigError::ValidationError(
            "calibration.compression_threshold must be within 0..=100".to_string(),
        ));
    }
    if cal.compression_factor <= 0.0 || cal.compression_factor > 1.0 {
        return Err(ConfigError::ValidationError(
            "calibration.compression_factor must be within (0, 1]".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&master.condition_weight_share) {
        return Err(ConfigError::ValidationError(
            "master.condition_weight_share must be within 0..=1".to_string(),
        ));
    }
    if master.pattern_coefficient_min < PATTERN_COEFFICIENT_FLOOR
        || master.pattern_coefficient_max > PATTERN_COEFFICIENT_CEILING
        || master.pattern_coefficient_min > master.pattern_coefficient_max
    {
        return Err(ConfigError::ValidationError(format!(
            "master.pattern_coefficient_min/max must satisfy {} <= min <= max <= {}",
            PATTERN_COEFFICIENT_FLOOR, PATTERN_COEFFICIENT_CEILING
        )));
    }
    if !(0.0..=1.0).contains(&master.learning_max_weight) {
        return Err(ConfigError::ValidationError(
            "master.learning_max_weight must be within 0..=1".to_string(),
        ));
    }
    for condition in MarketCondition::ALL {
        let row = master.weights.row(condition);
        if row.as_array().iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "master.weights.{} contains a non-finite weight",
                condition
            )));
        }
        if row.as_array().iter().any(|w| *w < 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "master.weights.{} contains a negative weight",
                condition
            )));
        }
        if (row.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::ValidationError(format!(
                "master.weights.{} must sum to 1.0 (got {})",
                condition,
                row.sum()
            )));
        }
    }

    if config.history.capacity == 0 {
        return Err(ConfigError::ValidationError(
            "history.capacity must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn require_finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be a finite number (got {})",
            key, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        validate(&Config::default()).unwrap();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.calibration.coverage_penalty_points, 20.0);
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.master.weights.normal.cryptometer, 0.35);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[calibration]\ncompression_factor = 0.25\n\n[provider]\nrequest_delay_ms = 0\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.calibration.compression_factor, 0.25);
        assert_eq!(config.calibration.compression_threshold, 70.0);
        assert_eq!(config.provider.request_delay_ms, 0);
        assert_eq!(config.provider.exchange, "binance");
    }

    #[test]
    fn weight_rows_must_sum_to_one() {
        let mut config = Config::default();
        config.master.weights.ranging = ModuleWeights::new(0.5, 0.5, 0.5);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("ranging"));
    }

    #[test]
    fn compression_factor_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.calibration.compression_factor = 0.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn pattern_coefficient_bounds_stay_within_half_and_one_and_a_half() {
        let mut config = Config::default();
        config.master.pattern_coefficient_max = 3.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("pattern_coefficient"));

        let mut config = Config::default();
        config.master.pattern_coefficient_min = 0.2;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.master.pattern_coefficient_min = 1.2;
        config.master.pattern_coefficient_max = 1.1;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.master.pattern_coefficient_min = 0.8;
        config.master.pattern_coefficient_max = 1.2;
        validate(&config).unwrap();
    }

    #[test]
    fn non_finite_settings_are_rejected() {
        let mut config = Config::default();
        config.master.pattern_coefficient_min = f64::NAN;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("finite"));

        let mut config = Config::default();
        config.calibration.coverage_penalty_points = f64::NAN;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.calibration.compression_factor = f64::NAN;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.master.learning_max_weight = f64::INFINITY;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.master.weights.normal = ModuleWeights::new(f64::NAN, 0.5, 0.5);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn overrides_replace_provider_fields() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides {
            base_url: Some("http://localhost:9000".to_string()),
            request_delay_ms: Some(5),
        });
        assert_eq!(config.provider.base_url, "http://localhost:9000");
        assert_eq!(config.provider.request_delay_ms, 5);
    }
}
