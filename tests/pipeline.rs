use api_client::{EndpointAnalyzer, FixtureProvider};
use configuration::Config;
use core_types::{Endpoint, MarketData, ModuleKind, ModuleSet};
use scoring::{HistoryStore, MasterScoringAgent};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn quiet_config() -> Config {
    let mut config = Config::default();
    config.provider.request_delay_ms = 0;
    config
}

#[tokio::test]
async fn fixture_endpoints_calibrate_with_full_coverage() {
    let config = quiet_config();
    let provider = FixtureProvider::from_file(&fixture("btc_endpoints.json")).unwrap();
    assert_eq!(provider.len(), Endpoint::ALL.len());

    let analyzer = EndpointAnalyzer::from_config(Arc::new(provider), &config).unwrap();
    let calibrated = analyzer.analyze("BTC").await;

    assert_eq!(calibrated.successful_endpoints, Endpoint::ALL.len());
    assert_eq!(calibrated.total_endpoints, Endpoint::ALL.len());
    assert!((0.0..=100.0).contains(&calibrated.score));
    assert!(calibrated.score > 50.0, "bullish fixture scored {}", calibrated.score);
    assert!(calibrated.confidence > 0.5);
}

#[tokio::test]
async fn fixture_to_final_score() {
    let config = quiet_config();
    let provider = Arc::new(FixtureProvider::from_file(&fixture("btc_endpoints.json")).unwrap());
    let analyzer = EndpointAnalyzer::from_config(provider, &config).unwrap();

    let cryptometer = analyzer.analyze_module(ModuleKind::Cryptometer, "BTC").await;
    let riskmetric = analyzer.analyze_module(ModuleKind::RiskMetric, "BTC").await;
    let kingfisher = analyzer.analyze_module(ModuleKind::KingFisher, "BTC").await;
    let modules = ModuleSet::new(cryptometer, riskmetric, kingfisher);

    let agent = MasterScoringAgent::from_config(&config);
    let result = agent
        .calculate_final_score("BTC", &modules, None)
        .unwrap();

    assert!((0.0..=100.0).contains(&result.final_score));
    assert!((0.5..=1.5).contains(&result.pattern_coefficient));
    assert!((0.0..=100.0).contains(&result.risk_score));
    let weights: f64 = result.contributions.iter().map(|c| c.weight).sum();
    assert!((weights - 1.0).abs() < 1e-9);
    assert_eq!(agent.history().recent("BTC").len(), 1);

    let report = reporting::render_final_report(&result);
    assert!(report.starts_with("# BTC Final Score"));
}

#[derive(Deserialize)]
struct ScoreInput {
    symbol: String,
    modules: ModuleSet,
    market: Option<MarketData>,
}

#[test]
fn module_input_fixture_scores_long() {
    let text = std::fs::read_to_string(fixture("btc_modules.json")).unwrap();
    let input: ScoreInput = serde_json::from_str(&text).unwrap();

    let agent = MasterScoringAgent::from_config(&Config::default());
    let result = agent
        .calculate_final_score(&input.symbol, &input.modules, input.market.as_ref())
        .unwrap();

    assert!(result.patterns.contains(&core_types::PatternType::GoldenCross));
    assert!(result.patterns.contains(&core_types::PatternType::LiquidationCluster));
    assert!(result.final_score > 55.0, "scored {}", result.final_score);
    assert!(result.data_quality > 0.7);
}
