use anyhow::{Context, Result};
use api_client::{CryptometerClient, EndpointAnalyzer, EndpointProvider, FixtureProvider};
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, Overrides, load_config};
use core_types::{CalibratedScore, FinalScore, MarketData, ModuleKind, ModuleSet};
use scoring::MasterScoringAgent;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the ZmartBot scoring CLI.
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key can come from the real environment.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the tracing subscriber")?;

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_overrides(&cli.overrides);

    match cli.command {
        Commands::Calibrate(args) => handle_calibrate(args, &config).await,
        Commands::Score(args) => handle_score(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Calibrated crypto trading scores from provider endpoints and module blends.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every provider endpoint for a symbol and calibrate the result.
    Calibrate(CalibrateArgs),
    /// Blend three module scores into a final score and position.
    Score(ScoreArgs),
}

#[derive(Parser)]
struct CalibrateArgs {
    /// The symbol to analyze (e.g., "BTC").
    #[arg(long)]
    symbol: String,

    /// Read endpoint payloads from this JSON file instead of the live provider.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// The module the calibrated score is reported as.
    #[arg(long, default_value = "cryptometer")]
    module: ModuleKind,

    /// Print a Markdown report instead of a table.
    #[arg(long)]
    report: bool,

    /// Print the module score as JSON.
    #[arg(long, conflicts_with = "report")]
    json: bool,
}

#[derive(Parser)]
struct ScoreArgs {
    /// JSON file holding the symbol, three module scores and optional market data.
    #[arg(long)]
    input: PathBuf,

    /// Print a Markdown report instead of a table.
    #[arg(long)]
    report: bool,

    /// Print the final score as JSON.
    #[arg(long, conflicts_with = "report")]
    json: bool,
}

/// The document accepted by `zmart score`.
#[derive(Debug, Deserialize)]
struct ScoreInput {
    symbol: String,
    modules: ModuleSet,
    #[serde(default)]
    market: Option<MarketData>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_calibrate(args: CalibrateArgs, config: &Config) -> Result<()> {
    let provider: Arc<dyn EndpointProvider> = match &args.fixture {
        Some(path) => Arc::new(
            FixtureProvider::from_file(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?,
        ),
        None => Arc::new(CryptometerClient::new(&config.provider)?),
    };
    let analyzer = EndpointAnalyzer::from_config(provider, config)?;

    let calibrated = analyzer.analyze(&args.symbol).await;
    if args.report {
        println!("{}", reporting::render_calibration_report(&calibrated));
    } else if args.json {
        let module = core_types::ModuleScore::from_calibrated(args.module, &calibrated);
        println!("{}", serde_json::to_string_pretty(&module)?);
    } else {
        println!("{}", calibration_table(&calibrated));
    }
    Ok(())
}

fn handle_score(args: ScoreArgs, config: &Config) -> Result<()> {
    let input = read_score_input(&args.input)?;
    let agent = MasterScoringAgent::from_config(config);

    let result = agent.calculate_final_score(&input.symbol, &input.modules, input.market.as_ref())?;
    if args.report {
        println!("{}", reporting::render_final_report(&result));
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", final_table(&result));
    }
    Ok(())
}

fn read_score_input(path: &Path) -> Result<ScoreInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid score input in {}", path.display()))
}

fn calibration_table(calibrated: &CalibratedScore) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Endpoint", "Status", "Score", "Confidence"]);
    for e in &calibrated.endpoint_scores {
        let status = if e.success { "ok" } else { "failed" };
        table.add_row(vec![
            e.endpoint.to_string(),
            status.to_string(),
            format!("{:.1}", e.score),
            format!("{:.2}", e.confidence),
        ]);
    }
    table.add_row(vec![
        "calibrated".to_string(),
        calibrated.direction.to_string(),
        format!("{:.1}", calibrated.score),
        format!("{:.2}", calibrated.confidence),
    ]);
    table
}

fn final_table(result: &FinalScore) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Symbol".to_string(), result.symbol.clone()]);
    table.add_row(vec!["Final score".to_string(), format!("{:.1}", result.final_score)]);
    table.add_row(vec!["Position".to_string(), result.position.to_string()]);
    table.add_row(vec!["Confidence".to_string(), format!("{:.2}", result.confidence)]);
    table.add_row(vec!["Condition".to_string(), result.market_condition.to_string()]);
    table.add_row(vec![
        "Pattern coefficient".to_string(),
        format!("{:.3}", result.pattern_coefficient),
    ]);
    table.add_row(vec!["Risk score".to_string(), format!("{:.0}", result.risk_score)]);
    table.add_row(vec!["Position size".to_string(), result.trading.position_size.clone()]);
    table.add_row(vec![
        "Stop-loss".to_string(),
        format!("{}%", result.trading.stop_loss_pct),
    ]);
    for c in &result.contributions {
        table.add_row(vec![
            format!("{} weight", c.module),
            format!("{:.3} x {:.1} = {:.2}", c.weight, c.raw_score, c.contribution),
        ]);
    }
    table
}
