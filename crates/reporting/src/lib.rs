//! # Reports
//!
//! Markdown renderings of a final score and of a single module calibration.
//! Plain template interpolation; nothing here computes a number.

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{ContentArrangement, Table};
use core_types::{CalibratedScore, FinalScore};
use std::fmt;

/// Display adapter for a `FinalScore` report.
pub struct FinalReport<'a>(pub &'a FinalScore);

/// Display adapter for a `CalibratedScore` report.
pub struct CalibrationReport<'a>(pub &'a CalibratedScore);

pub fn render_final_report(score: &FinalScore) -> String {
    tracing::debug!(symbol = %score.symbol, "Rendering final score report.");
    FinalReport(score).to_string()
}

pub fn render_calibration_report(score: &CalibratedScore) -> String {
    tracing::debug!(symbol = %score.symbol, "Rendering calibration report.");
    CalibrationReport(score).to_string()
}

fn markdown_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header.to_vec());
    table
}

fn bullet_section(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "## {}", title)?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {}", item)?;
    }
    writeln!(f)
}

impl fmt::Display for FinalReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "# {} Final Score", s.symbol)?;
        writeln!(f)?;
        writeln!(f, "- **Score:** {:.1} / 100", s.final_score)?;
        writeln!(f, "- **Position:** {}", s.position)?;
        writeln!(f, "- **Confidence:** {:.0}%", s.confidence * 100.0)?;
        writeln!(f, "- **Market condition:** {}", s.market_condition)?;
        writeln!(f, "- **Pattern coefficient:** {:.3}", s.pattern_coefficient)?;
        writeln!(f, "- **Risk score:** {:.0}", s.risk_score)?;
        writeln!(f, "- **Data quality:** {:.2}", s.data_quality)?;
        writeln!(f)?;

        writeln!(f, "## Module Contributions")?;
        writeln!(f)?;
        let mut table = markdown_table(&["Module", "Weight", "Score", "Contribution"]);
        for c in &s.contributions {
            table.add_row(vec![
                c.module.to_string(),
                format!("{:.3}", c.weight),
                format!("{:.1}", c.raw_score),
                format!("{:.2}", c.contribution),
            ]);
        }
        writeln!(f, "{}", table)?;
        writeln!(f)?;

        if !s.patterns.is_empty() {
            let names: Vec<&str> = s.patterns.iter().map(|p| p.label()).collect();
            writeln!(f, "**Patterns:** {}", names.join(", "))?;
            writeln!(f)?;
        }

        writeln!(f, "## Trading Parameters")?;
        writeln!(f)?;
        writeln!(f, "- Position size: {}", s.trading.position_size)?;
        writeln!(f, "- Stop-loss: {}%", s.trading.stop_loss_pct)?;
        if s.trading.take_profit_pct.is_empty() {
            writeln!(f, "- Take-profit: none")?;
        } else {
            let ladder: Vec<String> = s
                .trading
                .take_profit_pct
                .iter()
                .map(|tp| format!("{}%", tp))
                .collect();
            writeln!(f, "- Take-profit: {}", ladder.join(" / "))?;
        }
        writeln!(f)?;

        bullet_section(f, "Insights", &s.insights)?;
        bullet_section(f, "Warnings", &s.warnings)?;
        bullet_section(f, "Opportunities", &s.opportunities)?;

        write!(
            f,
            "_Generated {} in {:.2} ms_",
            s.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            s.processing_time_ms
        )
    }
}

impl fmt::Display for CalibrationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "# {} Endpoint Calibration", s.symbol)?;
        writeln!(f)?;
        writeln!(f, "- **Calibrated score:** {:.1}", s.score)?;
        writeln!(f, "- **Base score:** {:.1}", s.base_score)?;
        writeln!(f, "- **Direction:** {}", s.direction)?;
        writeln!(f, "- **Confidence:** {:.2}", s.confidence)?;
        writeln!(
            f,
            "- **Coverage:** {}/{} endpoints",
            s.successful_endpoints, s.total_endpoints
        )?;
        writeln!(f)?;
        writeln!(f, "{}", s.summary)?;
        writeln!(f)?;

        if s.endpoint_scores.is_empty() {
            return Ok(());
        }

        let mut table = markdown_table(&["Endpoint", "Score", "Confidence", "Patterns", "Notes"]);
        for e in &s.endpoint_scores {
            let (score, confidence, notes) = if e.success {
                (
                    format!("{:.1}", e.score),
                    format!("{:.2}", e.confidence),
                    e.analysis.clone(),
                )
            } else {
                (
                    "-".to_string(),
                    "-".to_string(),
                    format!("failed: {}", e.error.as_deref().unwrap_or("unknown error")),
                )
            };
            let patterns: Vec<&str> = e.patterns.iter().map(|p| p.name()).collect();
            table.add_row(vec![
                e.endpoint.to_string(),
                score,
                confidence,
                patterns.join(", "),
                notes,
            ]);
        }
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::{
        Direction, Endpoint, EndpointPattern, EndpointScore, MarketCondition, ModuleContribution,
        ModuleKind, PatternType, PositionRecommendation, TradingParameters,
    };
    use rust_decimal_macros::dec;

    fn final_score() -> FinalScore {
        FinalScore {
            symbol: "BTC".to_string(),
            final_score: 72.4,
            position: PositionRecommendation::StrongLong,
            confidence: 0.81,
            contributions: ModuleKind::ALL
                .into_iter()
                .map(|module| ModuleContribution {
                    module,
                    weight: 1.0 / 3.0,
                    raw_score: 70.0,
                    contribution: 70.0 / 3.0,
                })
                .collect(),
            pattern_coefficient: 1.15,
            market_condition: MarketCondition::TrendingStrong,
            patterns: vec![PatternType::GoldenCross],
            risk_score: 40.0,
            trading: TradingParameters {
                position_size: "2-3%".to_string(),
                position_fraction: dec!(0.03),
                stop_loss_pct: dec!(4),
                take_profit_pct: vec![dec!(5), dec!(10), dec!(15)],
            },
            insights: vec!["cryptometer leads the blend".to_string()],
            warnings: Vec::new(),
            opportunities: vec!["golden_cross supports the setup".to_string()],
            timestamp: Utc::now(),
            processing_time_ms: 0.42,
            data_quality: 0.85,
        }
    }

    #[test]
    fn final_report_has_headline_and_sections() {
        let report = render_final_report(&final_score());
        assert!(report.starts_with("# BTC Final Score"));
        assert!(report.contains("**Position:** STRONG_LONG"));
        assert!(report.contains("| kingfisher"));
        assert!(report.contains("Take-profit: 5% / 10% / 15%"));
        assert!(report.contains("## Opportunities"));
        assert!(!report.contains("## Warnings"));
    }

    #[test]
    fn calibration_report_marks_failures() {
        let calibrated = CalibratedScore {
            symbol: "ETH".to_string(),
            score: 61.0,
            confidence: 0.6,
            direction: Direction::Long,
            summary: "ETH: 61.0% LONG".to_string(),
            base_score: 64.0,
            successful_endpoints: 1,
            total_endpoints: 2,
            endpoint_scores: vec![
                EndpointScore::new(
                    Endpoint::Ticker,
                    64.0,
                    0.6,
                    vec![EndpointPattern::BullishMomentum],
                    "up 4%",
                ),
                EndpointScore::failed(Endpoint::Ohlcv, "HTTP 503"),
            ],
        };
        let report = render_calibration_report(&calibrated);
        assert!(report.contains("1/2 endpoints"));
        assert!(report.contains("failed: HTTP 503"));
        assert!(report.contains("bullish_momentum"));
    }
}
