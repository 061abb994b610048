use crate::responses::{ScreenerAnalysis, ScreenerTrade};
use core_types::{Endpoint, EndpointPattern, EndpointScore};

/// Scores the AI screener's recent closed trades on this symbol.
pub fn score_screener_trades(endpoint: Endpoint, trades: &[ScreenerTrade]) -> EndpointScore {
    let outcomes: Vec<bool> = trades
        .iter()
        .filter_map(|t| {
            t.success
                .or_else(|| t.pnl_pct.filter(|p| *p != 0.0).map(|p| p > 0.0))
        })
        .collect();
    if outcomes.is_empty() {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "AI screener: no closed trades",
        );
    }

    let wins = outcomes.iter().filter(|w| **w).count();
    let win_rate = wins as f64 / outcomes.len() as f64;
    let score = (30.0 + 50.0 * win_rate).clamp(0.0, 100.0);
    let confidence = (0.3 + 0.025 * outcomes.len() as f64).min(0.8);

    let mut patterns = Vec::new();
    if win_rate > 0.7 {
        patterns.push(EndpointPattern::AiHighWinRate);
    } else if win_rate < 0.4 {
        patterns.push(EndpointPattern::AiLowWinRate);
    }

    let (longs, shorts) = trades.iter().filter_map(|t| t.direction.as_deref()).fold(
        (0usize, 0usize),
        |(l, s), d| match d.to_ascii_lowercase().as_str() {
            "long" | "buy" => (l + 1, s),
            "short" | "sell" => (l, s + 1),
            _ => (l, s),
        },
    );
    if longs + shorts > 0 {
        let long_share = longs as f64 / (longs + shorts) as f64;
        if long_share > 0.65 {
            patterns.push(EndpointPattern::AiLongBias);
        } else if long_share < 0.35 {
            patterns.push(EndpointPattern::AiShortBias);
        }
    }

    EndpointScore::new(
        endpoint,
        score,
        confidence,
        patterns,
        format!(
            "AI screener: {}/{} winning trades ({:.0}%), {} long / {} short",
            wins,
            outcomes.len(),
            win_rate * 100.0,
            longs,
            shorts
        ),
    )
}

pub fn score_screener_analysis(endpoint: Endpoint, data: &ScreenerAnalysis) -> EndpointScore {
    let Some(raw) = data.win_rate else {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "AI analysis: win rate missing",
        );
    };
    // Some responses report a fraction rather than a percentage. A literal 1
    // is read as one percent.
    let win_rate = if raw < 1.0 { raw * 100.0 } else { raw };

    let (score, patterns) = if win_rate > 70.0 {
        (72.0, vec![EndpointPattern::AiHighWinRate])
    } else if win_rate > 55.0 {
        (60.0, Vec::new())
    } else if win_rate < 40.0 {
        (38.0, vec![EndpointPattern::AiLowWinRate])
    } else {
        (50.0, Vec::new())
    };
    let confidence = match data.total_trades {
        Some(n) if n >= 20.0 => 0.7,
        _ => 0.5,
    };

    EndpointScore::new(
        endpoint,
        score,
        confidence,
        patterns,
        format!(
            "AI analysis: {:.0}% win rate over {} trades",
            win_rate,
            data.total_trades.map_or("unknown".to_string(), |n| format!("{n:.0}"))
        ),
    )
}
