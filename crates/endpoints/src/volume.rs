use crate::responses::LargeTrade;
use core_types::{Endpoint, EndpointPattern, EndpointScore};

/// Minimum trade count before whale tags are attached.
const WHALE_MIN_TRADES: usize = 5;

/// Maps a buy share in `[0, 1]` to a score and a pressure tag.
pub fn classify_buy_ratio(ratio: f64) -> (f64, EndpointPattern) {
    if ratio > 0.7 {
        (75.0, EndpointPattern::StrongBuyingPressure)
    } else if ratio > 0.6 {
        (65.0, EndpointPattern::BuyingPressure)
    } else if ratio < 0.3 {
        (35.0, EndpointPattern::StrongSellingPressure)
    } else if ratio < 0.4 {
        (45.0, EndpointPattern::SellingPressure)
    } else {
        (55.0, EndpointPattern::BalancedVolume)
    }
}

/// Scores a buy/sell split. Used for merged volume, exchange trades and flows.
pub fn score_buy_sell(
    endpoint: Endpoint,
    buy: Option<f64>,
    sell: Option<f64>,
    label: &str,
) -> EndpointScore {
    let (Some(buy), Some(sell)) = (buy, sell) else {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            format!("{label}: buy/sell fields missing"),
        );
    };
    let total = buy + sell;
    if total <= 0.0 {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            format!("{label}: no volume recorded"),
        );
    }

    let ratio = buy / total;
    let (score, pattern) = classify_buy_ratio(ratio);
    // Lopsided flows are more informative than balanced ones.
    let confidence = 0.6 + (ratio - 0.5).abs().min(0.3);

    tracing::debug!(%endpoint, ratio, score, "Scored buy/sell split.");
    EndpointScore::new(
        endpoint,
        score,
        confidence,
        vec![pattern],
        format!(
            "{label}: buy share {:.1}% of {:.0} total ({})",
            ratio * 100.0,
            total,
            pattern
        ),
    )
}

/// Scores block trades by the buy share of their notional value.
pub fn score_large_trades(endpoint: Endpoint, trades: &[LargeTrade]) -> EndpointScore {
    let mut buy_value = 0.0;
    let mut sell_value = 0.0;
    let mut counted = 0usize;

    for trade in trades {
        let (Some(side), Some(value)) = (trade.side.as_deref(), trade.value_usd) else {
            continue;
        };
        match side.to_ascii_lowercase().as_str() {
            "buy" | "long" | "bid" => buy_value += value,
            "sell" | "short" | "ask" => sell_value += value,
            _ => continue,
        }
        counted += 1;
    }

    if counted == 0 {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Large trades: no classifiable trades",
        );
    }

    let mut score = score_buy_sell(endpoint, Some(buy_value), Some(sell_value), "Large trades");
    let share = buy_value / (buy_value + sell_value).max(f64::MIN_POSITIVE);
    if counted >= WHALE_MIN_TRADES {
        if share > 0.65 {
            score.patterns.push(EndpointPattern::WhaleAccumulation);
        } else if share < 0.35 {
            score.patterns.push(EndpointPattern::WhaleDistribution);
        }
    } else {
        // Thin samples say little about positioning.
        score.confidence = score.confidence.min(0.5);
    }
    score.analysis = format!("{} across {} trades", score.analysis, counted);
    score
}
