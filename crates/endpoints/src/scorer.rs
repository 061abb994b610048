use crate::context::{score_coin_info, score_dominance, score_ticker_list};
use crate::liquidation::score_liquidations;
use crate::momentum::{score_ohlcv, score_rapid_movements, score_ticker};
use crate::positioning::score_ls_ratio;
use crate::responses::EndpointResponse;
use crate::screener::{score_screener_analysis, score_screener_trades};
use crate::trend::score_trend;
use crate::volume::{score_buy_sell, score_large_trades};
use core_types::{Endpoint, EndpointScore};
use serde_json::Value;

/// Scores one raw endpoint payload.
///
/// Never fails: a payload that cannot be decoded is scored neutral with low
/// confidence so that it still counts toward coverage.
pub fn score_endpoint(endpoint: Endpoint, payload: &Value) -> EndpointScore {
    match EndpointResponse::decode(endpoint, payload) {
        Ok(response) => score_response(endpoint, &response),
        Err(e) => {
            tracing::debug!(%endpoint, error = %e, "Payload could not be decoded; scoring neutral.");
            EndpointScore::neutral(endpoint, format!("{endpoint}: {e}"))
        }
    }
}

/// Scores an already decoded response.
pub fn score_response(endpoint: Endpoint, response: &EndpointResponse) -> EndpointScore {
    let score = match response {
        EndpointResponse::AiScreener(trades) => score_screener_trades(endpoint, trades),
        EndpointResponse::AiScreenerAnalysis(data) => score_screener_analysis(endpoint, data),
        EndpointResponse::Ticker(data) => score_ticker(endpoint, data),
        EndpointResponse::Trend(data) => score_trend(endpoint, data),
        EndpointResponse::LsRatio(data) => score_ls_ratio(endpoint, data),
        EndpointResponse::BuySellVolume(data) => {
            let label = match endpoint {
                Endpoint::Xtrades => "Exchange trades",
                _ => "Buy/sell volume",
            };
            score_buy_sell(endpoint, data.buy_volume, data.sell_volume, label)
        }
        EndpointResponse::VolumeFlow(data) => {
            score_buy_sell(endpoint, data.inflow, data.outflow, "Volume flow")
        }
        EndpointResponse::Liquidations(data) => score_liquidations(endpoint, data),
        EndpointResponse::LargeTrades(trades) => score_large_trades(endpoint, trades),
        EndpointResponse::RapidMovements(moves) => score_rapid_movements(endpoint, moves),
        EndpointResponse::Ohlcv(candles) => score_ohlcv(endpoint, candles),
        EndpointResponse::TickerList(entries) => score_ticker_list(endpoint, entries),
        EndpointResponse::CoinInfo(data) => score_coin_info(endpoint, data),
        EndpointResponse::Dominance(data) => score_dominance(endpoint, data),
    };
    tracing::debug!(
        %endpoint,
        score = score.score,
        confidence = score.confidence,
        "Endpoint scored."
    );
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::EndpointPattern;
    use serde_json::json;

    #[test]
    fn malformed_payload_scores_neutral_and_successful() {
        let s = score_endpoint(Endpoint::TrendIndicatorV3, &json!("not an object"));
        assert!(s.success);
        assert_eq!(s.score, 50.0);
        assert!(s.confidence <= 0.3);
        assert!(s.patterns.is_empty());
    }

    #[test]
    fn every_endpoint_tolerates_an_empty_object() {
        for endpoint in Endpoint::ALL {
            let s = score_endpoint(endpoint, &json!({}));
            assert!(s.success, "{endpoint}");
            assert!((45.0..=55.0).contains(&s.score), "{endpoint}: {}", s.score);
            assert!(s.confidence <= 0.3, "{endpoint}: {}", s.confidence);
        }
    }

    #[test]
    fn volume_flow_uses_inflow_share() {
        let s = score_endpoint(Endpoint::VolumeFlow, &json!({"inflow": 20, "outflow": 80}));
        assert_eq!(s.score, 35.0);
        assert_eq!(s.patterns, vec![EndpointPattern::StrongSellingPressure]);
    }

    #[test]
    fn trend_payload_in_envelope() {
        let payload = json!({
            "success": "true",
            "data": [{"trend_score": "72", "buy_pressure": 65, "sell_pressure": 35}]
        });
        let s = score_endpoint(Endpoint::TrendIndicatorV3, &payload);
        assert_eq!(s.score, 70.0);
        assert_eq!(
            s.patterns,
            vec![EndpointPattern::Uptrend, EndpointPattern::BuyPressureDominant]
        );
    }
}
