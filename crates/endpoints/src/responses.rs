use crate::error::EndpointError;
use crate::lenient::{opt_bool, opt_f64};
use core_types::Endpoint;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// Provider fields are optional and leniently typed. A record that decodes but
// lacks the fields its scorer needs is scored neutral, not rejected.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenerTrade {
    #[serde(default, alias = "side")]
    pub direction: Option<String>,
    #[serde(default, alias = "pnl", deserialize_with = "opt_f64")]
    pub pnl_pct: Option<f64>,
    #[serde(default, alias = "win", deserialize_with = "opt_bool")]
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenerAnalysis {
    #[serde(default, deserialize_with = "opt_f64")]
    pub win_rate: Option<f64>,
    #[serde(default, alias = "trades", deserialize_with = "opt_f64")]
    pub total_trades: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub avg_pnl: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerData {
    #[serde(default, alias = "last", alias = "price", deserialize_with = "opt_f64")]
    pub last_price: Option<f64>,
    #[serde(
        default,
        alias = "change_24h_pct",
        alias = "price_change_percent",
        deserialize_with = "opt_f64"
    )]
    pub change_24h: Option<f64>,
    #[serde(default, alias = "volume", deserialize_with = "opt_f64")]
    pub volume_24h: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendData {
    #[serde(default, alias = "trend", deserialize_with = "opt_f64")]
    pub trend_score: Option<f64>,
    #[serde(default, alias = "buy", deserialize_with = "opt_f64")]
    pub buy_pressure: Option<f64>,
    #[serde(default, alias = "sell", deserialize_with = "opt_f64")]
    pub sell_pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LsRatioData {
    #[serde(default, alias = "ls_ratio", deserialize_with = "opt_f64")]
    pub ratio: Option<f64>,
    #[serde(default, alias = "long", deserialize_with = "opt_f64")]
    pub long_pct: Option<f64>,
    #[serde(default, alias = "short", deserialize_with = "opt_f64")]
    pub short_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuySellVolume {
    #[serde(default, alias = "buy", deserialize_with = "opt_f64")]
    pub buy_volume: Option<f64>,
    #[serde(default, alias = "sell", deserialize_with = "opt_f64")]
    pub sell_volume: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowData {
    #[serde(default, alias = "in", deserialize_with = "opt_f64")]
    pub inflow: Option<f64>,
    #[serde(default, alias = "out", deserialize_with = "opt_f64")]
    pub outflow: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiquidationData {
    #[serde(
        default,
        alias = "longs",
        alias = "long_usd",
        deserialize_with = "opt_f64"
    )]
    pub long_liquidations: Option<f64>,
    #[serde(
        default,
        alias = "shorts",
        alias = "short_usd",
        deserialize_with = "opt_f64"
    )]
    pub short_liquidations: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LargeTrade {
    #[serde(default, alias = "direction")]
    pub side: Option<String>,
    #[serde(default, alias = "value", alias = "usd", deserialize_with = "opt_f64")]
    pub value_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RapidMovement {
    #[serde(default, alias = "change", alias = "pct", deserialize_with = "opt_f64")]
    pub change_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candle {
    #[serde(default, alias = "o", deserialize_with = "opt_f64")]
    pub open: Option<f64>,
    #[serde(default, alias = "h", deserialize_with = "opt_f64")]
    pub high: Option<f64>,
    #[serde(default, alias = "l", deserialize_with = "opt_f64")]
    pub low: Option<f64>,
    #[serde(default, alias = "c", deserialize_with = "opt_f64")]
    pub close: Option<f64>,
    #[serde(default, alias = "v", deserialize_with = "opt_f64")]
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerEntry {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(
        default,
        alias = "change_24h_pct",
        alias = "price_change_percent",
        deserialize_with = "opt_f64"
    )]
    pub change_24h: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinInfoData {
    #[serde(default, alias = "marketcap", deserialize_with = "opt_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, alias = "volume", deserialize_with = "opt_f64")]
    pub volume_24h: Option<f64>,
    #[serde(default, alias = "market_cap_rank", deserialize_with = "opt_f64")]
    pub rank: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DominanceData {
    #[serde(default, alias = "btc_dominance", deserialize_with = "opt_f64")]
    pub dominance: Option<f64>,
    #[serde(default, alias = "change", deserialize_with = "opt_f64")]
    pub change_24h: Option<f64>,
}

/// A decoded provider response. One variant per response shape.
#[derive(Debug, Clone)]
pub enum EndpointResponse {
    AiScreener(Vec<ScreenerTrade>),
    AiScreenerAnalysis(ScreenerAnalysis),
    Ticker(TickerData),
    Trend(TrendData),
    LsRatio(LsRatioData),
    BuySellVolume(BuySellVolume),
    VolumeFlow(FlowData),
    Liquidations(LiquidationData),
    LargeTrades(Vec<LargeTrade>),
    RapidMovements(Vec<RapidMovement>),
    Ohlcv(Vec<Candle>),
    TickerList(Vec<TickerEntry>),
    CoinInfo(CoinInfoData),
    Dominance(DominanceData),
}

impl EndpointResponse {
    /// Decodes a raw payload into the shape the endpoint is known to return.
    ///
    /// A top-level `{"data": ...}` envelope is unwrapped first. Object-shaped
    /// endpoints also accept a single-element list.
    pub fn decode(endpoint: Endpoint, payload: &Value) -> Result<Self, EndpointError> {
        let body = unwrap_envelope(payload);
        let response = match endpoint {
            Endpoint::AiScreener => Self::AiScreener(list(endpoint, body)?),
            Endpoint::AiScreenerAnalysis => Self::AiScreenerAnalysis(object(endpoint, body)?),
            Endpoint::Ticker => Self::Ticker(object(endpoint, body)?),
            Endpoint::TrendIndicatorV3 => Self::Trend(object(endpoint, body)?),
            Endpoint::LsRatio => Self::LsRatio(object(endpoint, body)?),
            Endpoint::MergedBuySellVolume | Endpoint::Xtrades => {
                Self::BuySellVolume(object(endpoint, body)?)
            }
            Endpoint::VolumeFlow => Self::VolumeFlow(object(endpoint, body)?),
            Endpoint::LiquidationDataV2 | Endpoint::TotalLiquidationData => {
                Self::Liquidations(object(endpoint, body)?)
            }
            Endpoint::LargeTradesActivity => Self::LargeTrades(list(endpoint, body)?),
            Endpoint::RapidMovements => Self::RapidMovements(list(endpoint, body)?),
            Endpoint::Ohlcv => Self::Ohlcv(list(endpoint, body)?),
            Endpoint::Tickerlist => Self::TickerList(list(endpoint, body)?),
            Endpoint::CryptocurrencyInfo | Endpoint::CoinInfo => {
                Self::CoinInfo(object(endpoint, body)?)
            }
            Endpoint::BitcoinDominance => Self::Dominance(object(endpoint, body)?),
        };
        Ok(response)
    }
}

fn unwrap_envelope(payload: &Value) -> &Value {
    match payload {
        Value::Object(map) => map.get("data").unwrap_or(payload),
        _ => payload,
    }
}

fn object<T: DeserializeOwned>(endpoint: Endpoint, body: &Value) -> Result<T, EndpointError> {
    let body = match body {
        Value::Array(items) if items.is_empty() => {
            return Err(EndpointError::EmptyPayload(endpoint.to_string()));
        }
        Value::Array(items) => &items[0],
        Value::Null => return Err(EndpointError::EmptyPayload(endpoint.to_string())),
        other => other,
    };
    T::deserialize(body).map_err(|source| EndpointError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn list<T: DeserializeOwned>(endpoint: Endpoint, body: &Value) -> Result<Vec<T>, EndpointError> {
    match body {
        Value::Null => Err(EndpointError::EmptyPayload(endpoint.to_string())),
        Value::Array(_) => Vec::<T>::deserialize(body).map_err(|source| EndpointError::Decode {
            endpoint: endpoint.to_string(),
            source,
        }),
        single => Ok(vec![object(endpoint, single)?]),
    }
}
