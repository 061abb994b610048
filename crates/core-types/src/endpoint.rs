use crate::enums::Polarity;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named data-provider endpoint whose response is scored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    AiScreener,
    AiScreenerAnalysis,
    Ticker,
    #[serde(rename = "trend_indicator_v3")]
    TrendIndicatorV3,
    LsRatio,
    MergedBuySellVolume,
    VolumeFlow,
    #[serde(rename = "liquidation_data_v2")]
    LiquidationDataV2,
    TotalLiquidationData,
    LargeTradesActivity,
    RapidMovements,
    Xtrades,
    Ohlcv,
    Tickerlist,
    CryptocurrencyInfo,
    CoinInfo,
    BitcoinDominance,
}

impl Endpoint {
    pub const ALL: [Endpoint; 17] = [
        Endpoint::AiScreener,
        Endpoint::AiScreenerAnalysis,
        Endpoint::Ticker,
        Endpoint::TrendIndicatorV3,
        Endpoint::LsRatio,
        Endpoint::MergedBuySellVolume,
        Endpoint::VolumeFlow,
        Endpoint::LiquidationDataV2,
        Endpoint::TotalLiquidationData,
        Endpoint::LargeTradesActivity,
        Endpoint::RapidMovements,
        Endpoint::Xtrades,
        Endpoint::Ohlcv,
        Endpoint::Tickerlist,
        Endpoint::CryptocurrencyInfo,
        Endpoint::CoinInfo,
        Endpoint::BitcoinDominance,
    ];

    /// The provider-side path segment for this endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::AiScreener => "ai_screener",
            Endpoint::AiScreenerAnalysis => "ai_screener_analysis",
            Endpoint::Ticker => "ticker",
            Endpoint::TrendIndicatorV3 => "trend_indicator_v3",
            Endpoint::LsRatio => "ls_ratio",
            Endpoint::MergedBuySellVolume => "merged_buy_sell_volume",
            Endpoint::VolumeFlow => "volume_flow",
            Endpoint::LiquidationDataV2 => "liquidation_data_v2",
            Endpoint::TotalLiquidationData => "total_liquidation_data",
            Endpoint::LargeTradesActivity => "large_trades_activity",
            Endpoint::RapidMovements => "rapid_movements",
            Endpoint::Xtrades => "xtrades",
            Endpoint::Ohlcv => "ohlcv",
            Endpoint::Tickerlist => "tickerlist",
            Endpoint::CryptocurrencyInfo => "cryptocurrency_info",
            Endpoint::CoinInfo => "coin_info",
            Endpoint::BitcoinDominance => "bitcoin_dominance",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| CoreError::UnknownEndpoint(s.to_string()))
    }
}

/// A closed set of tags an endpoint scorer can attach to its result.
///
/// Direction classification counts tags by `polarity()`, so every new variant
/// must be given a polarity in the table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointPattern {
    // Volume
    StrongBuyingPressure,
    BuyingPressure,
    BalancedVolume,
    SellingPressure,
    StrongSellingPressure,
    WhaleAccumulation,
    WhaleDistribution,
    VolumeRising,
    // Liquidations
    MassiveLiquidations,
    LongLiquidationCascade,
    ShortSqueeze,
    // Trend
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
    BuyPressureDominant,
    SellPressureDominant,
    // Positioning (contrarian)
    ExtremeLongCrowding,
    ExtremeShortCrowding,
    LongBias,
    ShortBias,
    BalancedPositioning,
    // Momentum
    StrongBullishMomentum,
    BullishMomentum,
    RangeBound,
    BearishMomentum,
    StrongBearishMomentum,
    RapidPump,
    RapidDump,
    // AI screener
    AiHighWinRate,
    AiLowWinRate,
    AiLongBias,
    AiShortBias,
    // Market context
    BroadMarketStrength,
    BroadMarketWeakness,
    HighLiquidity,
    BlueChip,
    BtcDominanceHigh,
    AltSeason,
}

impl EndpointPattern {
    /// The tag's directional vote, read from its market effect rather than the
    /// side named in it: `long_liquidation_cascade` and `extreme_long_crowding`
    /// are bearish, `short_squeeze` and `extreme_short_crowding` are bullish.
    pub fn polarity(&self) -> Polarity {
        use EndpointPattern::*;
        match self {
            StrongBuyingPressure | BuyingPressure | WhaleAccumulation | ShortSqueeze
            | StrongUptrend | Uptrend | BuyPressureDominant | ExtremeShortCrowding | LongBias
            | StrongBullishMomentum | BullishMomentum | RapidPump | AiLongBias
            | BroadMarketStrength | AltSeason => Polarity::Bullish,

            SellingPressure | StrongSellingPressure | WhaleDistribution
            | LongLiquidationCascade | Downtrend | StrongDowntrend | SellPressureDominant
            | ExtremeLongCrowding | ShortBias | BearishMomentum | StrongBearishMomentum
            | RapidDump | AiShortBias | BroadMarketWeakness | BtcDominanceHigh => {
                Polarity::Bearish
            }

            BalancedVolume | VolumeRising | MassiveLiquidations | Sideways
            | BalancedPositioning | RangeBound | AiHighWinRate | AiLowWinRate | HighLiquidity
            | BlueChip => Polarity::Neutral,
        }
    }

    pub fn name(&self) -> &'static str {
        use EndpointPattern::*;
        match self {
            StrongBuyingPressure => "strong_buying_pressure",
            BuyingPressure => "buying_pressure",
            BalancedVolume => "balanced_volume",
            SellingPressure => "selling_pressure",
            StrongSellingPressure => "strong_selling_pressure",
            WhaleAccumulation => "whale_accumulation",
            WhaleDistribution => "whale_distribution",
            VolumeRising => "volume_rising",
            MassiveLiquidations => "massive_liquidations",
            LongLiquidationCascade => "long_liquidation_cascade",
            ShortSqueeze => "short_squeeze",
            StrongUptrend => "strong_uptrend",
            Uptrend => "uptrend",
            Sideways => "sideways",
            Downtrend => "downtrend",
            StrongDowntrend => "strong_downtrend",
            BuyPressureDominant => "buy_pressure_dominant",
            SellPressureDominant => "sell_pressure_dominant",
            ExtremeLongCrowding => "extreme_long_crowding",
            ExtremeShortCrowding => "extreme_short_crowding",
            LongBias => "long_bias",
            ShortBias => "short_bias",
            BalancedPositioning => "balanced_positioning",
            StrongBullishMomentum => "strong_bullish_momentum",
            BullishMomentum => "bullish_momentum",
            RangeBound => "range_bound",
            BearishMomentum => "bearish_momentum",
            StrongBearishMomentum => "strong_bearish_momentum",
            RapidPump => "rapid_pump",
            RapidDump => "rapid_dump",
            AiHighWinRate => "ai_high_win_rate",
            AiLowWinRate => "ai_low_win_rate",
            AiLongBias => "ai_long_bias",
            AiShortBias => "ai_short_bias",
            BroadMarketStrength => "broad_market_strength",
            BroadMarketWeakness => "broad_market_weakness",
            HighLiquidity => "high_liquidity",
            BlueChip => "blue_chip",
            BtcDominanceHigh => "btc_dominance_high",
            AltSeason => "alt_season",
        }
    }
}

impl fmt::Display for EndpointPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
