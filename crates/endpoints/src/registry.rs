use crate::error::EndpointError;
use core_types::Endpoint;

/// The declared endpoint weights. Sums to 100.
const DEFAULT_WEIGHTS: [(Endpoint, f64); 17] = [
    (Endpoint::AiScreener, 10.0),
    (Endpoint::AiScreenerAnalysis, 8.0),
    (Endpoint::Ticker, 8.0),
    (Endpoint::TrendIndicatorV3, 10.0),
    (Endpoint::LsRatio, 8.0),
    (Endpoint::MergedBuySellVolume, 7.0),
    (Endpoint::VolumeFlow, 6.0),
    (Endpoint::LiquidationDataV2, 7.0),
    (Endpoint::TotalLiquidationData, 5.0),
    (Endpoint::LargeTradesActivity, 6.0),
    (Endpoint::RapidMovements, 5.0),
    (Endpoint::Xtrades, 5.0),
    (Endpoint::Ohlcv, 5.0),
    (Endpoint::Tickerlist, 3.0),
    (Endpoint::CryptocurrencyInfo, 3.0),
    (Endpoint::CoinInfo, 2.0),
    (Endpoint::BitcoinDominance, 2.0),
];

/// An ordered set of endpoints with their static declared weights.
///
/// The registry defines both the fetch order and the coverage denominator used
/// during calibration: an endpoint that is registered but produced no
/// successful score counts as missing coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRegistry {
    entries: Vec<(Endpoint, f64)>,
}

impl EndpointRegistry {
    /// Builds a registry from explicit weights.
    ///
    /// Weights need not sum to 100; calibration redistributes whatever budget
    /// the successful endpoints hold back onto a 100-point scale.
    pub fn from_weights(entries: Vec<(Endpoint, f64)>) -> Result<Self, EndpointError> {
        for (i, (endpoint, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(EndpointError::InvalidWeight {
                    endpoint: endpoint.to_string(),
                    weight: *weight,
                });
            }
            if entries[..i].iter().any(|(e, _)| e == endpoint) {
                return Err(EndpointError::DuplicateEndpoint(endpoint.to_string()));
            }
        }
        Ok(Self { entries })
    }

    pub fn declared_weight(&self, endpoint: Endpoint) -> Option<f64> {
        self.entries
            .iter()
            .find(|(e, _)| *e == endpoint)
            .map(|(_, w)| *w)
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn endpoints(&self) -> impl Iterator<Item = Endpoint> + '_ {
        self.entries.iter().map(|(e, _)| *e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Endpoint, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self {
            entries: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}
