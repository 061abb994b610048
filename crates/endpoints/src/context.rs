use crate::responses::{CoinInfoData, DominanceData, TickerEntry};
use core_types::{Endpoint, EndpointPattern, EndpointScore};

/// Market breadth across the provider's ticker list.
pub fn score_ticker_list(endpoint: Endpoint, entries: &[TickerEntry]) -> EndpointScore {
    let changes: Vec<f64> = entries.iter().filter_map(|e| e.change_24h).collect();
    if changes.is_empty() {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Ticker list: no 24h changes",
        );
    }
    let advancing = changes.iter().filter(|c| **c > 0.0).count();
    let fraction = advancing as f64 / changes.len() as f64;
    let score = 30.0 + 40.0 * fraction;

    let mut patterns = Vec::new();
    if fraction > 0.65 {
        patterns.push(EndpointPattern::BroadMarketStrength);
    } else if fraction < 0.35 {
        patterns.push(EndpointPattern::BroadMarketWeakness);
    }

    EndpointScore::new(
        endpoint,
        score,
        0.4,
        patterns,
        format!(
            "Ticker list: {}/{} symbols advancing",
            advancing,
            changes.len()
        ),
    )
}

/// Static coin facts. Low signal, small weight.
pub fn score_coin_info(endpoint: Endpoint, data: &CoinInfoData) -> EndpointScore {
    if data.market_cap.is_none() && data.rank.is_none() {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Coin info: market cap and rank missing",
        );
    }

    let mut score = 50.0;
    let mut patterns = Vec::new();
    if data.rank.is_some_and(|r| (1.0..=10.0).contains(&r)) {
        score += 3.0;
        patterns.push(EndpointPattern::BlueChip);
    }
    if let (Some(cap), Some(volume)) = (data.market_cap, data.volume_24h) {
        if cap > 0.0 && volume / cap > 0.1 {
            score += 5.0;
            patterns.push(EndpointPattern::HighLiquidity);
        }
    }

    EndpointScore::new(
        endpoint,
        score,
        0.4,
        patterns,
        format!(
            "Coin info: rank {}, market cap {}",
            data.rank.map_or("n/a".to_string(), |r| format!("{r:.0}")),
            data.market_cap
                .map_or("n/a".to_string(), |c| format!("${:.1}B", c / 1e9))
        ),
    )
}

pub fn score_dominance(endpoint: Endpoint, data: &DominanceData) -> EndpointScore {
    let Some(dominance) = data.dominance else {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "BTC dominance: value missing",
        );
    };

    let (score, patterns) = if dominance > 55.0 {
        (45.0, vec![EndpointPattern::BtcDominanceHigh])
    } else if dominance < 45.0 {
        (58.0, vec![EndpointPattern::AltSeason])
    } else {
        (50.0, Vec::new())
    };

    EndpointScore::new(
        endpoint,
        score,
        0.4,
        patterns,
        format!("BTC dominance: {:.1}%", dominance),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadth_maps_to_thirty_through_seventy() {
        let entries: Vec<TickerEntry> = [1.0, 2.0, 3.0, -1.0]
            .iter()
            .map(|c| TickerEntry {
                symbol: None,
                change_24h: Some(*c),
            })
            .collect();
        let s = score_ticker_list(Endpoint::Tickerlist, &entries);
        assert!((s.score - 60.0).abs() < 1e-9);
        assert_eq!(s.patterns, vec![EndpointPattern::BroadMarketStrength]);
    }

    #[test]
    fn liquid_blue_chip_tops_out_at_fifty_eight() {
        let data = CoinInfoData {
            market_cap: Some(1e12),
            volume_24h: Some(2e11),
            rank: Some(1.0),
        };
        assert_eq!(score_coin_info(Endpoint::CoinInfo, &data).score, 58.0);
    }

    #[test]
    fn dominance_bands() {
        let d = |v: f64| DominanceData {
            dominance: Some(v),
            change_24h: None,
        };
        assert_eq!(score_dominance(Endpoint::BitcoinDominance, &d(60.0)).score, 45.0);
        assert_eq!(score_dominance(Endpoint::BitcoinDominance, &d(40.0)).score, 58.0);
        assert_eq!(score_dominance(Endpoint::BitcoinDominance, &d(50.0)).score, 50.0);
    }
}
