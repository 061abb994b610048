use crate::responses::{Candle, RapidMovement, TickerData};
use core_types::{Endpoint, EndpointPattern, EndpointScore};

pub fn score_ticker(endpoint: Endpoint, data: &TickerData) -> EndpointScore {
    let Some(change) = data.change_24h else {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "Ticker: 24h change missing",
        );
    };

    let (score, pattern) = if change > 5.0 {
        (70.0, EndpointPattern::StrongBullishMomentum)
    } else if change > 2.0 {
        (62.0, EndpointPattern::BullishMomentum)
    } else if change < -5.0 {
        (30.0, EndpointPattern::StrongBearishMomentum)
    } else if change < -2.0 {
        (38.0, EndpointPattern::BearishMomentum)
    } else {
        (50.0, EndpointPattern::RangeBound)
    };

    let price = data
        .last_price
        .map(|p| format!(" at {p}"))
        .unwrap_or_default();
    EndpointScore::new(
        endpoint,
        score,
        0.6,
        vec![pattern],
        format!("Ticker: {:+.2}% over 24h{}", change, price),
    )
}

pub fn score_rapid_movements(endpoint: Endpoint, movements: &[RapidMovement]) -> EndpointScore {
    let changes: Vec<f64> = movements.iter().filter_map(|m| m.change_pct).collect();
    let ups = changes.iter().filter(|c| **c > 0.0).count();
    let downs = changes.iter().filter(|c| **c < 0.0).count();

    if ups + downs == 0 {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            vec![EndpointPattern::RangeBound],
            "Rapid movements: none recorded",
        );
    }

    let (score, pattern) = if ups > 2 * downs {
        (65.0, EndpointPattern::RapidPump)
    } else if downs > 2 * ups {
        (35.0, EndpointPattern::RapidDump)
    } else {
        (50.0, EndpointPattern::RangeBound)
    };
    let confidence = (0.4 + 0.05 * (ups + downs) as f64).min(0.8);

    EndpointScore::new(
        endpoint,
        score,
        confidence,
        vec![pattern],
        format!("Rapid movements: {} up / {} down", ups, downs),
    )
}

/// Scores the net move across a candle series and flags rising volume.
pub fn score_ohlcv(endpoint: Endpoint, candles: &[Candle]) -> EndpointScore {
    let complete: Vec<&Candle> = candles
        .iter()
        .filter(|c| c.open.is_some() && c.close.is_some())
        .collect();
    let (Some(first), Some(last)) = (complete.first(), complete.last()) else {
        return EndpointScore::new(endpoint, 50.0, 0.3, Vec::new(), "OHLCV: no candles");
    };
    let open = first.open.unwrap_or_default();
    let close = last.close.unwrap_or_default();
    if complete.len() < 2 || open <= 0.0 {
        return EndpointScore::new(
            endpoint,
            50.0,
            0.3,
            Vec::new(),
            "OHLCV: not enough candles",
        );
    }

    let change_pct = (close - open) / open * 100.0;
    let (score, pattern) = if change_pct > 3.0 {
        (65.0, EndpointPattern::Uptrend)
    } else if change_pct < -3.0 {
        (35.0, EndpointPattern::Downtrend)
    } else {
        (50.0, EndpointPattern::Sideways)
    };
    let mut patterns = vec![pattern];

    let volumes: Vec<f64> = complete.iter().filter_map(|c| c.volume).collect();
    if volumes.len() >= 4 {
        let half = volumes.len() / 2;
        let early: f64 = volumes[..half].iter().sum::<f64>() / half as f64;
        let late: f64 = volumes[half..].iter().sum::<f64>() / (volumes.len() - half) as f64;
        if early > 0.0 && late > early * 1.2 {
            patterns.push(EndpointPattern::VolumeRising);
        }
    }

    EndpointScore::new(
        endpoint,
        score,
        0.6,
        patterns,
        format!(
            "OHLCV: {:+.2}% across {} candles",
            change_pct,
            complete.len()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, close: f64, volume: f64) -> Candle {
        Candle {
            open: Some(open),
            high: Some(open.max(close)),
            low: Some(open.min(close)),
            close: Some(close),
            volume: Some(volume),
        }
    }

    #[test]
    fn ticker_change_bands() {
        let t = |c: f64| TickerData {
            change_24h: Some(c),
            ..Default::default()
        };
        assert_eq!(score_ticker(Endpoint::Ticker, &t(6.0)).score, 70.0);
        assert_eq!(score_ticker(Endpoint::Ticker, &t(3.0)).score, 62.0);
        assert_eq!(score_ticker(Endpoint::Ticker, &t(0.5)).score, 50.0);
        assert_eq!(score_ticker(Endpoint::Ticker, &t(-3.0)).score, 38.0);
        assert_eq!(score_ticker(Endpoint::Ticker, &t(-7.0)).score, 30.0);
    }

    #[test]
    fn rapid_pumps_need_twice_the_drops() {
        let moves = |v: &[f64]| -> Vec<RapidMovement> {
            v.iter()
                .map(|c| RapidMovement {
                    change_pct: Some(*c),
                })
                .collect()
        };
        let pump = score_rapid_movements(Endpoint::RapidMovements, &moves(&[3.0, 2.0, 4.0, -1.0]));
        assert_eq!(pump.patterns, vec![EndpointPattern::RapidPump]);
        let mixed = score_rapid_movements(Endpoint::RapidMovements, &moves(&[3.0, -2.0]));
        assert_eq!(mixed.score, 50.0);
    }

    #[test]
    fn ohlcv_uptrend_with_rising_volume() {
        let candles = vec![
            candle(100.0, 101.0, 10.0),
            candle(101.0, 102.0, 10.0),
            candle(102.0, 104.0, 20.0),
            candle(104.0, 106.0, 25.0),
        ];
        let s = score_ohlcv(Endpoint::Ohlcv, &candles);
        assert_eq!(s.score, 65.0);
        assert!(s.patterns.contains(&EndpointPattern::VolumeRising));
    }

    #[test]
    fn single_candle_is_not_enough() {
        let s = score_ohlcv(Endpoint::Ohlcv, &[candle(100.0, 120.0, 1.0)]);
        assert_eq!(s.score, 50.0);
        assert!(s.confidence <= 0.3);
    }
}
