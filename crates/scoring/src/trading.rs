use core_types::{MarketCondition, PositionRecommendation, TradingParameters};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Suggested share of equity for a given risk score, as a label and a fraction.
pub fn position_size(risk_score: f64, position: PositionRecommendation) -> (&'static str, Decimal) {
    if position == PositionRecommendation::Neutral {
        return ("0%", Decimal::ZERO);
    }
    if risk_score < 30.0 {
        ("3-5%", dec!(0.05))
    } else if risk_score < 50.0 {
        ("2-3%", dec!(0.03))
    } else if risk_score < 70.0 {
        ("1-2%", dec!(0.02))
    } else {
        ("0.5-1%", dec!(0.01))
    }
}

/// Stop-loss distance in percent, wider for noisier regimes.
pub fn stop_loss_pct(condition: MarketCondition) -> Decimal {
    match condition {
        MarketCondition::ExtremeVolatility => dec!(8),
        MarketCondition::HighVolatility => dec!(5),
        MarketCondition::TrendingStrong => dec!(4),
        MarketCondition::Normal | MarketCondition::Uncertain => dec!(3),
        MarketCondition::Ranging => dec!(2.5),
        MarketCondition::LowVolatility => dec!(2),
    }
}

/// Take-profit ladder in percent. Empty for a neutral call.
pub fn take_profit_ladder(position: PositionRecommendation) -> Vec<Decimal> {
    match position {
        PositionRecommendation::Neutral => Vec::new(),
        p if p.is_strong() => vec![dec!(5), dec!(10), dec!(15)],
        _ => vec![dec!(3), dec!(6), dec!(10)],
    }
}

pub fn trading_parameters(
    risk_score: f64,
    condition: MarketCondition,
    position: PositionRecommendation,
) -> TradingParameters {
    let (label, fraction) = position_size(risk_score, position);
    TradingParameters {
        position_size: label.to_string(),
        position_fraction: fraction,
        stop_loss_pct: stop_loss_pct(condition),
        take_profit_pct: take_profit_ladder(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_shrinks_as_risk_grows() {
        let long = PositionRecommendation::Long;
        assert_eq!(position_size(20.0, long), ("3-5%", dec!(0.05)));
        assert_eq!(position_size(45.0, long), ("2-3%", dec!(0.03)));
        assert_eq!(position_size(50.0, long), ("1-2%", dec!(0.02)));
        assert_eq!(position_size(90.0, long), ("0.5-1%", dec!(0.01)));
        assert_eq!(
            position_size(20.0, PositionRecommendation::Neutral),
            ("0%", Decimal::ZERO)
        );
    }

    #[test]
    fn strong_calls_get_the_wide_ladder() {
        assert_eq!(
            take_profit_ladder(PositionRecommendation::StrongShort),
            vec![dec!(5), dec!(10), dec!(15)]
        );
        assert_eq!(
            take_profit_ladder(PositionRecommendation::Long),
            vec![dec!(3), dec!(6), dec!(10)]
        );
        assert!(take_profit_ladder(PositionRecommendation::Neutral).is_empty());
    }

    #[test]
    fn parameters_combine_all_three_tables() {
        let params = trading_parameters(
            60.0,
            MarketCondition::Ranging,
            PositionRecommendation::StrongLong,
        );
        assert_eq!(params.position_size, "1-2%");
        assert_eq!(params.stop_loss_pct, dec!(2.5));
        assert_eq!(params.take_profit_pct.len(), 3);
        assert_eq!(stop_loss_pct(MarketCondition::ExtremeVolatility), dec!(8));
    }
}
