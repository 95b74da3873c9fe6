//! Bar statistics and the choppiness gate

use crate::types::Ohlc;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Bars whose high-low range exceeds this share of the close are too volatile
pub const MAX_ATR_RATIO: Decimal = Decimal::from_parts(80, 0, 0, false, 1); // 8.0%

/// Bars whose body moves less than this share of the open are stagnant
pub const MIN_BAR_CHANGE_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 1); // 0.3%

/// Derived statistics for one bar, all in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStats {
    /// `(high - low) / close * 100`
    pub atr_ratio: Decimal,
    /// `|close - open| / open * 100`
    pub bar_change_ratio: Decimal,
}

/// Why a bar was judged too choppy to act on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Choppiness {
    HighVolatility { atr_ratio: Decimal },
    Stagnant { bar_change_ratio: Decimal },
}

impl BarStats {
    /// `None` when a ratio is undefined (zero open or close) or overflows
    pub fn from_ohlc(bar: &Ohlc) -> Option<Self> {
        let atr_ratio = bar
            .high
            .checked_sub(bar.low)?
            .checked_div(bar.close)?
            .checked_mul(Decimal::ONE_HUNDRED)?;
        let bar_change_ratio = bar
            .close
            .checked_sub(bar.open)?
            .abs()
            .checked_div(bar.open)?
            .checked_mul(Decimal::ONE_HUNDRED)?;

        Some(Self {
            atr_ratio,
            bar_change_ratio,
        })
    }

    /// Volatility is checked before stagnation
    pub fn choppiness(&self) -> Option<Choppiness> {
        if self.atr_ratio > MAX_ATR_RATIO {
            return Some(Choppiness::HighVolatility {
                atr_ratio: self.atr_ratio,
            });
        }
        if self.bar_change_ratio < MIN_BAR_CHANGE_RATIO {
            return Some(Choppiness::Stagnant {
                bar_change_ratio: self.bar_change_ratio,
            });
        }
        None
    }
}

impl Choppiness {
    pub fn code(&self) -> &'static str {
        match self {
            Choppiness::HighVolatility { .. } => "high_volatility",
            Choppiness::Stagnant { .. } => "stagnant",
        }
    }
}

impl fmt::Display for Choppiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choppiness::HighVolatility { atr_ratio } => write!(
                f,
                "ATR ratio {}% exceeds {}%",
                two_places(*atr_ratio),
                MAX_ATR_RATIO
            ),
            Choppiness::Stagnant { bar_change_ratio } => write!(
                f,
                "bar change {}% below {}%",
                two_places(*bar_change_ratio),
                MIN_BAR_CHANGE_RATIO
            ),
        }
    }
}

/// Signed bar body in percent: `(close - open) / open * 100`
pub fn bar_percentage(open: Decimal, close: Decimal) -> Option<Decimal> {
    close
        .checked_sub(open)?
        .checked_div(open)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Render a computed percentage with exactly two decimals (half away from zero)
pub fn two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
