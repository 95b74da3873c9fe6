//! Signal classification and admission filtering
//!
//! Decides whether an inbound alert is worth forwarding and which message
//! variant presents it. Two gates apply depending on the signal family:
//! - pcd_geih sub-signals: only `CONFIRMED` passes
//! - plain action alerts: bars that are too volatile or too stagnant are dropped
//!
//! Everything here is a pure function of the record.

pub mod stats;


pub use stats::{BarStats, Choppiness, MAX_ATR_RATIO, MIN_BAR_CHANGE_RATIO};

use crate::types::AlertRecord;
use serde::Serialize;
use std::fmt;

/// The one pcd_geih sub-signal that is delivered
pub const CONFIRMED: &str = "CONFIRMED";

/// Message variant selected for an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Variant {
    Buy,
    Sell,
    Generic,
    MssBullish,
    MssBearish,
    MomentumBuy,
    MomentumSell,
    Confirmed,
    Filtered,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Buy => "BUY",
            Variant::Sell => "SELL",
            Variant::Generic => "GENERIC",
            Variant::MssBullish => "MSS_BULLISH",
            Variant::MssBearish => "MSS_BEARISH",
            Variant::MomentumBuy => "MOMENTUM_BUY",
            Variant::MomentumSell => "MOMENTUM_SELL",
            Variant::Confirmed => "CONFIRMED",
            Variant::Filtered => "FILTERED",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected price direction, drives icons and side labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Green,
    Red,
    Neutral,
}

impl ColorTag {
    pub fn emoji(&self) -> &'static str {
        match self {
            ColorTag::Green => "🟢",
            ColorTag::Red => "🔴",
            ColorTag::Neutral => "⚪",
        }
    }

    pub fn side(&self) -> &'static str {
        match self {
            ColorTag::Green => "LONG",
            ColorTag::Red => "SHORT",
            ColorTag::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Plain header text; templates add markup and icons
    pub header: &'static str,
    pub direction_label: &'static str,
    pub color_tag: ColorTag,
}

const UP: &str = "⬆️ EXPECTING UPSIDE";
const DOWN: &str = "⬇️ EXPECTING DOWNSIDE";
const UNCLEAR: &str = "↔️ DIRECTION UNCLEAR";

impl Presentation {
    const fn new(header: &'static str, direction_label: &'static str, color_tag: ColorTag) -> Self {
        Self {
            header,
            direction_label,
            color_tag,
        }
    }

    /// Presentation for a variant. `direction` only matters for CONFIRMED,
    /// whose header does not already imply a side.
    pub fn for_variant(variant: Variant, direction: &str) -> Self {
        match variant {
            Variant::Buy => Self::new("LONG SIGNAL RECEIVED!", UP, ColorTag::Green),
            Variant::Sell => Self::new("SHORT SIGNAL RECEIVED!", DOWN, ColorTag::Red),
            Variant::Generic => Self::new("ALERT TRIGGERED", UNCLEAR, ColorTag::Neutral),
            Variant::MssBullish => {
                Self::new("MSS BULLISH", "⬆️ BULLISH STRUCTURE SHIFT", ColorTag::Green)
            }
            Variant::MssBearish => {
                Self::new("MSS BEARISH", "⬇️ BEARISH STRUCTURE SHIFT", ColorTag::Red)
            }
            Variant::MomentumBuy => Self::new("MOMENTUM BUY", "⬆️ MOMENTUM UP", ColorTag::Green),
            Variant::MomentumSell => {
                Self::new("MOMENTUM SELL", "⬇️ MOMENTUM DOWN", ColorTag::Red)
            }
            Variant::Confirmed => match direction {
                "BUY" | "LONG" | "BULLISH" => Self::new("PCD/GEIH CONFIRMED", UP, ColorTag::Green),
                "SELL" | "SHORT" | "BEARISH" => {
                    Self::new("PCD/GEIH CONFIRMED", DOWN, ColorTag::Red)
                }
                _ => Self::new("PCD/GEIH CONFIRMED", UNCLEAR, ColorTag::Neutral),
            },
            Variant::Filtered => Self::new("SIGNAL FILTERED", UNCLEAR, ColorTag::Neutral),
        }
    }
}

/// Why an alert was not forwarded. Filtering is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    NotConfirmed { signal_type: String },
    TooChoppy(Choppiness),
}

impl Rejection {
    /// Coarse category reported to the webhook caller
    pub fn category(&self) -> &'static str {
        match self {
            Rejection::NotConfirmed { .. } => "not_confirmed",
            Rejection::TooChoppy(_) => "too_choppy",
        }
    }

    /// Specific reason code
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::NotConfirmed { .. } => "not_confirmed",
            Rejection::TooChoppy(chop) => chop.code(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotConfirmed { signal_type } => {
                write!(f, "signal_type {} is not {}", signal_type, CONFIRMED)
            }
            Rejection::TooChoppy(chop) => write!(f, "too choppy: {}", chop),
        }
    }
}

/// Result of classifying one alert
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub variant: Variant,
    pub presentation: Presentation,
    pub rejection: Option<Rejection>,
}

impl Classification {
    fn admit(variant: Variant, record: &AlertRecord) -> Self {
        Self {
            variant,
            presentation: Presentation::for_variant(variant, &record.direction()),
            rejection: None,
        }
    }

    fn reject(rejection: Rejection) -> Self {
        Self {
            variant: Variant::Filtered,
            presentation: Presentation::for_variant(Variant::Filtered, ""),
            rejection: Some(rejection),
        }
    }

    pub fn is_admissible(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Classify an alert: admission gates first, then the variant decision table.
pub fn classify(record: &AlertRecord) -> Classification {
    let Some(signal_type) = record.declared_signal_type() else {
        return classify_action(record);
    };

    match signal_type.as_str() {
        "MSS" => {
            let variant = if record.direction() == "BULLISH" {
                Variant::MssBullish
            } else {
                Variant::MssBearish
            };
            Classification::admit(variant, record)
        }
        "MOMENTUM" => {
            let variant = if record.direction() == "BUY" {
                Variant::MomentumBuy
            } else {
                Variant::MomentumSell
            };
            Classification::admit(variant, record)
        }
        CONFIRMED => Classification::admit(Variant::Confirmed, record),
        _ => Classification::reject(Rejection::NotConfirmed { signal_type }),
    }
}

/// Plain BUY/SELL alerts carry the bar, so they go through the choppiness gate.
/// A bar that does not parse skips the gate rather than blocking delivery.
fn classify_action(record: &AlertRecord) -> Classification {
    let chop = record
        .ohlc()
        .as_ref()
        .and_then(BarStats::from_ohlc)
        .and_then(|stats| stats.choppiness());
    if let Some(chop) = chop {
        return Classification::reject(Rejection::TooChoppy(chop));
    }

    let variant = match record.action().as_str() {
        "BUY" => Variant::Buy,
        "SELL" => Variant::Sell,
        _ => Variant::Generic,
    };
    Classification::admit(variant, record)
}
