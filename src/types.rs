//! Inbound alert payload types

use crate::error::{RelayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder rendered for absent text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// A single webhook field as the alert template emitted it.
///
/// TradingView placeholders arrive either as JSON numbers (`{{close}}` unquoted)
/// or as strings (`"{{close}}"`), so both are accepted and kept verbatim.
/// Anything else is kept as raw JSON and shown as its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Numeric reading of the field, `None` when it is not a number
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(n) => parse_decimal(&n.to_string()),
            FieldValue::Text(s) => parse_decimal(s),
            FieldValue::Flag(_) | FieldValue::Other(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Parse a decimal leniently: surrounding whitespace is ignored and
/// scientific notation is accepted.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Alert payload posted by the charting platform.
///
/// Every field is optional. Accessors resolve absent fields to their
/// documented placeholder so nothing downstream has to fail on a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<FieldValue>,
    /// BUY, SELL or anything else (treated as a generic alarm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<FieldValue>,
    /// MSS, MOMENTUM, or a pcd_geih sub-signal such as CONFIRMED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_type: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percentage: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcd_state: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcd_vol_rank: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geih_value: Option<FieldValue>,
}

fn text_or(field: &Option<FieldValue>, default: &str) -> String {
    field
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Absent numeric fields read as zero; present but non-numeric ones read as `None`
fn number_or_zero(field: &Option<FieldValue>) -> Option<Decimal> {
    match field {
        Some(v) => v.as_decimal(),
        None => Some(Decimal::ZERO),
    }
}

impl AlertRecord {
    /// Parse a raw webhook body.
    ///
    /// The body is read as JSON whatever the declared content type, since
    /// TradingView posts alert messages as `text/plain`.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(RelayError::EmptyPayload);
        }

        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(RelayError::InvalidPayload(
                "alert body must be a JSON object".to_string(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn ticker(&self) -> String {
        text_or(&self.ticker, NOT_AVAILABLE)
    }

    pub fn action(&self) -> String {
        text_or(&self.action, "SIGNAL")
    }

    pub fn direction(&self) -> String {
        text_or(&self.direction, "NEUTRAL")
    }

    /// Declared sub-signal, `None` when the payload carries no `signal_type` key
    pub fn declared_signal_type(&self) -> Option<String> {
        self.signal_type.as_ref().map(|v| v.to_string())
    }

    pub fn signal_type(&self) -> String {
        text_or(&self.signal_type, "GENERIC")
    }

    pub fn interval(&self) -> String {
        text_or(&self.interval, NOT_AVAILABLE)
    }

    pub fn close(&self) -> String {
        text_or(&self.close, "0")
    }

    pub fn open(&self) -> String {
        text_or(&self.open, "0")
    }

    pub fn high(&self) -> String {
        text_or(&self.high, "0")
    }

    pub fn low(&self) -> String {
        text_or(&self.low, "0")
    }

    pub fn volume(&self) -> String {
        text_or(&self.volume, "0")
    }

    pub fn change(&self) -> String {
        text_or(&self.change, NOT_AVAILABLE)
    }

    pub fn change_percentage(&self) -> String {
        text_or(&self.change_percentage, NOT_AVAILABLE)
    }

    pub fn stop_loss(&self) -> String {
        text_or(&self.stop_loss, NOT_AVAILABLE)
    }

    pub fn pcd_state(&self) -> String {
        text_or(&self.pcd_state, NOT_AVAILABLE)
    }

    pub fn pcd_vol_rank(&self) -> String {
        text_or(&self.pcd_vol_rank, NOT_AVAILABLE)
    }

    pub fn geih_value(&self) -> String {
        text_or(&self.geih_value, NOT_AVAILABLE)
    }

    pub fn open_value(&self) -> Option<Decimal> {
        number_or_zero(&self.open)
    }

    pub fn close_value(&self) -> Option<Decimal> {
        number_or_zero(&self.close)
    }

    /// OHLC as numbers, `None` if any present field is not numeric
    pub fn ohlc(&self) -> Option<Ohlc> {
        Some(Ohlc {
            open: number_or_zero(&self.open)?,
            high: number_or_zero(&self.high)?,
            low: number_or_zero(&self.low)?,
            close: number_or_zero(&self.close)?,
        })
    }
}

/// Numeric view of one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}
