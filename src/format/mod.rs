//! Message formatting
//!
//! Turns a classified alert into Telegram text. Each variant has its own
//! template; see [`templates`] for the dispatch table.

pub mod clock;
mod templates;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::signal::stats::{bar_percentage, two_places};
use crate::signal::{Classification, Presentation, Rejection, Variant};
use crate::types::{parse_decimal, AlertRecord, NOT_AVAILABLE};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Telegram inline markup dialect. The two are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Html => "HTML",
            ParseMode::Markdown => "Markdown",
        }
    }
}

/// A message ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    /// Destination chat
    pub chat_id: String,
    pub text: String,
    pub parse_mode: ParseMode,
    pub disable_preview: bool,
    pub variant: Variant,
}

/// Direction of the bar body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarReading {
    pub icon: &'static str,
    pub label: &'static str,
    /// Signed percentage with two decimals, or the placeholder
    pub percent: String,
}

impl BarReading {
    fn from_record(record: &AlertRecord) -> Self {
        let pct = match (record.open_value(), record.close_value()) {
            (Some(open), Some(close)) => bar_percentage(open, close),
            _ => None,
        };

        match pct {
            Some(p) if p > Decimal::ZERO => Self {
                icon: "🟩",
                label: "GREEN BAR",
                percent: format!("+{}%", two_places(p)),
            },
            Some(p) if p < Decimal::ZERO => Self {
                icon: "🟥",
                label: "RED BAR",
                percent: format!("{}%", two_places(p)),
            },
            Some(_) => Self {
                icon: "⬜",
                label: "FLAT BAR",
                percent: "0.00%".to_string(),
            },
            None => Self {
                icon: "⬜",
                label: NOT_AVAILABLE,
                percent: NOT_AVAILABLE.to_string(),
            },
        }
    }
}

/// Marker for the sign of the `change` field (`"+1.5%"`, `"-0.3"`, ...)
pub fn change_marker(record: &AlertRecord) -> &'static str {
    let raw = record.change();
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);

    match parse_decimal(trimmed) {
        Some(v) if v > Decimal::ZERO => "📈",
        Some(v) if v < Decimal::ZERO => "📉",
        _ => "➖",
    }
}

/// Everything a template may interpolate
pub struct RenderContext<'a> {
    pub record: &'a AlertRecord,
    /// Normalized exchange pair
    pub pair: &'a str,
    pub presentation: &'a Presentation,
    pub rejection: Option<&'a Rejection>,
    pub bar: BarReading,
    pub change_marker: &'static str,
    pub now: DateTime<Utc>,
}

/// Renders classified alerts
#[derive(Clone)]
pub struct Formatter {
    clock: Arc<dyn Clock>,
}

impl Formatter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Formatter on the wall clock
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Markup dialect of the template used for `variant`
    pub fn parse_mode(variant: Variant) -> ParseMode {
        templates::lookup(variant).parse_mode
    }

    /// Render the message text for a classified alert.
    ///
    /// Never fails: every derived value falls back to a placeholder.
    pub fn render(
        &self,
        record: &AlertRecord,
        pair: &str,
        classification: &Classification,
    ) -> String {
        let ctx = RenderContext {
            record,
            pair,
            presentation: &classification.presentation,
            rejection: classification.rejection.as_ref(),
            bar: BarReading::from_record(record),
            change_marker: change_marker(record),
            now: self.clock.now(),
        };

        (templates::lookup(classification.variant).render)(&ctx)
    }
}
