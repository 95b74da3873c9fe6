//! Tests for message formatting

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::signal::{classify, Variant};
    use crate::ticker::normalize;
    use crate::types::AlertRecord;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn record(value: serde_json::Value) -> AlertRecord {
        serde_json::from_value(value).unwrap()
    }

    fn fixed_formatter() -> Formatter {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 12, 30, 5).unwrap();
        Formatter::new(Arc::new(FixedClock(at)))
    }

    fn render(record: &AlertRecord) -> String {
        let classification = classify(record);
        fixed_formatter().render(record, &normalize(&record.ticker()), &classification)
    }

    #[test]
    fn test_buy_message_layout() {
        let r = record(json!({
            "ticker": "BINANCE:XLMUSDT",
            "action": "BUY",
            "open": 0.12,
            "close": 0.1234,
            "high": 0.125,
            "low": 0.119,
            "volume": 1500000,
            "interval": "15",
            "change": "+2.5%",
            "change_percentage": "+2.83%"
        }));

        let expected = "🟢 <b>LONG SIGNAL RECEIVED!</b> 🚀\n\n\
            🆔 <b>Coin:</b> <code>XLM_USDT</code>\n\
            ⏱️ <b>Interval:</b> 15m\n\n\
            🟢 <b>Price:</b> $0.1234\n\
            📊 <b>Side:</b> LONG\n\
            🕯️ <b>Bar:</b> 🟩 GREEN BAR (+2.83%)\n\
            📈 <b>Change:</b> +2.83%\n\n\
            🌊 <b>Range:</b> $0.119 - $0.125\n\
            📦 <b>Volume:</b> 1500000\n\n\
            ⬆️ EXPECTING UPSIDE\n\n\
            🔗 <a href=\"https://www.tradingview.com/chart/?symbol=BINANCE:XLMUSDT\">TradingView</a> | \
            <a href=\"https://www.mexc.com/en-TR/futures/XLM_USDT\">MEXC Futures</a>";

        assert_eq!(render(&r), expected);
    }

    #[test]
    fn test_sell_message() {
        let r = record(json!({
            "ticker": "BINANCE:ETHBUSD",
            "action": "SELL",
            "open": 2000,
            "close": 1950,
            "high": 2010,
            "low": 1940,
            "change": "-2.5"
        }));
        let text = render(&r);
        assert!(text.starts_with("🔴 <b>SHORT SIGNAL RECEIVED!</b> 🩸"));
        assert!(text.contains("<code>ETH_BUSD</code>"));
        assert!(text.contains("🟥 RED BAR (-2.50%)"));
        assert!(text.contains("📉 <b>Change:</b>"));
        assert!(text.contains("📊 <b>Side:</b> SHORT"));
        assert!(text.contains("⬇️ EXPECTING DOWNSIDE"));
    }

    #[test]
    fn test_generic_message_with_no_fields() {
        let text = render(&AlertRecord::default());
        assert!(text.starts_with("⚠️ <b>ALERT TRIGGERED</b>\n"));
        assert!(text.contains("<code>N/A</code>"));
        assert!(text.contains("⚪ <b>Price:</b> $0"));
        assert!(text.contains("🕯️ <b>Bar:</b> ⬜ N/A (N/A)"));
        assert!(text.contains("➖ <b>Change:</b> N/A"));
        assert!(text.contains("⏱️ <b>Interval:</b> N/Am"));
        assert!(text.contains("↔️ DIRECTION UNCLEAR"));
    }

    #[test]
    fn test_non_numeric_open_degrades() {
        let r = record(json!({
            "ticker": "BINANCE:BTCUSDT",
            "action": "BUY",
            "open": "N/A",
            "close": "64250.5",
            "high": "64900",
            "low": "63800",
            "volume": "1234.5",
            "change": "+1.2%",
            "change_percentage": "+1.2%"
        }));
        let text = render(&r);
        assert!(text.contains("⬜ N/A (N/A)"));
        assert!(text.contains("$64250.5"));
        assert!(text.contains("$63800 - $64900"));
        assert!(text.contains("📦 <b>Volume:</b> 1234.5"));
        assert!(text.contains("📈 <b>Change:</b> +1.2%"));
    }

    #[test]
    fn test_flat_bar() {
        let r = record(json!({"open": 10, "close": 10}));
        let reading = BarReading::from_record(&r);
        assert_eq!(reading.icon, "⬜");
        assert_eq!(reading.label, "FLAT BAR");
        assert_eq!(reading.percent, "0.00%");
    }

    #[test]
    fn test_change_marker() {
        assert_eq!(change_marker(&record(json!({"change": "+1.5%"}))), "📈");
        assert_eq!(change_marker(&record(json!({"change": -0.4}))), "📉");
        assert_eq!(change_marker(&record(json!({"change": "0"}))), "➖");
        assert_eq!(change_marker(&record(json!({"change": "abc"}))), "➖");
        assert_eq!(change_marker(&AlertRecord::default()), "➖");
    }

    #[test]
    fn test_mss_markdown() {
        let r = record(json!({
            "ticker": "BINANCE:SOLUSDT.P",
            "signal_type": "MSS",
            "direction": "BULLISH",
            "close": 142.7,
            "interval": "60",
            "stop_loss": "138.2"
        }));
        let c = classify(&r);
        assert_eq!(Formatter::parse_mode(c.variant), ParseMode::Markdown);

        let text = render(&r);
        assert!(text.starts_with("🟢 *MSS BULLISH*"));
        assert!(text.contains("🆔 *Coin:* `SOL_USDT`"));
        assert!(text.contains("🛑 *Stop Loss:* 138.2"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn test_momentum_sell() {
        let r = record(json!({
            "ticker": "DOGEUSDT",
            "signal_type": "MOMENTUM",
            "direction": "SELL",
            "open": 0.2,
            "close": 0.19
        }));
        let text = render(&r);
        assert!(text.starts_with("🩸 *MOMENTUM SELL*"));
        assert!(text.contains("🕯️ *Bar:* 🟥 -5.00%"));
        assert!(text.contains("⬇️ MOMENTUM DOWN"));
    }

    #[test]
    fn test_confirmed_uses_injected_clock() {
        let r = record(json!({
            "ticker": "BINANCE:ADAUSDT",
            "signal_type": "CONFIRMED",
            "direction": "BUY",
            "close": 0.45,
            "pcd_state": 2,
            "pcd_vol_rank": 87,
            "geih_value": 1.35
        }));
        let text = render(&r);
        assert!(text.starts_with("✅ <b>PCD/GEIH CONFIRMED</b> 🟢"));
        assert!(text.contains("📐 <b>PCD State:</b> 2"));
        assert!(text.contains("📊 <b>PCD Vol Rank:</b> 87"));
        assert!(text.contains("🌡️ <b>GEIH:</b> 1.35"));
        assert!(text.contains("🛑 <b>Stop Loss:</b> N/A"));
        assert!(text.ends_with("🕒 2026-10-17 12:30:05 UTC"));
    }

    #[test]
    fn test_filtered_notice() {
        let r = record(json!({"ticker": "BTCUSDT", "signal_type": "PENDING"}));
        let c = classify(&r);
        assert_eq!(c.variant, Variant::Filtered);

        let text = render(&r);
        assert!(text.starts_with("⛔ <b>SIGNAL FILTERED</b>"));
        assert!(text.contains("signal_type PENDING is not CONFIRMED"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let r = record(json!({
            "ticker": "BINANCE:ADAUSDT",
            "signal_type": "CONFIRMED",
            "direction": "SELL",
            "close": 0.45
        }));
        assert_eq!(render(&r), render(&r));
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!(Formatter::parse_mode(Variant::Buy), ParseMode::Html);
        assert_eq!(Formatter::parse_mode(Variant::Confirmed), ParseMode::Html);
        assert_eq!(Formatter::parse_mode(Variant::MomentumBuy), ParseMode::Markdown);
        assert_eq!(ParseMode::Html.as_str(), "HTML");
        assert_eq!(serde_json::to_string(&ParseMode::Html).unwrap(), "\"HTML\"");
    }

    #[test]
    fn test_array_volume_renders() {
        let r = record(json!({"action": "BUY", "ticker": "BINANCE:BTCUSDT", "volume": [1, 2]}));
        let text = render(&r);
        assert!(text.starts_with("🟢 <b>LONG SIGNAL RECEIVED!</b>"));
        assert!(text.contains("📦 <b>Volume:</b> [1,2]"));
    }

    #[test]
    fn test_overflowing_bar_falls_back() {
        let r = record(json!({
            "ticker": "BINANCE:BTCUSDT",
            "signal_type": "MOMENTUM",
            "direction": "BUY",
            "open": "-70000000000000000000000000000",
            "close": "70000000000000000000000000000"
        }));
        let text = render(&r);
        assert!(text.starts_with("🚀 *MOMENTUM BUY*"));
        assert!(text.contains("🕯️ *Bar:* ⬜ N/A"));
        assert!(text.contains("💰 *Price:* 70000000000000000000000000000"));
    }
}
