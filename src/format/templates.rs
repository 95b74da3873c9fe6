//! Message templates, one per variant

use super::{ParseMode, RenderContext};
use crate::signal::{ColorTag, Variant};

type RenderFn = fn(&RenderContext<'_>) -> String;

pub(super) struct Template {
    pub variant: Variant,
    pub parse_mode: ParseMode,
    pub render: RenderFn,
}

static TEMPLATES: &[Template] = &[
    Template { variant: Variant::Buy, parse_mode: ParseMode::Html, render: action },
    Template { variant: Variant::Sell, parse_mode: ParseMode::Html, render: action },
    Template { variant: Variant::Generic, parse_mode: ParseMode::Html, render: action },
    Template { variant: Variant::MssBullish, parse_mode: ParseMode::Markdown, render: mss },
    Template { variant: Variant::MssBearish, parse_mode: ParseMode::Markdown, render: mss },
    Template { variant: Variant::MomentumBuy, parse_mode: ParseMode::Markdown, render: momentum },
    Template { variant: Variant::MomentumSell, parse_mode: ParseMode::Markdown, render: momentum },
    Template { variant: Variant::Confirmed, parse_mode: ParseMode::Html, render: confirmed },
    Template { variant: Variant::Filtered, parse_mode: ParseMode::Html, render: filtered },
];

static FALLBACK: Template = Template {
    variant: Variant::Generic,
    parse_mode: ParseMode::Html,
    render: action,
};

pub(super) fn lookup(variant: Variant) -> &'static Template {
    TEMPLATES
        .iter()
        .find(|t| t.variant == variant)
        .unwrap_or(&FALLBACK)
}

/// BUY / SELL / generic alarm, with chart and exchange links
fn action(ctx: &RenderContext<'_>) -> String {
    let p = ctx.presentation;
    let r = ctx.record;
    let (lead, trail) = match p.color_tag {
        ColorTag::Green => ("🟢", " 🚀"),
        ColorTag::Red => ("🔴", " 🩸"),
        ColorTag::Neutral => ("⚠️", ""),
    };

    format!(
        "{lead} <b>{header}</b>{trail}\n\n\
        🆔 <b>Coin:</b> <code>{pair}</code>\n\
        ⏱️ <b>Interval:</b> {interval}m\n\n\
        {price_emoji} <b>Price:</b> ${close}\n\
        📊 <b>Side:</b> {side}\n\
        🕯️ <b>Bar:</b> {bar_icon} {bar_label} ({bar_pct})\n\
        {change_marker} <b>Change:</b> {change_pct}\n\n\
        🌊 <b>Range:</b> ${low} - ${high}\n\
        📦 <b>Volume:</b> {volume}\n\n\
        {direction}\n\n\
        🔗 <a href=\"https://www.tradingview.com/chart/?symbol={ticker}\">TradingView</a> | \
        <a href=\"https://www.mexc.com/en-TR/futures/{pair}\">MEXC Futures</a>",
        header = p.header,
        pair = ctx.pair,
        interval = r.interval(),
        price_emoji = p.color_tag.emoji(),
        close = r.close(),
        side = p.color_tag.side(),
        bar_icon = ctx.bar.icon,
        bar_label = ctx.bar.label,
        bar_pct = ctx.bar.percent,
        change_marker = ctx.change_marker,
        change_pct = r.change_percentage(),
        low = r.low(),
        high = r.high(),
        volume = r.volume(),
        direction = p.direction_label,
        ticker = r.ticker(),
    )
}

/// Market structure shift
fn mss(ctx: &RenderContext<'_>) -> String {
    let p = ctx.presentation;
    let r = ctx.record;

    format!(
        "{icon} *{header}*\n\n\
        🆔 *Coin:* `{pair}`\n\
        ⏱️ *Interval:* {interval}\n\
        💰 *Price:* {close}\n\
        {change_marker} *Change:* {change_pct}\n\
        🛑 *Stop Loss:* {stop_loss}\n\n\
        {direction}",
        icon = p.color_tag.emoji(),
        header = p.header,
        pair = ctx.pair,
        interval = r.interval(),
        close = r.close(),
        change_marker = ctx.change_marker,
        change_pct = r.change_percentage(),
        stop_loss = r.stop_loss(),
        direction = p.direction_label,
    )
}

fn momentum(ctx: &RenderContext<'_>) -> String {
    let p = ctx.presentation;
    let r = ctx.record;
    let icon = match p.color_tag {
        ColorTag::Green => "🚀",
        ColorTag::Red => "🩸",
        ColorTag::Neutral => "⚪",
    };

    format!(
        "{icon} *{header}*\n\n\
        🆔 *Coin:* `{pair}`\n\
        ⏱️ *Interval:* {interval}\n\
        💰 *Price:* {close}\n\
        🕯️ *Bar:* {bar_icon} {bar_pct}\n\
        {change_marker} *Change:* {change_pct}\n\
        📦 *Volume:* {volume}\n\n\
        {direction}",
        header = p.header,
        pair = ctx.pair,
        interval = r.interval(),
        close = r.close(),
        bar_icon = ctx.bar.icon,
        bar_pct = ctx.bar.percent,
        change_marker = ctx.change_marker,
        change_pct = r.change_percentage(),
        volume = r.volume(),
        direction = p.direction_label,
    )
}

/// pcd_geih confirmed sub-signal, stamped with the render time
fn confirmed(ctx: &RenderContext<'_>) -> String {
    let p = ctx.presentation;
    let r = ctx.record;

    format!(
        "✅ <b>{header}</b> {icon}\n\n\
        🆔 <b>Coin:</b> <code>{pair}</code>\n\
        ⏱️ <b>Interval:</b> {interval}\n\
        💰 <b>Price:</b> ${close}\n\
        🧭 <b>Direction:</b> {direction}\n\n\
        📐 <b>PCD State:</b> {pcd_state}\n\
        📊 <b>PCD Vol Rank:</b> {pcd_vol_rank}\n\
        🌡️ <b>GEIH:</b> {geih}\n\
        🛑 <b>Stop Loss:</b> {stop_loss}\n\n\
        {direction_label}\n\
        🕒 {time}",
        header = p.header,
        icon = p.color_tag.emoji(),
        pair = ctx.pair,
        interval = r.interval(),
        close = r.close(),
        direction = r.direction(),
        pcd_state = r.pcd_state(),
        pcd_vol_rank = r.pcd_vol_rank(),
        geih = r.geih_value(),
        stop_loss = r.stop_loss(),
        direction_label = p.direction_label,
        time = ctx.now.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Notice for a dropped alert; shown by previews, never delivered
fn filtered(ctx: &RenderContext<'_>) -> String {
    let reason = ctx
        .rejection
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "⛔ <b>{header}</b>\n\n\
        🆔 <b>Coin:</b> <code>{pair}</code>\n\
        📋 <b>Reason:</b> {reason}",
        header = ctx.presentation.header,
        pair = ctx.pair,
    )
}
