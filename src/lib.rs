//! TradingView Signal Relay
//!
//! Receives TradingView webhook alerts, filters out unconfirmed and choppy
//! signals, and forwards a formatted message to Telegram.

pub mod config;
pub mod error;
pub mod format;
pub mod notify;
pub mod relay;
pub mod server;
pub mod signal;
pub mod ticker;
pub mod types;
