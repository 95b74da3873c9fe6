//! Configuration management

use serde::Deserialize;
use std::path::Path;

/// The one chat every alert goes to. Not configurable.
pub const DEFAULT_CHAT_ID: &str = "-4759460082";

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API token; delivery is disabled when unset
    pub bot_token: Option<String>,
    /// Bot API base URL
    pub api_url: String,
}

impl Config {
    /// Load configuration from file, then environment
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_string_lossy().into_owned();
        Self::build(Some(&path))
    }

    /// Load from default locations, falling back to environment only
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["config.toml", "config.yaml", "~/.config/signal-relay/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        Self::build(None)
    }

    fn build(file: Option<&str>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("RELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Deployments set the bare variable
            .set_override_option("telegram.bot_token", std::env::var("TELEGRAM_BOT_TOKEN").ok())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_url: DEFAULT_TELEGRAM_API.to_string(),
        }
    }
}
