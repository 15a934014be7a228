use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// The remote catalog/booking API.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Lifetimes of the short-lived entries that carry a selection between pages.
#[derive(Debug, Deserialize, Clone)]
pub struct NavigationConfig {
    #[serde(default = "default_handoff_ttl")]
    pub handoff_ttl_seconds: u64,
    #[serde(default = "default_checkout_ttl")]
    pub checkout_ttl_seconds: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            handoff_ttl_seconds: default_handoff_ttl(),
            checkout_ttl_seconds: default_checkout_ttl(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_handoff_ttl() -> u64 {
    900
}

fn default_checkout_ttl() -> u64 {
    1800
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `BOOKIT__API__BASE_URL=https://api.example.com`
            .add_source(config::Environment::with_prefix("BOOKIT").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults_fill_optional_sections() {
        let toml = r#"
            [server]
            port = 8080

            [api]
            base_url = "https://api.bookit.test"
        "#;
        let cfg: Config = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.api.base_url, "https://api.bookit.test");
        assert_eq!(cfg.api.timeout_seconds, 10);
        assert_eq!(cfg.navigation.handoff_ttl_seconds, 900);
        assert_eq!(cfg.navigation.checkout_ttl_seconds, 1800);
    }
}
