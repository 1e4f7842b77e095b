// Layered runtime configuration: built-in defaults, then a TOML file, then
// EOPT_* environment variables (nested keys separated by "__").

use crate::network::{NetworkOptions, NetworkVariant};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "energy_optimizer.toml";
pub const ENV_PREFIX: &str = "EOPT_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_random_weights")]
    pub random_weights: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub variant: NetworkVariant,
}

fn default_random_weights() -> bool {
    true
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            random_weights: default_random_weights(),
            seed: None,
            variant: NetworkVariant::default(),
        }
    }
}

impl NetworkConfig {
    pub fn options(&self) -> NetworkOptions {
        NetworkOptions {
            random_weights: self.random_weights,
            variant: self.variant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allow_cors")]
    pub allow_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allow_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            allow_cors: default_allow_cors(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    pub fn tracing_level(&self) -> Result<tracing::Level, String> {
        self.level
            .parse::<tracing::Level>()
            .map_err(|_| format!("unknown log level '{}'", self.level))
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            network: NetworkConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Assemble the provider chain. `path` replaces the default config file.
pub fn figment(path: Option<&Path>) -> Figment {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    Figment::from(Serialized::defaults(OptimizerConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn load_config(path: Option<&Path>) -> Result<OptimizerConfig, figment::Error> {
    extract(figment(path))
}

/// Extract and validate a config from an arbitrary provider chain
pub fn extract(figment: Figment) -> Result<OptimizerConfig, figment::Error> {
    let config: OptimizerConfig = figment.extract()?;

    if config.server.port == 0 {
        return Err(figment::Error::from("server.port must be non-zero".to_string()));
    }
    if config.server.host.trim().is_empty() {
        return Err(figment::Error::from("server.host cannot be empty".to_string()));
    }
    config.logging.tracing_level().map_err(figment::Error::from)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = extract(Figment::from(Serialized::defaults(OptimizerConfig::default()))).unwrap();
        assert!(config.network.random_weights);
        assert_eq!(config.network.seed, None);
        assert_eq!(config.network.variant, NetworkVariant::Detailed);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.tracing_level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn toml_string_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(OptimizerConfig::default())).merge(Toml::string(
            r#"
            [network]
            random_weights = false
            seed = 7
            variant = "compact"

            [server]
            port = 9000
            "#,
        ));
        let config = extract(figment).unwrap();
        assert!(!config.network.random_weights);
        assert_eq!(config.network.seed, Some(7));
        assert_eq!(config.network.variant, NetworkVariant::Compact);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn zero_port_is_rejected() {
        let figment = Figment::from(Serialized::defaults(OptimizerConfig::default()))
            .merge(Toml::string("[server]\nport = 0\n"));
        assert!(extract(figment).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let figment = Figment::from(Serialized::defaults(OptimizerConfig::default()))
            .merge(Toml::string("[logging]\nlevel = \"loud\"\n"));
        let err = extract(figment).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn renders_as_toml() {
        let rendered = OptimizerConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[network]"));
        assert!(rendered.contains("variant = \"detailed\""));
        assert!(!rendered.contains("seed"));
    }
}
