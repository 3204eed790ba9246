use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use quire_core::pricing::{PricingProfile, TRIM_AWARE_PROFILE};
use quire_core::reference::ShippingRegion;

/// Config file looked up in the working directory (any format `config` reads)
pub const CONFIG_FILE: &str = "quire";

/// Environment prefix, e.g. `QUIRE__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "QUIRE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Built-in profile name, ignored when `profile_file` is set
    #[serde(default = "default_profile")]
    pub profile: String,
    /// TOML pricing profile to load instead of a built-in one
    #[serde(default)]
    pub profile_file: Option<PathBuf>,
    /// Ship every estimate at this region's per-kg rate
    #[serde(default)]
    pub shipping_region: Option<String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            profile: default_profile(),
            profile_file: None,
            shipping_region: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_profile() -> String {
    TRIM_AWARE_PROFILE.to_string()
}

impl Config {
    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the pricing profile every request is estimated with
    pub fn pricing_profile(&self) -> anyhow::Result<PricingProfile> {
        let profile = match &self.pricing.profile_file {
            Some(path) => PricingProfile::load(path)?,
            None => PricingProfile::builtin(&self.pricing.profile)?,
        };
        profile.validate()?;

        Ok(match &self.pricing.shipping_region {
            Some(key) => profile.with_shipping_region(ShippingRegion::by_key(key)?),
            None => profile,
        })
    }
}

/// Load `quire.*` (optional) overlaid with `QUIRE__*` environment variables
pub fn load_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

/// Parse a TOML config document without consulting the environment
pub fn config_from_toml(contents: &str) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Toml))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.trim().is_empty() {
        anyhow::bail!("server.host cannot be empty");
    }

    if cfg.server.port == 0 {
        anyhow::bail!("server.port must be between 1 and 65535");
    }

    if cfg.pricing.profile_file.is_none() && PricingProfile::builtin(&cfg.pricing.profile).is_err() {
        anyhow::bail!(
            "Unknown pricing.profile '{}' (expected one of: {})",
            cfg.pricing.profile,
            PricingProfile::builtin_names().join(", ")
        );
    }

    if let Some(region) = &cfg.pricing.shipping_region {
        if ShippingRegion::by_key(region).is_err() {
            anyhow::bail!("Unknown pricing.shipping_region '{}'", region);
        }
    }

    Ok(())
}
