use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::cli::CliArgs;
use super::error::ConfigError;
use super::logging::{LoggingConfig, LOG_LEVELS};

/// Prefix of the environment variables read on top of the YAML file.
pub const ENV_PREFIX: &str = "DTE_";

pub const DEFAULT_LISTEN_ADDRESS: &str = ":8080";
pub const DEFAULT_DRUID_URI: &str = "http://BROKER:8082/druid/v2/sql/";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct ConfigV1 {
    /// Address the metrics server binds, `:PORT` meaning every interface.
    pub listen_address: String,
    /// Druid SQL endpoint the task counts are queried from.
    pub druid_uri: String,
    #[serde(default)]
    pub on_query_error: QueryErrorPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What a scrape does when the Druid query fails.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QueryErrorPolicy {
    /// Log the error and terminate the process with a non-zero code.
    #[default]
    Exit,
    /// Log the error and answer the scrape with 503, keeping the process alive.
    Respond,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            druid_uri: DEFAULT_DRUID_URI.to_string(),
            on_query_error: QueryErrorPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ConfigV1 {
    /// The address handed to the TCP listener. The `:8080` shorthand binds all interfaces.
    pub fn bind_address(&self) -> String {
        if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid_uri = |reason: String| ConfigError::InvalidDruidUri {
            uri: self.druid_uri.clone(),
            reason,
        };
        let uri = self
            .druid_uri
            .parse::<http::Uri>()
            .map_err(|e| invalid_uri(e.to_string()))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(invalid_uri("expected an absolute http(s) URI".to_string()));
        }
        let level = self.logging.level.trim().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

/// Load the configuration: defaults, then the optional YAML file, then `DTE_*`
/// environment variables, then command-line flags.
pub fn load_config(args: &CliArgs) -> Result<ConfigV1, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::ConfigV1(
        ConfigV1::default(),
    )));
    if let Some(path) = &args.config {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.clone()));
        }
        figment = figment.merge(Yaml::file(path));
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
    resolve(figment, args)
}

/// Apply the command-line overrides on top of `figment` and extract a validated config.
pub fn resolve(figment: Figment, args: &CliArgs) -> Result<ConfigV1, ConfigError> {
    let mut figment = figment;
    if let Some(address) = &args.listen_address {
        figment = figment.merge(Serialized::default("listen_address", address));
    }
    if let Some(uri) = &args.druid_uri {
        figment = figment.merge(Serialized::default("druid_uri", uri));
    }
    if let Some(policy) = args.on_query_error {
        figment = figment.merge(Serialized::default("on_query_error", policy));
    }
    if let Some(level) = &args.log_level {
        figment = figment.merge(Serialized::default("logging.level", level));
    }
    if let Some(format) = args.log_format {
        figment = figment.merge(Serialized::default("logging.format", format));
    }

    let config = match figment.extract::<Config>()? {
        Config::ConfigV1(c) => c,
    };
    config.validate()?;
    Ok(config)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
