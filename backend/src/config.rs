//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use verstamp_types::{HandlerConfig, VersionInfo, DEFAULT_HEADER_PREFIX};

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    endpoint: EndpointConfig,
    #[serde(default)]
    build: BuildOverrides,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_host")]
    host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_port() -> u16 {
    verstamp_types::DEFAULT_PORT
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_path() -> String {
    "/version".to_string()
}

fn default_header_prefix() -> String {
    DEFAULT_HEADER_PREFIX.to_string()
}

/// Version endpoint settings (`[endpoint]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Route of the JSON endpoint; `/text` and `/simple` are mounted below it.
    #[serde(default = "default_path")]
    pub path: String,
    /// Pretty-print JSON responses
    #[serde(default)]
    pub pretty: bool,
    /// Add version headers to version endpoint responses
    #[serde(default)]
    pub include_headers: bool,
    /// Prefix for version headers
    #[serde(default = "default_header_prefix")]
    pub header_prefix: String,
    /// Add version headers to every response, not only the version endpoints
    #[serde(default)]
    pub headers_middleware: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            pretty: false,
            include_headers: false,
            header_prefix: default_header_prefix(),
            headers_middleware: false,
        }
    }
}

impl EndpointConfig {
    /// Endpoint path with a leading slash and no trailing slash.
    pub fn normalized_path(&self) -> String {
        let trimmed = self.path.trim().trim_matches('/');
        format!("/{}", trimmed)
    }

    /// Path of a route nested below the endpoint, e.g. `/version/text`.
    pub fn sub_path(&self, suffix: &str) -> String {
        let base = self.normalized_path();
        if base == "/" {
            format!("/{}", suffix)
        } else {
            format!("{}/{}", base, suffix)
        }
    }

    /// Handler configuration serving `info`.
    pub fn handler_config(&self, info: Arc<VersionInfo>) -> HandlerConfig {
        HandlerConfig::default()
            .with_info(info)
            .pretty(self.pretty)
            .include_headers(self.include_headers)
            .header_prefix(self.header_prefix.clone())
    }
}

/// Runtime overrides for the compiled-in build values (`[build]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuildOverrides {
    pub version: Option<String>,
    pub commit: Option<String>,
    pub build_date: Option<String>,
    pub branch: Option<String>,
}

/// Values given on the command line; they take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub pretty: Option<bool>,
    pub include_headers: Option<bool>,
    pub header_prefix: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Address to bind to
    pub host: String,
    /// Version endpoint settings
    pub endpoint: EndpointConfig,
    /// Overrides for the served version information
    pub build: BuildOverrides,
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    pub log_file: Option<PathBuf>,
    /// Log level (if set, overrides RUST_LOG environment variable)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `config.toml` in user config directory (~/.config/verstamp/ on Linux)
    /// 2. `.verstamp.toml` in current directory
    /// 3. The file given with `--config-path`
    ///
    /// Environment variables use the `VERSTAMP_` prefix with `__` between
    /// section and key, e.g. `VERSTAMP_ENDPOINT__HEADER_PREFIX=X-App-`.
    pub fn from_figment(cli: CliOverrides) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir()
            .ok()
            .map(|d| d.join(".verstamp.toml"));
        let user_config = directories::ProjectDirs::from("", "", "verstamp")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // Build figment with priority: defaults < user config < local config < env vars < CLI args
        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile::default()));

        for path in [user_config, local_config, cli.config_path.clone()]
            .into_iter()
            .flatten()
        {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("VERSTAMP_").split("__"));

        if let Some(p) = cli.port {
            figment = figment.merge(Serialized::default("server.port", p));
        }
        if let Some(ref h) = cli.host {
            figment = figment.merge(Serialized::default("server.host", h));
        }
        if let Some(p) = cli.pretty {
            figment = figment.merge(Serialized::default("endpoint.pretty", p));
        }
        if let Some(i) = cli.include_headers {
            figment = figment.merge(Serialized::default("endpoint.include_headers", i));
        }
        if let Some(ref p) = cli.header_prefix {
            figment = figment.merge(Serialized::default("endpoint.header_prefix", p));
        }

        let config_file: ConfigFile = figment.extract()?;
        Ok(Self::from_file(config_file))
    }

    fn from_file(config_file: ConfigFile) -> Self {
        Self {
            port: config_file.server.port,
            host: config_file.server.host,
            endpoint: config_file.endpoint,
            build: config_file.build,
            log_file: config_file.logging.log_file,
            log_level: config_file.logging.log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(ConfigFile::default())
    }
}
