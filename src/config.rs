// ABOUTME: Configuration for the APOD fetcher
// ABOUTME: Loads settings from a YAML file, environment variables or a .env file

use dotenv::dotenv;
use log::{debug, warn};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::AppError;

/// Public APOD endpoint used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

pub const ENV_BASE_URL: &str = "APOD_BASE_URL";
pub const ENV_API_KEY: &str = "APOD_API_KEY";
pub const ENV_IMG_PATH: &str = "APOD_IMG_PATH";
pub const ENV_HD: &str = "APOD_HD";
pub const ENV_CONFIG: &str = "APOD_CONFIG";

#[derive(Clone, PartialEq)]
pub struct Config {
    /// Metadata endpoint, queried with `?api_key=<key>`
    pub base_url: String,
    pub api_key: String,
    /// Where the image is written; the extension selects the encoding
    pub output_path: PathBuf,
    /// Download `hdurl` instead of `url`
    pub hd: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid boolean value for environment variable {0}: {1}")]
    InvalidBool(String, String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to read config file {0}: {1}")]
    File(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}

/// Settings as they appear in the config file, before defaults are applied
#[derive(Default, Deserialize)]
struct PartialConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    output_path: Option<PathBuf>,
    hd: Option<bool>,
}

impl PartialConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration file: {}", path.display());
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::File(path.to_path_buf(), e))?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Overlay any environment variables that are set
    fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Ok(api_key) = env::var(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Ok(path) = env::var(ENV_IMG_PATH) {
            self.output_path = Some(PathBuf::from(path));
        }
        if let Ok(hd) = env::var(ENV_HD) {
            self.hd = Some(parse_bool(ENV_HD, &hd)?);
        }
        Ok(self)
    }

    fn finish(self) -> Result<Config, ConfigError> {
        let config = self.build()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply defaults without validating
    fn build(self) -> Result<Config, ConfigError> {
        let api_key = self
            .api_key
            .ok_or_else(|| ConfigError::MissingEnv(ENV_API_KEY.to_string()))?;

        let config = Config {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            output_path: self.output_path.unwrap_or_else(default_output_path),
            hd: self.hd.unwrap_or(true),
        };
        Ok(config)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool(name.to_string(), value.to_string())),
    }
}

/// Default image location: `apod.jpg` in the user's picture directory
pub fn default_output_path() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("apod.jpg")
}

impl Config {
    /// Create a configuration with the high-definition preference enabled
    pub fn new<B, K, P>(base_url: B, api_key: K, output_path: P) -> Self
    where
        B: Into<String>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        Config {
            base_url: base_url.into(),
            api_key: api_key.into(),
            output_path: output_path.into(),
            hd: true,
        }
    }

    /// Load configuration from environment variables
    ///
    /// If environment variables are not set, attempts to load from .env file
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_env_with_dotenv(true).map_err(AppError::Config)
    }

    /// Load configuration from environment variables with option to skip dotenv
    ///
    /// This is useful for testing where we don't want to load from .env
    pub fn from_env_with_dotenv(use_dotenv: bool) -> Result<Self, ConfigError> {
        load_dotenv(use_dotenv);
        let config = PartialConfig::default().with_env()?.finish()?;
        debug!("Configuration loaded from environment");
        Ok(config)
    }

    /// Load configuration from a YAML file, ignoring the environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        PartialConfig::read(path)?.finish()
    }

    /// Load configuration from the config file (if it exists) with
    /// environment variables taking precedence over file values
    pub fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(None, None)
    }

    /// Like [`Config::load`], with command-line values taking precedence
    /// over both the environment and the file
    ///
    /// Validation runs after the overrides are applied, so a valid override
    /// replaces an invalid file or environment value.
    pub fn load_with_overrides(
        output_path: Option<PathBuf>,
        hd: Option<bool>,
    ) -> Result<Self, AppError> {
        load_dotenv(true);

        let path = Self::get_config_file_path()?;
        let partial = if path.exists() {
            PartialConfig::read(&path)?
        } else {
            debug!("No config file at {}, using environment", path.display());
            PartialConfig::default()
        };

        let mut partial = partial.with_env()?;
        if output_path.is_some() {
            partial.output_path = output_path;
        }
        if hd.is_some() {
            partial.hd = hd;
        }

        let config = partial.finish()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Location of the YAML config file
    ///
    /// `APOD_CONFIG` overrides the default `<config dir>/apod-wallpaper/config.yaml`.
    pub fn get_config_file_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(ENV_CONFIG) {
            return Ok(PathBuf::from(path));
        }
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("apod-wallpaper").join("config.yaml"))
    }

    /// Check that the settings can be used for a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "base_url".to_string(),
                format!("'{}' is not an http(s) URL", self.base_url),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "api_key".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if let Err(e) = crate::wallpaper::output_format(&self.output_path) {
            return Err(ConfigError::InvalidValue(
                "output_path".to_string(),
                e.to_string(),
            ));
        }
        Ok(())
    }

    /// API key with all but the last four characters hidden, for display
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.api_key)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &self.masked_api_key())
            .field("output_path", &self.output_path)
            .field("hd", &self.hd)
            .finish()
    }
}

/// Hide all but the last four characters of a secret
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

fn load_dotenv(use_dotenv: bool) {
    // Tests set DOTENV_DISABLED to keep a developer's .env out of the picture
    let dotenv_disabled = env::var("DOTENV_DISABLED").is_ok();

    if use_dotenv && !dotenv_disabled {
        match dotenv() {
            Ok(_) => debug!("Loaded configuration from .env file"),
            Err(_) => warn!("No .env file found, using environment variables only"),
        }
    } else if dotenv_disabled {
        debug!("Dotenv loading disabled by DOTENV_DISABLED environment variable");
    }
}
