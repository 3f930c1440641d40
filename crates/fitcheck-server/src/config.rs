//! Server configuration
//!
//! Values come from a YAML file (every field optional), then environment
//! variables for credentials, then CLI flags. Later sources win.

use crate::cli::Cli;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variables checked for the advisor key, in order
pub const GEMINI_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

/// Environment variables checked for the weather key, in order
pub const WEATHER_KEY_VARS: [&str; 2] = ["OPENWEATHER_API_KEY", "VITE_WEATHER_API_KEY"];

/// Whether external providers may be consulted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Use the advisor and weather provider when credentials exist
    #[default]
    Ai,

    /// Never call out; every answer comes from the local core
    Demo,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Demo => "demo",
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub mode: Mode,

    /// Preload the demo wardrobe at startup
    pub seed_sample: bool,

    /// Fixed outfit RNG seed; entropy-seeded when absent
    pub rng_seed: Option<u64>,

    /// Keyword table overrides for the garment classifier
    pub keywords_path: Option<PathBuf>,

    /// Cue overrides for the request parser
    pub cues_path: Option<PathBuf>,

    /// Outfit rule overrides
    pub rules_path: Option<PathBuf>,

    pub advisor: AdvisorConfig,
    pub weather: WeatherConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            seed_sample: true,
            rng_seed: None,
            keywords_path: None,
            cues_path: None,
            rules_path: None,
            advisor: AdvisorConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

/// Gemini style advisor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 30,
        }
    }
}

/// OpenWeather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_city: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "http://api.openweathermap.org/data/2.5".to_string(),
            default_city: "London".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file, environment and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path))?
        } else {
            warn!(path = config_path, "Config file not found, using defaults");
            Self::default()
        };

        if config.advisor.api_key.is_none() {
            config.advisor.api_key = first_env(&GEMINI_KEY_VARS);
        }
        if config.weather.api_key.is_none() {
            config.weather.api_key = first_env(&WEATHER_KEY_VARS);
        }

        config.apply_cli(cli);

        info!(
            mode = config.mode.as_str(),
            advisor_key = config.advisor.api_key.is_some(),
            weather_key = config.weather.api_key.is_some(),
            "Configuration resolved"
        );
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(key) = &cli.gemini_api_key {
            self.advisor.api_key = Some(key.clone());
        }
        if let Some(key) = &cli.weather_api_key {
            self.weather.api_key = Some(key.clone());
        }
        if let Some(seed) = cli.seed {
            self.rng_seed = Some(seed);
        }
    }

    /// Advisor key, only when the mode allows calling out
    pub fn active_advisor_key(&self) -> Option<&str> {
        match self.mode {
            Mode::Ai => non_blank(self.advisor.api_key.as_deref()),
            Mode::Demo => None,
        }
    }

    /// Weather key, only when the mode allows calling out
    pub fn active_weather_key(&self) -> Option<&str> {
        match self.mode {
            Mode::Ai => non_blank(self.weather.api_key.as_deref()),
            Mode::Demo => None,
        }
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
