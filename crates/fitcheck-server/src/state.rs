//! Shared application state

use crate::advisor::{GeminiClient, StyleAdvisor};
use crate::config::ServerConfig;
use crate::weather::{OpenWeatherClient, WeatherProvider};
use fitcheck_classifiers::{
    ColorDetector, FilenameAnalyzer, GarmentClassifier, KeywordTables, RequestCues, RequestParser,
};
use fitcheck_core::Result;
use fitcheck_engine::{OutfitEngine, RuleSet, WardrobeStore};
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<ServerConfig>,

    /// Keyword garment classifier
    pub classifier: Arc<GarmentClassifier>,

    /// Free-text outfit request parser
    pub parser: Arc<RequestParser>,

    /// Filename heuristics and color hints for photo uploads
    pub filenames: Arc<FilenameAnalyzer>,

    /// Loaded outfit rules
    pub rules: Arc<RuleSet>,

    /// Outfit engine; the lock also serializes use of its random source
    pub engine: Arc<Mutex<OutfitEngine>>,

    /// The wardrobe
    pub wardrobe: Arc<WardrobeStore>,

    /// External style advisor, when configured
    pub advisor: Option<Arc<dyn StyleAdvisor>>,

    /// External weather provider, when configured
    pub weather: Option<Arc<dyn WeatherProvider>>,

    /// Prometheus handle for rendering `/metrics`
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Build every component from configuration.
    ///
    /// Fails only when an override file is unreadable or invalid.
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Result<Self> {
        let tables = match &config.keywords_path {
            Some(path) => KeywordTables::from_file(path)?,
            None => KeywordTables::default(),
        };
        let cues = match &config.cues_path {
            Some(path) => RequestCues::from_file(path)?,
            None => RequestCues::default(),
        };
        let rules = Arc::new(match &config.rules_path {
            Some(path) => RuleSet::from_file(path)?,
            None => RuleSet::default(),
        });

        let classifier = GarmentClassifier::new(&tables)?;
        let parser = RequestParser::new(&cues)?;
        let colors = ColorDetector::new(&tables.colors, &tables.default_color)?;
        let filenames = FilenameAnalyzer::new(colors)?;

        let engine = match config.rng_seed {
            Some(seed) => OutfitEngine::seeded(rules.clone(), seed),
            None => OutfitEngine::from_entropy(rules.clone()),
        };

        let wardrobe = if config.seed_sample {
            WardrobeStore::with_sample()
        } else {
            WardrobeStore::new()
        };

        let advisor: Option<Arc<dyn StyleAdvisor>> = match config.active_advisor_key() {
            Some(key) => Some(Arc::new(GeminiClient::new(&config.advisor, key)?)),
            None => None,
        };
        let weather: Option<Arc<dyn WeatherProvider>> = match config.active_weather_key() {
            Some(key) => Some(Arc::new(OpenWeatherClient::new(&config.weather, key)?)),
            None => None,
        };

        info!(
            mode = config.mode.as_str(),
            wardrobe_items = wardrobe.len(),
            weather_rules = rules.weather.len(),
            vibe_rules = rules.vibes.len(),
            advisor = advisor.is_some(),
            weather_provider = weather.is_some(),
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            parser: Arc::new(parser),
            filenames: Arc::new(filenames),
            rules,
            engine: Arc::new(Mutex::new(engine)),
            wardrobe: Arc::new(wardrobe),
            advisor,
            weather,
            metrics_handle,
        })
    }

    /// Replace the style advisor
    pub fn with_advisor(mut self, advisor: Arc<dyn StyleAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Replace the weather provider
    pub fn with_weather(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }
}
