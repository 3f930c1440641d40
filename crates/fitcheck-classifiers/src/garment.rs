//! Keyword text classifier for garment descriptions

use crate::keywords::{KeywordGroup, KeywordTables};
use crate::matcher::KeywordMatcher;
use fitcheck_core::types::{MAX_LEVEL, MIN_LEVEL, NEUTRAL_LEVEL};
use fitcheck_core::{ClassificationResult, GarmentType, Result, Style, WeatherBand};
use std::collections::HashSet;
use std::time::Instant;
use tracing::debug;

/// Formality base when formal cues outnumber casual ones
const FORMAL_BASE: usize = 7;

/// Formality base when casual cues outnumber formal ones
const CASUAL_BASE: usize = 3;

/// Classifies free-text garment descriptions against fixed keyword tables.
///
/// Pure function of its tables: the same description always yields the same
/// result. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct GarmentClassifier {
    types: Vec<(GarmentType, KeywordMatcher)>,
    styles: Vec<(Style, KeywordMatcher)>,
    weather: Vec<(WeatherBand, KeywordMatcher)>,
    cold_wear: KeywordMatcher,
    hot_wear: KeywordMatcher,
    formal: KeywordMatcher,
    casual: KeywordMatcher,
    warm: KeywordMatcher,
    cool: KeywordMatcher,
    colors: ColorDetector,
    vocabulary: HashSet<String>,
}

impl GarmentClassifier {
    /// Compile the keyword tables into matchers
    pub fn new(tables: &KeywordTables) -> Result<Self> {
        Ok(Self {
            types: compile_groups(&tables.garment_types)?,
            styles: compile_groups(&tables.styles)?,
            weather: compile_groups(&tables.weather)?,
            cold_wear: KeywordMatcher::new(&tables.weather_defaults.cold_wear)?,
            hot_wear: KeywordMatcher::new(&tables.weather_defaults.hot_wear)?,
            formal: KeywordMatcher::new(&tables.formal)?,
            casual: KeywordMatcher::new(&tables.casual)?,
            warm: KeywordMatcher::new(&tables.warm)?,
            cool: KeywordMatcher::new(&tables.cool)?,
            colors: ColorDetector::new(&tables.colors, &tables.default_color)?,
            vocabulary: tables.vocabulary().map(str::to_lowercase).collect(),
        })
    }

    /// Classifier over the built-in tables
    pub fn with_defaults() -> Result<Self> {
        Self::new(&KeywordTables::default())
    }

    /// Classify a garment description
    pub fn classify(&self, description: &str) -> ClassificationResult {
        let start = Instant::now();
        let text = description.to_lowercase();

        let result = ClassificationResult {
            garment_type: self.detect_type(&text),
            styles: self.detect_styles(&text),
            weather_suitability: self.detect_weather(&text),
            formality_level: self.score_formality(&text),
            warmth_rating: self.score_warmth(&text),
            color: self.colors.detect(&text).to_string(),
            confidence: self.confidence(&text),
        };

        debug!(
            garment_type = result.type_label(),
            styles = result.styles.len(),
            formality = result.formality_level,
            warmth = result.warmth_rating,
            confidence = result.confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "Classified garment description"
        );

        result
    }

    /// First type in priority order with any keyword hit
    fn detect_type(&self, text: &str) -> Option<GarmentType> {
        self.types
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map(|(garment_type, _)| *garment_type)
    }

    fn detect_styles(&self, text: &str) -> Vec<Style> {
        self.styles
            .iter()
            .filter(|(_, matcher)| matcher.is_match(text))
            .map(|(style, _)| *style)
            .collect()
    }

    fn detect_weather(&self, text: &str) -> Vec<WeatherBand> {
        let bands: Vec<WeatherBand> = self
            .weather
            .iter()
            .filter(|(_, matcher)| matcher.is_match(text))
            .map(|(band, _)| *band)
            .collect();

        if !bands.is_empty() {
            bands
        } else if self.cold_wear.is_match(text) {
            vec![WeatherBand::Cool, WeatherBand::Cold]
        } else if self.hot_wear.is_match(text) {
            vec![WeatherBand::Hot, WeatherBand::Warm]
        } else {
            vec![WeatherBand::Mild]
        }
    }

    fn score_formality(&self, text: &str) -> u8 {
        let formal = self.formal.count_distinct(text);
        let casual = self.casual.count_distinct(text);

        if formal > casual {
            (FORMAL_BASE + formal).min(MAX_LEVEL as usize) as u8
        } else if casual > formal {
            CASUAL_BASE.saturating_sub(casual).max(MIN_LEVEL as usize) as u8
        } else {
            NEUTRAL_LEVEL
        }
    }

    fn score_warmth(&self, text: &str) -> u8 {
        let warm = self.warm.count_distinct(text) as i64;
        let cool = self.cool.count_distinct(text) as i64;

        (NEUTRAL_LEVEL as i64 + warm - cool).clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8
    }

    /// Keyword density: exact keyword words over all words, doubled
    fn confidence(&self, text: &str) -> f32 {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return 0.0;
        }

        let hits = words
            .iter()
            .filter(|word| self.vocabulary.contains(**word))
            .count();

        (hits as f32 / words.len() as f32 * 2.0).min(1.0)
    }
}

/// First-hit color detection over an ordered hint table
#[derive(Debug, Clone)]
pub struct ColorDetector {
    hints: Vec<(String, KeywordMatcher)>,
    default_color: String,
}

impl ColorDetector {
    pub fn new(hints: &[KeywordGroup<String>], default_color: &str) -> Result<Self> {
        Ok(Self {
            hints: compile_groups(hints)?,
            default_color: default_color.to_string(),
        })
    }

    /// Detector over the built-in hint table, defaulting to gray
    pub fn with_defaults() -> Result<Self> {
        let tables = KeywordTables::default();
        Self::new(&tables.colors, &tables.default_color)
    }

    /// First color whose hints occur in the text, else the default
    pub fn detect(&self, text: &str) -> &str {
        self.hints
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map_or(self.default_color.as_str(), |(color, _)| color.as_str())
    }
}

fn compile_groups<T: Clone>(groups: &[KeywordGroup<T>]) -> Result<Vec<(T, KeywordMatcher)>> {
    groups
        .iter()
        .map(|group| KeywordMatcher::new(&group.keywords).map(|m| (group.label.clone(), m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GarmentClassifier {
        GarmentClassifier::with_defaults().unwrap()
    }

    #[test]
    fn test_empty_description_is_neutral() {
        let result = classifier().classify("");

        assert_eq!(result.garment_type, None);
        assert_eq!(result.type_label(), "unknown");
        assert!(result.styles.is_empty());
        assert_eq!(result.weather_suitability, vec![WeatherBand::Mild]);
        assert_eq!(result.formality_level, 5);
        assert_eq!(result.warmth_rating, 5);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_gray_hoodie() {
        let result = classifier().classify("Cozy gray hoodie for relaxed weekends");

        assert_eq!(result.garment_type, Some(GarmentType::Hoodie));
        assert_eq!(result.styles, vec![Style::Casual]);
        assert_eq!(result.weather_suitability, vec![WeatherBand::Cool, WeatherBand::Cold]);
        // casual hits: relaxed, hoodie
        assert_eq!(result.formality_level, 1);
        assert_eq!(result.warmth_rating, 5);
        assert_eq!(result.color, "gray");
    }

    #[test]
    fn test_first_match_wins_for_type() {
        // "shirt" (t-shirt) outranks "jacket" in the priority list
        let result = classifier().classify("a jacket over a shirt");
        assert_eq!(result.garment_type, Some(GarmentType::TShirt));

        // substring semantics: "top" inside "laptop"
        let result = classifier().classify("laptop bag");
        assert_eq!(result.garment_type, Some(GarmentType::TShirt));
    }

    #[test]
    fn test_multiple_styles() {
        let result = classifier().classify("elegant retro minimalist dress");

        assert_eq!(result.garment_type, Some(GarmentType::Dress));
        assert_eq!(result.styles, vec![Style::Formal, Style::Vintage, Style::Minimalist]);
    }

    #[test]
    fn test_weather_keywords_and_defaults() {
        let c = classifier();

        let result = c.classify("waterproof rain boots");
        assert_eq!(result.weather_suitability, vec![WeatherBand::Rainy]);

        let result = c.classify("plain shorts");
        assert_eq!(result.weather_suitability, vec![WeatherBand::Hot, WeatherBand::Warm]);

        let result = c.classify("plain pants");
        assert_eq!(result.weather_suitability, vec![WeatherBand::Mild]);
    }

    #[test]
    fn test_formality_scoring() {
        let c = classifier();

        assert_eq!(c.classify("formal business suit").formality_level, 10);
        assert_eq!(c.classify("formal blazer").formality_level, 8);
        assert_eq!(c.classify("casual jeans").formality_level, 1);
        assert_eq!(c.classify("formal but casual").formality_level, 5);
    }

    #[test]
    fn test_warmth_scoring() {
        let c = classifier();

        assert_eq!(c.classify("thick insulated wool coat").warmth_rating, 8);
        assert_eq!(c.classify("light breathable linen").warmth_rating, 2);
        assert_eq!(c.classify("light cotton thick").warmth_rating, 4);
    }

    #[test]
    fn test_confidence_density() {
        let c = classifier();

        // one exact keyword out of two words
        assert_eq!(c.classify("blue hoodie").confidence, 1.0);
        // one of four words
        assert_eq!(c.classify("a very nice hoodie").confidence, 0.5);
        // "hoodies" is not an exact keyword word
        assert_eq!(c.classify("nice hoodies").confidence, 0.0);
    }

    #[test]
    fn test_color_detection() {
        let c = classifier();

        assert_eq!(c.classify("navy blazer").color, "blue");
        assert_eq!(c.classify("burgundy sweater").color, "red");
        assert_eq!(c.classify("plain tee").color, "gray");
    }

    #[test]
    fn test_custom_tables() {
        let tables = KeywordTables {
            garment_types: vec![KeywordGroup::new(GarmentType::Jacket, &["shirt"])],
            ..KeywordTables::default()
        };
        let c = GarmentClassifier::new(&tables).unwrap();

        assert_eq!(c.classify("shirt").garment_type, Some(GarmentType::Jacket));
        assert_eq!(c.classify("hoodie").garment_type, None);
    }
}
