//! Keyword tables for the garment classifier
//!
//! The tables are plain configuration: built-in defaults cover the full
//! taxonomy, and a YAML file may replace any section. Every list of groups
//! is an explicit priority order; the classifier never depends on map
//! iteration order.

use fitcheck_core::{Error, GarmentType, Result, Style, WeatherBand};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A label together with the keywords that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup<T> {
    pub label: T,
    pub keywords: Vec<String>,
}

impl<T> KeywordGroup<T> {
    pub fn new(label: T, keywords: &[&str]) -> Self {
        Self {
            label,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// All keyword tables used by [`GarmentClassifier`](crate::GarmentClassifier)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// Type keywords in priority order; the first group with a hit wins
    pub garment_types: Vec<KeywordGroup<GarmentType>>,

    /// Style keywords; every group with a hit is reported
    pub styles: Vec<KeywordGroup<Style>>,

    /// Weather keywords; every group with a hit is reported
    pub weather: Vec<KeywordGroup<WeatherBand>>,

    /// Fallback suitability when no weather keyword hits
    pub weather_defaults: WeatherDefaults,

    /// Keywords that push formality up
    pub formal: Vec<String>,

    /// Keywords that push formality down
    pub casual: Vec<String>,

    /// Keywords that add warmth
    pub warm: Vec<String>,

    /// Keywords that remove warmth
    pub cool: Vec<String>,

    /// Color hints in priority order; the first group with a hit wins
    pub colors: Vec<KeywordGroup<String>>,

    /// Color reported when no hint matches
    pub default_color: String,
}

/// Secondary weather defaults keyed on garment words
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDefaults {
    /// Words that imply cool/cold wear
    pub cold_wear: Vec<String>,

    /// Words that imply hot/warm wear
    pub hot_wear: Vec<String>,
}

impl Default for WeatherDefaults {
    fn default() -> Self {
        Self {
            cold_wear: strings(&["hoodie", "sweater", "jacket"]),
            hot_wear: strings(&["t-shirt", "shorts", "sandals"]),
        }
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            garment_types: vec![
                KeywordGroup::new(GarmentType::Hoodie, &["hoodie", "hooded", "pullover"]),
                KeywordGroup::new(GarmentType::TShirt, &["t-shirt", "tee", "shirt", "top"]),
                KeywordGroup::new(GarmentType::Jeans, &["jeans", "denim"]),
                KeywordGroup::new(GarmentType::Shorts, &["shorts", "short pants"]),
                KeywordGroup::new(GarmentType::Jacket, &["jacket", "blazer", "coat"]),
                KeywordGroup::new(GarmentType::Sweater, &["sweater", "jumper", "cardigan"]),
                KeywordGroup::new(GarmentType::Dress, &["dress", "gown"]),
                KeywordGroup::new(GarmentType::Skirt, &["skirt", "mini", "maxi"]),
                KeywordGroup::new(GarmentType::Pants, &["pants", "trousers", "slacks"]),
                KeywordGroup::new(GarmentType::Sneakers, &["sneakers", "trainers", "athletic shoes"]),
                KeywordGroup::new(GarmentType::Boots, &["boots", "ankle boots", "hiking boots"]),
                KeywordGroup::new(GarmentType::Sandals, &["sandals", "flip flops", "slides"]),
            ],
            styles: vec![
                KeywordGroup::new(Style::Casual, &["casual", "relaxed", "comfortable", "everyday"]),
                KeywordGroup::new(Style::Formal, &["formal", "business", "professional", "elegant"]),
                KeywordGroup::new(Style::Sporty, &["sporty", "athletic", "active", "gym"]),
                KeywordGroup::new(Style::Trendy, &["trendy", "fashionable", "stylish", "modern"]),
                KeywordGroup::new(Style::Vintage, &["vintage", "retro", "classic", "old-school"]),
                KeywordGroup::new(Style::Minimalist, &["minimalist", "simple", "clean", "basic"]),
            ],
            weather: vec![
                KeywordGroup::new(WeatherBand::Hot, &["summer", "hot", "breathable", "light", "cooling"]),
                KeywordGroup::new(WeatherBand::Warm, &["warm", "spring", "light"]),
                KeywordGroup::new(WeatherBand::Mild, &["mild", "transitional", "layering"]),
                KeywordGroup::new(WeatherBand::Cool, &["cool", "fall", "autumn", "light jacket"]),
                KeywordGroup::new(WeatherBand::Cold, &["winter", "cold", "thick", "insulated", "warm"]),
                KeywordGroup::new(WeatherBand::Rainy, &["waterproof", "rain", "water-resistant"]),
                KeywordGroup::new(WeatherBand::Snowy, &["snow", "insulated", "thermal", "heavy"]),
            ],
            weather_defaults: WeatherDefaults::default(),
            formal: strings(&["formal", "business", "professional", "suit", "dress shirt"]),
            casual: strings(&["casual", "relaxed", "hoodie", "jeans", "t-shirt"]),
            warm: strings(&["thick", "insulated", "wool", "fleece", "down", "winter"]),
            cool: strings(&["light", "breathable", "cotton", "linen", "summer"]),
            colors: default_color_hints(),
            default_color: "gray".to_string(),
        }
    }
}

impl KeywordTables {
    /// Load from YAML string; missing sections keep their defaults
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            Error::config(format!("Failed to parse keyword tables {}: {}", path.display(), e))
        })
    }

    /// Every type and style keyword, used for the confidence heuristic
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.garment_types
            .iter()
            .flat_map(|g| g.keywords.iter())
            .chain(self.styles.iter().flat_map(|g| g.keywords.iter()))
            .map(String::as_str)
    }
}

/// Color hints shared by description and filename analysis
pub fn default_color_hints() -> Vec<KeywordGroup<String>> {
    let table: [(&str, &[&str]); 11] = [
        ("yellow", &["yellow", "golden", "mustard", "lemon"]),
        ("blue", &["blue", "navy", "royal", "sky", "denim"]),
        ("red", &["red", "crimson", "scarlet", "cherry", "maroon", "burgundy"]),
        ("green", &["green", "forest", "lime", "olive"]),
        ("black", &["black", "charcoal", "dark"]),
        ("white", &["white", "cream", "ivory"]),
        ("purple", &["purple", "violet", "lavender"]),
        ("orange", &["orange", "peach", "coral"]),
        ("pink", &["pink", "rose", "magenta", "fuchsia"]),
        ("brown", &["brown", "tan", "beige", "khaki", "camel"]),
        ("gray", &["gray", "grey", "silver"]),
    ];

    table
        .iter()
        .map(|(color, hints)| KeywordGroup::new(color.to_string(), hints))
        .collect()
}

pub(crate) fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_type_priority_follows_declaration_order() {
        let tables = KeywordTables::default();
        let order: Vec<GarmentType> = tables.garment_types.iter().map(|g| g.label).collect();
        assert_eq!(order, GarmentType::ALL.to_vec());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
default_color: "unknown"
formal:
  - tuxedo
"#;
        let tables = KeywordTables::from_yaml(yaml).unwrap();
        assert_eq!(tables.default_color, "unknown");
        assert_eq!(tables.formal, vec!["tuxedo".to_string()]);
        assert_eq!(tables.garment_types.len(), 12);
        assert_eq!(tables.styles.len(), 6);
    }

    #[test]
    fn test_yaml_groups_use_wire_tokens() {
        let yaml = r#"
garment_types:
  - label: t-shirt
    keywords: [tee]
  - label: hoodie
    keywords: [hoodie]
"#;
        let tables = KeywordTables::from_yaml(yaml).unwrap();
        assert_eq!(tables.garment_types[0].label, GarmentType::TShirt);
        assert_eq!(tables.garment_types.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = KeywordTables::from_file("/nonexistent/keywords.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
