//! Normalization of garment analyses returned by an external model
//!
//! Model answers use free vocabulary ("navy", "sneaker", "Business casual").
//! Everything is mapped back onto the closed category, color, style and
//! weather sets before it reaches the rest of the system.

use crate::filename::{
    FilenameAnalyzer, GarmentAnalysis, GarmentCategory, DEFAULT_ITEM_NAME, HEURISTIC_CONFIDENCE,
};
use fitcheck_core::{ClassificationResult, Style, WeatherBand};
use serde::{Deserialize, Serialize};

const CATEGORY_SYNONYMS: &[(&str, GarmentCategory)] = &[
    ("top", GarmentCategory::Tops),
    ("t-shirt", GarmentCategory::Tops),
    ("tee", GarmentCategory::Tops),
    ("shirt", GarmentCategory::Tops),
    ("blouse", GarmentCategory::Tops),
    ("hoodie", GarmentCategory::Tops),
    ("sweater", GarmentCategory::Tops),
    ("jacket", GarmentCategory::Tops),
    ("coat", GarmentCategory::Tops),
    ("pant", GarmentCategory::Bottoms),
    ("pants", GarmentCategory::Bottoms),
    ("jean", GarmentCategory::Bottoms),
    ("jeans", GarmentCategory::Bottoms),
    ("trouser", GarmentCategory::Bottoms),
    ("short", GarmentCategory::Bottoms),
    ("shorts", GarmentCategory::Bottoms),
    ("skirt", GarmentCategory::Bottoms),
    ("dress", GarmentCategory::Dresses),
    ("gown", GarmentCategory::Dresses),
    ("shoe", GarmentCategory::Shoes),
    ("shoes", GarmentCategory::Shoes),
    ("sneaker", GarmentCategory::Shoes),
    ("sneakers", GarmentCategory::Shoes),
    ("boot", GarmentCategory::Shoes),
    ("boots", GarmentCategory::Shoes),
    ("sandal", GarmentCategory::Shoes),
    ("sandals", GarmentCategory::Shoes),
    ("accessory", GarmentCategory::Accessories),
    ("belt", GarmentCategory::Accessories),
    ("cap", GarmentCategory::Accessories),
    ("hat", GarmentCategory::Accessories),
    ("scarf", GarmentCategory::Accessories),
    ("watch", GarmentCategory::Accessories),
    ("glove", GarmentCategory::Accessories),
];

const COLOR_SYNONYMS: &[(&str, &str)] = &[
    ("navy", "blue"),
    ("denim", "blue"),
    ("sky blue", "blue"),
    ("teal", "blue"),
    ("grey", "gray"),
    ("charcoal", "gray"),
    ("silver", "gray"),
    ("beige", "brown"),
    ("tan", "brown"),
    ("khaki", "brown"),
    ("camel", "brown"),
    ("maroon", "red"),
    ("burgundy", "red"),
    ("violet", "purple"),
    ("lavender", "purple"),
    ("gold", "yellow"),
    ("mustard", "yellow"),
    ("magenta", "pink"),
    ("fuchsia", "pink"),
    ("orange", "orange"),
    ("black", "black"),
    ("white", "white"),
    ("red", "red"),
    ("blue", "blue"),
    ("green", "green"),
    ("yellow", "yellow"),
    ("purple", "purple"),
    ("pink", "pink"),
    ("brown", "brown"),
    ("gray", "gray"),
];

/// One string or a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Garment analysis as an external model returned it, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAnalysis {
    pub name: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub weather_suitability: Option<Vec<String>>,
    pub occasions: Option<OneOrMany>,
    pub occasion: Option<OneOrMany>,
    pub confidence: Option<f32>,
    pub description: Option<String>,
}

impl RawAnalysis {
    /// Map the raw answer onto the closed vocabularies.
    ///
    /// `filename` is the last resort for the color; `hints` supplies the
    /// color hint table.
    pub fn normalize(self, filename: &str, hints: &FilenameAnalyzer) -> GarmentAnalysis {
        let name = non_empty(self.name).unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string());
        let description = non_empty(self.description);

        let category = self
            .category
            .as_deref()
            .and_then(|c| normalize_category(c, &name, description.as_deref().unwrap_or("")))
            .unwrap_or_else(|| {
                infer_category(&format!("{} {}", name, description.as_deref().unwrap_or("")))
            });

        let color = self
            .color
            .as_deref()
            .and_then(normalize_color)
            .unwrap_or_else(|| hints.color(&filename.to_lowercase()))
            .to_string();

        let style = self
            .style
            .as_deref()
            .and_then(|s| s.trim().parse::<Style>().ok())
            .unwrap_or(Style::Casual);

        let mut weather_suitability: Vec<WeatherBand> = Vec::new();
        for band in self
            .weather_suitability
            .unwrap_or_default()
            .iter()
            .filter_map(|w| w.trim().parse::<WeatherBand>().ok())
        {
            if !weather_suitability.contains(&band) {
                weather_suitability.push(band);
            }
        }
        if weather_suitability.is_empty() {
            weather_suitability = vec![WeatherBand::Mild, WeatherBand::Warm];
        }

        let occasions = self
            .occasions
            .or(self.occasion)
            .map(OneOrMany::into_vec)
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| vec!["casual".to_string(), "everyday".to_string()]);

        let confidence = self
            .confidence
            .filter(|c| *c > 0.0 && c.is_finite())
            .map_or(HEURISTIC_CONFIDENCE, |c| c.min(1.0));

        GarmentAnalysis {
            name,
            category,
            color,
            style,
            weather_suitability,
            occasions,
            confidence,
            description: description
                .unwrap_or_else(|| "AI analysis with normalization".to_string()),
        }
    }
}

impl GarmentAnalysis {
    /// Merge with keyword labels into a [`ClassificationResult`].
    ///
    /// Type, formality and warmth come from `keywords`. The analysis leads
    /// the styles and supplies weather, color and confidence.
    pub fn into_classification(self, keywords: ClassificationResult) -> ClassificationResult {
        let mut styles = vec![self.style];
        styles.extend(keywords.styles.into_iter().filter(|s| *s != self.style));

        let weather_suitability = if self.weather_suitability.is_empty() {
            keywords.weather_suitability
        } else {
            self.weather_suitability
        };

        ClassificationResult {
            garment_type: keywords.garment_type,
            styles,
            weather_suitability,
            formality_level: keywords.formality_level,
            warmth_rating: keywords.warmth_rating,
            color: self.color,
            confidence: self.confidence,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Category from an explicit token or synonym; falls back to inference
fn normalize_category(raw: &str, name: &str, description: &str) -> Option<GarmentCategory> {
    let token = raw.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }
    GarmentCategory::from_token(&token)
        .or_else(|| {
            CATEGORY_SYNONYMS
                .iter()
                .find(|(synonym, _)| *synonym == token)
                .map(|(_, category)| *category)
        })
        .or_else(|| Some(infer_category(&format!("{} {}", name, description))))
}

/// First synonym contained in the text, else accessories
fn infer_category(text: &str) -> GarmentCategory {
    let text = text.to_lowercase();
    CATEGORY_SYNONYMS
        .iter()
        .find(|(synonym, _)| text.contains(synonym))
        .map_or(GarmentCategory::Accessories, |(_, category)| *category)
}

/// Base color for a free-text color: exact synonym, then containment
fn normalize_color(raw: &str) -> Option<&'static str> {
    let color = raw.trim().to_lowercase();
    if color.is_empty() {
        return None;
    }
    COLOR_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == color)
        .or_else(|| COLOR_SYNONYMS.iter().find(|(synonym, _)| color.contains(synonym)))
        .map(|(_, base)| *base)
}
