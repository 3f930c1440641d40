//! Core record and result types for FitCheck

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::taxonomy::{GarmentType, Style, WeatherBand, FORMAL_THRESHOLD};

/// Lowest valid formality or warmth value
pub const MIN_LEVEL: u8 = 1;

/// Highest valid formality or warmth value
pub const MAX_LEVEL: u8 = 10;

/// Neutral formality/warmth used when nothing tips the score
pub const NEUTRAL_LEVEL: u8 = 5;

/// A single wardrobe item.
///
/// Records are never edited once built; replace them instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentRecord {
    /// Display label (not a unique key)
    pub name: String,

    /// Garment type
    #[serde(rename = "type")]
    pub garment_type: GarmentType,

    /// Garment style
    pub style: Style,

    /// Weather bands this garment suits (non-empty)
    pub weather_suitability: Vec<WeatherBand>,

    /// Free-text color
    pub color: String,

    /// Season tags such as "all" or "winter"
    #[serde(default = "default_season")]
    pub season: Vec<String>,

    /// Formality, 1-10
    pub formality_level: u8,

    /// Insulating value, 1-10
    pub warmth_rating: u8,
}

impl GarmentRecord {
    /// Create a record with neutral formality and warmth and an "all" season
    pub fn new(
        name: impl Into<String>,
        garment_type: GarmentType,
        style: Style,
        weather_suitability: impl IntoIterator<Item = WeatherBand>,
        color: impl Into<String>,
    ) -> Self {
        let mut bands: Vec<WeatherBand> = Vec::new();
        for band in weather_suitability {
            if !bands.contains(&band) {
                bands.push(band);
            }
        }

        Self {
            name: name.into(),
            garment_type,
            style,
            weather_suitability: bands,
            color: color.into(),
            season: default_season(),
            formality_level: NEUTRAL_LEVEL,
            warmth_rating: NEUTRAL_LEVEL,
        }
    }

    /// Set the season tags
    pub fn with_season<I, S>(mut self, season: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.season = season.into_iter().map(Into::into).collect();
        self
    }

    /// Set the formality level, clamped to 1-10
    pub fn with_formality(mut self, level: u8) -> Self {
        self.formality_level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        self
    }

    /// Set the warmth rating, clamped to 1-10
    pub fn with_warmth(mut self, rating: u8) -> Self {
        self.warmth_rating = rating.clamp(MIN_LEVEL, MAX_LEVEL);
        self
    }

    /// Whether this garment suits the given band
    pub fn suits(&self, band: WeatherBand) -> bool {
        self.weather_suitability.contains(&band)
    }

    /// Whether this garment counts as formal (formality >= 7)
    pub fn is_formal(&self) -> bool {
        self.formality_level >= FORMAL_THRESHOLD
    }

    /// Check the record invariants for records that arrive from outside
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_record("name must not be empty"));
        }
        if self.weather_suitability.is_empty() {
            return Err(Error::invalid_record(format!(
                "'{}' must suit at least one weather band",
                self.name
            )));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.formality_level) {
            return Err(Error::invalid_record(format!(
                "formality_level {} is outside 1-10",
                self.formality_level
            )));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.warmth_rating) {
            return Err(Error::invalid_record(format!(
                "warmth_rating {} is outside 1-10",
                self.warmth_rating
            )));
        }
        Ok(())
    }
}

fn default_season() -> Vec<String> {
    vec!["all".to_string()]
}

/// Labels produced by classifying a garment description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected type; `None` is reported as "unknown"
    #[serde(rename = "type", with = "detected_type")]
    pub garment_type: Option<GarmentType>,

    /// Every style with a keyword hit (may be empty)
    pub styles: Vec<Style>,

    /// Weather bands the garment suits
    pub weather_suitability: Vec<WeatherBand>,

    /// Formality, 1-10
    pub formality_level: u8,

    /// Warmth, 1-10
    pub warmth_rating: u8,

    /// Detected color
    pub color: String,

    /// Keyword density heuristic in [0, 1]; not a calibrated probability
    pub confidence: f32,
}

impl ClassificationResult {
    /// Label for the detected type ("unknown" when none)
    pub fn type_label(&self) -> &'static str {
        self.garment_type.map_or("unknown", |t| t.as_str())
    }

    /// Build a wardrobe record from these labels.
    ///
    /// Returns `None` when no garment type was detected. The first detected
    /// style is used, defaulting to casual.
    pub fn to_record(&self, name: impl Into<String>) -> Option<GarmentRecord> {
        let garment_type = self.garment_type?;
        let style = self.styles.first().copied().unwrap_or(Style::Casual);

        Some(
            GarmentRecord::new(
                name,
                garment_type,
                style,
                self.weather_suitability.iter().copied(),
                self.color.clone(),
            )
            .with_formality(self.formality_level)
            .with_warmth(self.warmth_rating),
        )
    }
}

/// Structured outfit request extracted from free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRequest {
    pub weather: WeatherBand,
    pub vibe: String,
    pub occasion: String,
}

impl Default for OutfitRequest {
    fn default() -> Self {
        Self {
            weather: WeatherBand::DEFAULT,
            vibe: "casual".to_string(),
            occasion: "general".to_string(),
        }
    }
}

mod detected_type {
    use super::GarmentType;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<GarmentType>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.map_or("unknown", |t| t.as_str()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<GarmentType>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(raw.parse::<GarmentType>().ok())
    }
}
