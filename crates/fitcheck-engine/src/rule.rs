//! Outfit rules keyed by weather band and by vibe

use fitcheck_core::types::{MAX_LEVEL, MIN_LEVEL};
use fitcheck_core::{Error, GarmentRecord, GarmentType, Result, Style, WeatherBand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Constraints applied to candidate garments.
///
/// Every bound is optional; an absent bound never filters. An empty rule
/// lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutfitRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preferred_types: Vec<GarmentType>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avoid_types: Vec<GarmentType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_formality: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_formality: Option<u8>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preferred_styles: Vec<Style>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avoid_styles: Vec<Style>,

    /// Advisory warmth floor (weather rules only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_warmth: Option<u8>,

    /// Advisory warmth ceiling (weather rules only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_warmth: Option<u8>,
}

impl OutfitRule {
    /// Whether a garment passes the formality, type and style constraints.
    ///
    /// `preferred_types` and the warmth bounds are advisory and not checked.
    pub fn admits(&self, item: &GarmentRecord) -> bool {
        if self.min_formality.is_some_and(|min| item.formality_level < min) {
            return false;
        }
        if self.max_formality.is_some_and(|max| item.formality_level > max) {
            return false;
        }
        if self.avoid_types.contains(&item.garment_type) {
            return false;
        }
        if !self.preferred_styles.is_empty() && !self.preferred_styles.contains(&item.style) {
            return false;
        }
        !self.avoid_styles.contains(&item.style)
    }

    fn validate(&self, name: &str) -> Result<()> {
        for (label, bound) in [
            ("min_formality", self.min_formality),
            ("max_formality", self.max_formality),
            ("min_warmth", self.min_warmth),
            ("max_warmth", self.max_warmth),
        ] {
            if let Some(value) = bound {
                if !(MIN_LEVEL..=MAX_LEVEL).contains(&value) {
                    return Err(Error::rules(format!(
                        "rule '{}': {} {} is outside 1-10",
                        name, label, value
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_formality, self.max_formality) {
            if min > max {
                return Err(Error::rules(format!(
                    "rule '{}': min_formality {} exceeds max_formality {}",
                    name, min, max
                )));
            }
        }
        Ok(())
    }
}

/// The complete rule configuration: weather rules and vibe rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Rules per weather band
    pub weather: BTreeMap<WeatherBand, OutfitRule>,

    /// Rules per lower-cased vibe name
    pub vibes: BTreeMap<String, OutfitRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        let business_types = vec![GarmentType::Jacket, GarmentType::Pants, GarmentType::TShirt];

        let mut weather = BTreeMap::new();
        weather.insert(
            WeatherBand::Hot,
            OutfitRule {
                preferred_types: vec![GarmentType::TShirt, GarmentType::Shorts, GarmentType::Dress],
                avoid_types: vec![GarmentType::Hoodie, GarmentType::Jacket, GarmentType::Boots],
                max_warmth: Some(4),
                ..OutfitRule::default()
            },
        );
        weather.insert(
            WeatherBand::Cold,
            OutfitRule {
                preferred_types: vec![GarmentType::Hoodie, GarmentType::Jacket, GarmentType::Boots],
                avoid_types: vec![GarmentType::Shorts, GarmentType::Sandals],
                min_warmth: Some(6),
                ..OutfitRule::default()
            },
        );

        let mut vibes = BTreeMap::new();
        vibes.insert(
            "casual".to_string(),
            OutfitRule {
                preferred_styles: vec![Style::Casual],
                max_formality: Some(6),
                ..OutfitRule::default()
            },
        );
        vibes.insert(
            "professional".to_string(),
            OutfitRule {
                preferred_styles: vec![Style::Formal],
                min_formality: Some(7),
                preferred_types: business_types.clone(),
                avoid_types: vec![GarmentType::Hoodie, GarmentType::Shorts],
                ..OutfitRule::default()
            },
        );
        vibes.insert(
            "business".to_string(),
            OutfitRule {
                preferred_styles: vec![Style::Formal],
                min_formality: Some(8),
                preferred_types: business_types,
                avoid_types: vec![GarmentType::Hoodie, GarmentType::Shorts, GarmentType::Jeans],
                ..OutfitRule::default()
            },
        );
        vibes.insert(
            "trendy".to_string(),
            OutfitRule {
                preferred_styles: vec![Style::Trendy],
                avoid_styles: vec![Style::Vintage],
                min_formality: Some(5),
                ..OutfitRule::default()
            },
        );
        vibes.insert(
            "sporty".to_string(),
            OutfitRule {
                preferred_styles: vec![Style::Sporty, Style::Casual],
                max_formality: Some(4),
                ..OutfitRule::default()
            },
        );

        Self { weather, vibes }
    }
}

impl RuleSet {
    /// A rule set with no rules at all
    pub fn empty() -> Self {
        Self {
            weather: BTreeMap::new(),
            vibes: BTreeMap::new(),
        }
    }

    /// Load from YAML string. Vibe names are lower-cased and bounds checked.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RuleSet = serde_yaml::from_str(yaml)
            .map_err(|e| Error::rules(format!("Failed to parse rules: {}", e)))?;
        raw.normalized()
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    fn normalized(self) -> Result<Self> {
        for (band, rule) in &self.weather {
            rule.validate(band.as_str())?;
        }
        for (vibe, rule) in &self.vibes {
            rule.validate(vibe)?;
        }

        let mut vibes = BTreeMap::new();
        for (vibe, rule) in self.vibes {
            let key = vibe.to_lowercase();
            if vibes.contains_key(&key) {
                return Err(Error::rules(format!(
                    "vibe '{}' is defined more than once (keys are case-insensitive)",
                    key
                )));
            }
            vibes.insert(key, rule);
        }

        Ok(Self {
            weather: self.weather,
            vibes,
        })
    }

    /// Rule for a vibe, looked up case-insensitively
    pub fn vibe_rule(&self, vibe: &str) -> Option<&OutfitRule> {
        self.vibes.get(&vibe.to_lowercase())
    }

    /// Rule for a weather band
    pub fn weather_rule(&self, band: WeatherBand) -> Option<&OutfitRule> {
        self.weather.get(&band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(style: Style, garment_type: GarmentType, formality: u8) -> GarmentRecord {
        GarmentRecord::new("item", garment_type, style, [WeatherBand::Mild], "black")
            .with_formality(formality)
    }

    #[test]
    fn test_empty_rule_admits_everything() {
        let rule = OutfitRule::default();
        assert!(rule.admits(&record(Style::Vintage, GarmentType::Skirt, 1)));
        assert!(rule.admits(&record(Style::Formal, GarmentType::Jacket, 10)));
    }

    #[test]
    fn test_business_rule() {
        let rules = RuleSet::default();
        let rule = rules.vibe_rule("Business").unwrap();

        assert!(rule.admits(&record(Style::Formal, GarmentType::Pants, 8)));
        assert!(!rule.admits(&record(Style::Formal, GarmentType::Pants, 7)));
        assert!(!rule.admits(&record(Style::Formal, GarmentType::Jeans, 9)));
        assert!(!rule.admits(&record(Style::Trendy, GarmentType::Jacket, 9)));
    }

    #[test]
    fn test_trendy_avoids_vintage() {
        let rules = RuleSet::default();
        let rule = rules.vibe_rule("trendy").unwrap();

        assert!(rule.admits(&record(Style::Trendy, GarmentType::Jeans, 6)));
        assert!(!rule.admits(&record(Style::Trendy, GarmentType::Jeans, 4)));
        assert!(!rule.admits(&record(Style::Vintage, GarmentType::Jeans, 6)));
    }

    #[test]
    fn test_weather_rules_are_advisory() {
        let rules = RuleSet::default();
        let hot = rules.weather_rule(WeatherBand::Hot).unwrap();

        assert_eq!(hot.max_warmth, Some(4));
        assert!(rules.weather_rule(WeatherBand::Snowy).is_none());
    }

    #[test]
    fn test_yaml_round_trip_through_defaults() {
        let yaml = serde_yaml::to_string(&RuleSet::default()).unwrap();
        let parsed = RuleSet::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, RuleSet::default());
    }

    #[test]
    fn test_yaml_vibes_are_lowercased() {
        let yaml = r#"
vibes:
  Cozy:
    preferred_styles: [casual]
    min_warmth: 6
"#;
        let rules = RuleSet::from_yaml(yaml).unwrap();
        assert!(rules.vibe_rule("cozy").is_some());
        assert!(rules.vibe_rule("COZY").is_some());
        // sections absent from the file keep their defaults
        assert!(rules.weather_rule(WeatherBand::Hot).is_some());
        assert!(rules.vibe_rule("business").is_none());
    }

    #[test]
    fn test_vibe_keys_differing_in_case_rejected() {
        let yaml = r#"
vibes:
  Casual:
    max_formality: 6
  casual:
    max_formality: 4
"#;
        match RuleSet::from_yaml(yaml) {
            Err(Error::Rules(msg)) => assert!(msg.contains("casual")),
            other => panic!("expected a rules error, got {:?}", other),
        }

        let yaml = r#"
vibes:
  Trendy:
    min_formality: 5
"#;
        let rules = RuleSet::from_yaml(yaml).unwrap();
        assert!(rules.vibe_rule("trendy").is_some());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let yaml = r#"
vibes:
  broken:
    min_formality: 9
    max_formality: 3
"#;
        assert!(matches!(RuleSet::from_yaml(yaml), Err(Error::Rules(_))));

        let yaml = r#"
vibes:
  broken:
    max_formality: 12
"#;
        assert!(matches!(RuleSet::from_yaml(yaml), Err(Error::Rules(_))));
    }
}
