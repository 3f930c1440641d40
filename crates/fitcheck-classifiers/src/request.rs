//! Natural-language outfit request parser
//!
//! A plain keyword scan that turns "something cosy for a rainy office day"
//! into a weather band, a vibe and an occasion. Each field is scanned
//! independently; within a field the first cue group with a hit wins.

use crate::keywords::{strings, KeywordGroup};
use crate::matcher::KeywordMatcher;
use fitcheck_core::{Error, OutfitRequest, Result, WeatherBand};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A vibe cue group, optionally narrowed by a second keyword set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeCue {
    pub label: String,
    pub keywords: Vec<String>,

    /// Replaces `label` when any of its keywords also occur
    #[serde(default)]
    pub refine: Option<KeywordGroup<String>>,
}

impl VibeCue {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: strings(keywords),
            refine: None,
        }
    }
}

/// Cue tables for the request parser, in priority order per field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestCues {
    pub weather: Vec<KeywordGroup<WeatherBand>>,
    pub vibes: Vec<VibeCue>,
    pub occasions: Vec<KeywordGroup<String>>,
    pub default_vibe: String,
    pub default_occasion: String,
}

impl Default for RequestCues {
    fn default() -> Self {
        let mut office = VibeCue::new(
            "professional",
            &["business", "meeting", "presentation", "office", "formal", "suit"],
        );
        office.refine = Some(KeywordGroup::new(
            "business".to_string(),
            &["business", "meeting", "presentation"],
        ));

        Self {
            weather: vec![
                KeywordGroup::new(WeatherBand::Hot, &["hot", "warm", "summer", "sunny", "beach"]),
                KeywordGroup::new(WeatherBand::Cold, &["cold", "winter", "chilly", "freezing", "snow"]),
                KeywordGroup::new(WeatherBand::Rainy, &["rain", "wet", "rainy", "drizzle", "storm"]),
                KeywordGroup::new(WeatherBand::Cool, &["cool", "fall", "autumn"]),
            ],
            vibes: vec![
                office,
                VibeCue::new("professional", &["professional", "work"]),
                VibeCue::new("trendy", &["trendy", "stylish", "fashionable", "hip", "cool"]),
                VibeCue::new("sporty", &["sporty", "gym", "workout", "exercise", "athletic"]),
                VibeCue::new("casual", &["casual", "relaxed", "comfortable", "everyday"]),
            ],
            occasions: vec![
                KeywordGroup::new("date".to_string(), &["date", "romantic", "dinner", "restaurant"]),
                KeywordGroup::new("work".to_string(), &["work", "office", "meeting", "presentation"]),
                KeywordGroup::new("party".to_string(), &["party", "celebration", "event", "night out"]),
                KeywordGroup::new("casual".to_string(), &["everyday", "general", "normal", "regular"]),
            ],
            default_vibe: "casual".to_string(),
            default_occasion: "general".to_string(),
        }
    }
}

impl RequestCues {
    /// Load from YAML string; missing sections keep their defaults
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            Error::config(format!("Failed to parse request cues {}: {}", path.display(), e))
        })
    }
}

#[derive(Debug, Clone)]
struct CompiledVibe {
    label: String,
    matcher: KeywordMatcher,
    refine: Option<(String, KeywordMatcher)>,
}

/// Parses free-text outfit requests into an [`OutfitRequest`]
#[derive(Debug, Clone)]
pub struct RequestParser {
    weather: Vec<(WeatherBand, KeywordMatcher)>,
    vibes: Vec<CompiledVibe>,
    occasions: Vec<(String, KeywordMatcher)>,
    default_vibe: String,
    default_occasion: String,
}

impl RequestParser {
    pub fn new(cues: &RequestCues) -> Result<Self> {
        let weather = cues
            .weather
            .iter()
            .map(|g| KeywordMatcher::new(&g.keywords).map(|m| (g.label, m)))
            .collect::<Result<Vec<_>>>()?;

        let vibes = cues
            .vibes
            .iter()
            .map(|cue| -> Result<CompiledVibe> {
                let refine = match &cue.refine {
                    Some(group) => Some((group.label.clone(), KeywordMatcher::new(&group.keywords)?)),
                    None => None,
                };
                Ok(CompiledVibe {
                    label: cue.label.clone(),
                    matcher: KeywordMatcher::new(&cue.keywords)?,
                    refine,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let occasions = cues
            .occasions
            .iter()
            .map(|g| KeywordMatcher::new(&g.keywords).map(|m| (g.label.clone(), m)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            weather,
            vibes,
            occasions,
            default_vibe: cues.default_vibe.clone(),
            default_occasion: cues.default_occasion.clone(),
        })
    }

    /// Parser over the built-in cue tables
    pub fn with_defaults() -> Result<Self> {
        Self::new(&RequestCues::default())
    }

    /// Parse a request; every field falls back to its default
    pub fn parse(&self, text: &str) -> OutfitRequest {
        let text = text.to_lowercase();

        let weather = self
            .weather
            .iter()
            .find(|(_, matcher)| matcher.is_match(&text))
            .map_or(WeatherBand::DEFAULT, |(band, _)| *band);

        let vibe = self
            .vibes
            .iter()
            .find(|vibe| vibe.matcher.is_match(&text))
            .map_or(self.default_vibe.as_str(), |vibe| match &vibe.refine {
                Some((label, matcher)) if matcher.is_match(&text) => label.as_str(),
                _ => vibe.label.as_str(),
            })
            .to_string();

        let occasion = self
            .occasions
            .iter()
            .find(|(_, matcher)| matcher.is_match(&text))
            .map_or(self.default_occasion.as_str(), |(label, _)| label.as_str())
            .to_string();

        debug!(weather = %weather, vibe = %vibe, occasion = %occasion, "Parsed outfit request");

        OutfitRequest {
            weather,
            vibe,
            occasion,
        }
    }
}
