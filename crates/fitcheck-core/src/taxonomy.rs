//! Fixed garment vocabulary: types, styles, and weather bands

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formality level at or above which a garment counts as formal
pub const FORMAL_THRESHOLD: u8 = 7;

/// Error returned when a string is not a member of a closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    /// Vocabulary name (e.g. "garment type")
    pub kind: &'static str,

    /// The rejected input
    pub value: String,
}

/// Kind of garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GarmentType {
    Hoodie,
    TShirt,
    Jeans,
    Shorts,
    Jacket,
    Sweater,
    Dress,
    Skirt,
    Pants,
    Sneakers,
    Boots,
    Sandals,
}

impl GarmentType {
    /// All garment types in declaration order
    pub const ALL: [GarmentType; 12] = [
        Self::Hoodie,
        Self::TShirt,
        Self::Jeans,
        Self::Shorts,
        Self::Jacket,
        Self::Sweater,
        Self::Dress,
        Self::Skirt,
        Self::Pants,
        Self::Sneakers,
        Self::Boots,
        Self::Sandals,
    ];

    /// Wire token for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hoodie => "hoodie",
            Self::TShirt => "t-shirt",
            Self::Jeans => "jeans",
            Self::Shorts => "shorts",
            Self::Jacket => "jacket",
            Self::Sweater => "sweater",
            Self::Dress => "dress",
            Self::Skirt => "skirt",
            Self::Pants => "pants",
            Self::Sneakers => "sneakers",
            Self::Boots => "boots",
            Self::Sandals => "sandals",
        }
    }

    /// Outfit slot this garment fills, if any.
    ///
    /// Skirts have no slot and are never picked during outfit assembly.
    pub fn slot(&self) -> Option<OutfitSlot> {
        match self {
            Self::Hoodie | Self::TShirt | Self::Sweater => Some(OutfitSlot::Top),
            Self::Jeans | Self::Shorts | Self::Pants => Some(OutfitSlot::Bottom),
            Self::Dress => Some(OutfitSlot::Dress),
            Self::Sneakers | Self::Boots | Self::Sandals => Some(OutfitSlot::Shoes),
            Self::Jacket => Some(OutfitSlot::Outerwear),
            Self::Skirt => None,
        }
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarmentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "garment type",
                value: s.to_string(),
            })
    }
}

/// Position a garment occupies in an assembled outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitSlot {
    Top,
    Bottom,
    Dress,
    Shoes,
    Outerwear,
}

/// Garment style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Casual,
    Formal,
    Sporty,
    Trendy,
    Vintage,
    Minimalist,
}

impl Style {
    /// All styles in declaration order
    pub const ALL: [Style; 6] = [
        Self::Casual,
        Self::Formal,
        Self::Sporty,
        Self::Trendy,
        Self::Vintage,
        Self::Minimalist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Sporty => "sporty",
            Self::Trendy => "trendy",
            Self::Vintage => "vintage",
            Self::Minimalist => "minimalist",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "style",
                value: s.to_string(),
            })
    }
}

/// Coarse weather category shared by classification and recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherBand {
    Hot,
    Warm,
    Mild,
    Cool,
    Cold,
    Rainy,
    Snowy,
}

impl WeatherBand {
    /// All bands in declaration order
    pub const ALL: [WeatherBand; 7] = [
        Self::Hot,
        Self::Warm,
        Self::Mild,
        Self::Cool,
        Self::Cold,
        Self::Rainy,
        Self::Snowy,
    ];

    /// Band used whenever a weather string is not recognized
    pub const DEFAULT: WeatherBand = WeatherBand::Mild;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Mild => "mild",
            Self::Cool => "cool",
            Self::Cold => "cold",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
        }
    }

    /// Parse a weather string, falling back to [`WeatherBand::DEFAULT`].
    ///
    /// Matching is case-insensitive against the seven band tokens. The
    /// returned tag records whether the fallback was taken.
    pub fn parse(input: &str) -> ParsedBand {
        match input.parse::<WeatherBand>() {
            Ok(band) => ParsedBand::Recognized(band),
            Err(_) => ParsedBand::Defaulted(Self::DEFAULT),
        }
    }

    /// Band for an air temperature in degrees Celsius
    pub fn from_temperature(celsius: f64) -> WeatherBand {
        if celsius >= 25.0 {
            Self::Hot
        } else if celsius >= 20.0 {
            Self::Warm
        } else if celsius >= 15.0 {
            Self::Mild
        } else if celsius >= 5.0 {
            Self::Cool
        } else {
            Self::Cold
        }
    }
}

impl Default for WeatherBand {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WeatherBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherBand {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|band| band.as_str() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "weather band",
                value: s.to_string(),
            })
    }
}

/// Outcome of lenient weather parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedBand {
    /// The input named a band
    Recognized(WeatherBand),

    /// The input was not a band; the default was substituted
    Defaulted(WeatherBand),
}

impl ParsedBand {
    /// The resolved band, regardless of how it was obtained
    pub fn band(&self) -> WeatherBand {
        match self {
            Self::Recognized(band) | Self::Defaulted(band) => *band,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}
