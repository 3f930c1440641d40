//! FitCheck Core
//!
//! Shared vocabulary and record types for the FitCheck wardrobe service.
//!
//! This crate provides:
//! - The closed garment taxonomy (types, styles, weather bands)
//! - Wardrobe records, classification results, and parsed outfit requests
//! - Error types and result handling

pub mod error;
pub mod taxonomy;
pub mod types;

pub use error::{Error, Result};
pub use taxonomy::{
    GarmentType, OutfitSlot, ParsedBand, Style, UnknownVariant, WeatherBand, FORMAL_THRESHOLD,
};
pub use types::{ClassificationResult, GarmentRecord, OutfitRequest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::taxonomy::{GarmentType, OutfitSlot, ParsedBand, Style, WeatherBand};
    pub use crate::types::{ClassificationResult, GarmentRecord, OutfitRequest};
}
