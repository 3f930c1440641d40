//! FitCheck Classifiers
//!
//! Deterministic keyword classifiers for the wardrobe service:
//! - [`GarmentClassifier`]: tags a free-text garment description
//! - [`RequestParser`]: turns an outfit request into weather, vibe and occasion
//! - [`FilenameAnalyzer`]: tags a photo from its filename alone
//! - [`RawAnalysis::normalize`]: maps an external model's answer onto the
//!   closed vocabularies
//!
//! All keyword tables are plain configuration with built-in defaults and
//! optional YAML overrides. Matching is case-insensitive substring matching
//! backed by Aho-Corasick.

pub mod filename;
pub mod garment;
pub mod keywords;
pub mod matcher;
pub mod normalize;
pub mod request;

pub use filename::{clean_name, FilenameAnalyzer, GarmentAnalysis, GarmentCategory};
pub use garment::{ColorDetector, GarmentClassifier};
pub use keywords::{KeywordGroup, KeywordTables};
pub use matcher::KeywordMatcher;
pub use normalize::RawAnalysis;
pub use request::{RequestCues, RequestParser};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::filename::{FilenameAnalyzer, GarmentAnalysis, GarmentCategory};
    pub use crate::garment::GarmentClassifier;
    pub use crate::keywords::KeywordTables;
    pub use crate::normalize::RawAnalysis;
    pub use crate::request::{RequestCues, RequestParser};
}
