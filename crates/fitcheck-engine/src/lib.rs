//! FitCheck Engine
//!
//! The recommendation half of the core:
//! - [`RuleSet`]: weather and vibe rules, loaded once and shared read-only
//! - [`WardrobeStore`]: the in-memory wardrobe
//! - [`OutfitEngine`]: filters a wardrobe by weather and vibe and assembles
//!   an outfit using an injected random source

pub mod engine;
pub mod rule;
pub mod wardrobe;

pub use engine::{filter_by_vibe, filter_by_weather, OutfitEngine, OutfitResult};
pub use rule::{OutfitRule, RuleSet};
pub use wardrobe::{sample_wardrobe, ItemOverview, WardrobeStore, WardrobeSummary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{OutfitEngine, OutfitResult};
    pub use crate::rule::{OutfitRule, RuleSet};
    pub use crate::wardrobe::{WardrobeStore, WardrobeSummary};
}
