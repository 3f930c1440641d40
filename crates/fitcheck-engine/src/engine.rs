//! Constraint-based outfit engine
//!
//! Given a wardrobe, a weather string and a vibe, the engine narrows the
//! wardrobe by weather suitability, then by the vibe's rule, and assembles
//! one outfit from the survivors. Vibe filtering is best-effort: it can never
//! empty a non-empty candidate set.
//!
//! All randomness comes from the injected [`Rng`]; a seeded engine is fully
//! reproducible.

use crate::rule::RuleSet;
use fitcheck_core::{GarmentRecord, OutfitSlot, WeatherBand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Formality floor used when a professional vibe matches nothing
pub const RELAXED_FORMALITY: u8 = 6;

/// Vibes that get the relaxed-formality fallback
const FORMAL_VIBES: [&str; 2] = ["professional", "business"];

/// A suggested outfit with its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitResult {
    /// Chosen garments in assembly order: top or dress, bottom, shoes, outerwear
    pub items: Vec<GarmentRecord>,

    pub reasoning: String,

    /// Fraction of chosen items that suit the requested band
    pub confidence: f32,

    /// Band the weather string resolved to
    pub weather: WeatherBand,

    pub vibe: String,
    pub occasion: String,
}

impl OutfitResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Names of the chosen garments
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Outfit engine over a shared rule set and an owned random source
#[derive(Debug)]
pub struct OutfitEngine<R = StdRng> {
    rules: Arc<RuleSet>,
    rng: R,
}

impl OutfitEngine<StdRng> {
    /// Engine with a fixed seed, for reproducible suggestions
    pub fn seeded(rules: Arc<RuleSet>, seed: u64) -> Self {
        Self::new(rules, StdRng::seed_from_u64(seed))
    }

    /// Engine seeded from the operating system
    pub fn from_entropy(rules: Arc<RuleSet>) -> Self {
        Self::new(rules, StdRng::from_entropy())
    }
}

impl<R: Rng> OutfitEngine<R> {
    pub fn new(rules: Arc<RuleSet>, rng: R) -> Self {
        Self { rules, rng }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Suggest an outfit from `wardrobe`.
    ///
    /// Unrecognized weather falls back to mild and unknown vibes apply no
    /// filter. The occasion is echoed back and does not affect selection.
    /// Never fails; an empty wardrobe yields an empty outfit.
    pub fn suggest_outfit(
        &mut self,
        wardrobe: &[GarmentRecord],
        weather: &str,
        vibe: &str,
        occasion: &str,
    ) -> OutfitResult {
        let parsed = WeatherBand::parse(weather);
        let band = parsed.band();

        let by_weather = filter_by_weather(wardrobe, band);
        let candidates = filter_by_vibe(&self.rules, &by_weather, vibe);
        let items = self.assemble(&candidates);

        let reasoning = reasoning(&items, weather, vibe);
        let confidence = weather_fit(&items, band);

        debug!(
            weather = %band,
            weather_defaulted = parsed.is_defaulted(),
            vibe,
            wardrobe = wardrobe.len(),
            weather_matches = by_weather.len(),
            candidates = candidates.len(),
            chosen = items.len(),
            confidence,
            "Suggested outfit"
        );

        OutfitResult {
            items,
            reasoning,
            confidence,
            weather: band,
            vibe: vibe.to_string(),
            occasion: occasion.to_string(),
        }
    }

    fn assemble(&mut self, candidates: &[&GarmentRecord]) -> Vec<GarmentRecord> {
        let slot = |wanted: OutfitSlot| {
            candidates
                .iter()
                .copied()
                .filter(|item| item.garment_type.slot() == Some(wanted))
                .collect::<Vec<_>>()
        };
        let tops = slot(OutfitSlot::Top);
        let bottoms = slot(OutfitSlot::Bottom);
        let dresses = slot(OutfitSlot::Dress);
        let shoes = slot(OutfitSlot::Shoes);
        let outerwear = slot(OutfitSlot::Outerwear);

        let has_formal = candidates.iter().any(|item| item.is_formal());
        let mut outfit: Vec<&GarmentRecord> = Vec::new();

        if !dresses.is_empty() && (!has_formal || self.coin_flip()) {
            outfit.extend(self.pick(&dresses));
        } else if has_formal {
            outfit.extend(self.pick_preferring_formal(&tops));
            outfit.extend(self.pick_preferring_formal(&bottoms));
        } else {
            outfit.extend(self.pick(&tops));
            outfit.extend(self.pick(&bottoms));
        }

        if has_formal {
            outfit.extend(self.pick_preferring_formal(&shoes));
        } else {
            outfit.extend(self.pick(&shoes));
        }

        if !outerwear.is_empty() {
            let weather_needs = outerwear.iter().any(|item| {
                item.suits(WeatherBand::Cold) || item.suits(WeatherBand::Rainy)
            });
            let formal_needs = has_formal && outerwear.iter().any(|item| item.is_formal());

            // the coin is only flipped when neither need applies
            if weather_needs || formal_needs || self.coin_flip() {
                if has_formal {
                    outfit.extend(self.pick_preferring_formal(&outerwear));
                } else {
                    outfit.extend(self.pick(&outerwear));
                }
            }
        }

        outfit.into_iter().cloned().collect()
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn pick<'a>(&mut self, items: &[&'a GarmentRecord]) -> Option<&'a GarmentRecord> {
        items.choose(&mut self.rng).copied()
    }

    /// Uniform pick among formal items, or among all when none are formal
    fn pick_preferring_formal<'a>(
        &mut self,
        items: &[&'a GarmentRecord],
    ) -> Option<&'a GarmentRecord> {
        let formal: Vec<&GarmentRecord> = items.iter().copied().filter(|i| i.is_formal()).collect();
        if formal.is_empty() {
            self.pick(items)
        } else {
            self.pick(&formal)
        }
    }
}

/// Items whose suitability contains `band`, in wardrobe order
pub fn filter_by_weather(wardrobe: &[GarmentRecord], band: WeatherBand) -> Vec<&GarmentRecord> {
    wardrobe.iter().filter(|item| item.suits(band)).collect()
}

/// Apply the vibe's rule with its fallbacks.
///
/// Professional and business vibes that match nothing relax to every item
/// with formality of at least [`RELAXED_FORMALITY`]. If that is still empty
/// the input comes back unfiltered.
pub fn filter_by_vibe<'a>(
    rules: &RuleSet,
    items: &[&'a GarmentRecord],
    vibe: &str,
) -> Vec<&'a GarmentRecord> {
    let vibe = vibe.to_lowercase();
    let Some(rule) = rules.vibe_rule(&vibe) else {
        return items.to_vec();
    };

    let strict: Vec<&GarmentRecord> = items.iter().copied().filter(|i| rule.admits(i)).collect();
    if !strict.is_empty() {
        return strict;
    }

    if FORMAL_VIBES.contains(&vibe.as_str()) {
        let relaxed: Vec<&GarmentRecord> = items
            .iter()
            .copied()
            .filter(|i| i.formality_level >= RELAXED_FORMALITY)
            .collect();
        if !relaxed.is_empty() {
            debug!(vibe = %vibe, kept = relaxed.len(), "Vibe filter relaxed to smart casual");
            return relaxed;
        }
    }

    debug!(vibe = %vibe, "Vibe filter matched nothing, keeping weather matches");
    items.to_vec()
}

fn reasoning(items: &[GarmentRecord], weather: &str, vibe: &str) -> String {
    let mut sentences: Vec<String> = items
        .iter()
        .map(|item| format!("{} is perfect for {} weather", item.name, weather))
        .collect();
    sentences.push(format!("This combination matches your {} vibe", vibe));

    format!("{}.", sentences.join(". "))
}

fn weather_fit(items: &[GarmentRecord], band: WeatherBand) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let fitting = items.iter().filter(|item| item.suits(band)).count();
    fitting as f32 / items.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wardrobe::sample_wardrobe;
    use fitcheck_core::{GarmentType, Style};

    fn engine(seed: u64) -> OutfitEngine {
        OutfitEngine::seeded(Arc::new(RuleSet::default()), seed)
    }

    fn casual(name: &str, garment_type: GarmentType, bands: &[WeatherBand]) -> GarmentRecord {
        GarmentRecord::new(name, garment_type, Style::Casual, bands.iter().copied(), "gray")
            .with_formality(3)
    }

    #[test]
    fn test_empty_wardrobe() {
        let result = engine(1).suggest_outfit(&[], "hot", "casual", "general");

        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reasoning, "This combination matches your casual vibe.");
    }

    #[test]
    fn test_unknown_weather_defaults_to_mild() {
        let result = engine(7).suggest_outfit(&sample_wardrobe(), "tropical", "casual", "general");

        assert_eq!(result.weather, WeatherBand::Mild);
        assert!(result.items.iter().all(|i| i.suits(WeatherBand::Mild)));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_business_mild_picks_formal_pieces() {
        let result = engine(3).suggest_outfit(&sample_wardrobe(), "mild", "business", "work");

        assert_eq!(
            result.item_names(),
            vec!["White Dress Shirt", "Black Dress Pants", "Black Oxford Shoes", "Navy Blazer"]
        );
        assert_eq!(result.occasion, "work");
        assert_eq!(result.confidence, 1.0);
        assert!(result
            .reasoning
            .starts_with("White Dress Shirt is perfect for mild weather. "));
        assert!(result.reasoning.ends_with("This combination matches your business vibe."));
    }

    #[test]
    fn test_business_falls_back_to_smart_casual() {
        // nothing reaches formality 8, but one piece reaches 6
        let wardrobe = vec![
            casual("Tee", GarmentType::TShirt, &[WeatherBand::Mild]),
            casual("Chinos", GarmentType::Pants, &[WeatherBand::Mild]).with_formality(6),
        ];
        let rules = RuleSet::default();
        let by_weather = filter_by_weather(&wardrobe, WeatherBand::Mild);
        let kept = filter_by_vibe(&rules, &by_weather, "Business");

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Chinos");
    }

    #[test]
    fn test_business_falls_back_to_weather_matches() {
        let wardrobe = vec![
            casual("Tee", GarmentType::TShirt, &[WeatherBand::Hot]),
            casual("Shorts", GarmentType::Shorts, &[WeatherBand::Hot]),
            casual("Parka", GarmentType::Jacket, &[WeatherBand::Cold]),
        ];
        let rules = RuleSet::default();
        let by_weather = filter_by_weather(&wardrobe, WeatherBand::Hot);
        let kept = filter_by_vibe(&rules, &by_weather, "business");
        assert_eq!(kept.len(), 2);

        let result = engine(11).suggest_outfit(&wardrobe, "hot", "business", "general");
        assert_eq!(result.item_names(), vec!["Tee", "Shorts"]);
    }

    #[test]
    fn test_unknown_vibe_applies_no_filter() {
        let wardrobe = sample_wardrobe();
        let rules = RuleSet::default();
        let by_weather = filter_by_weather(&wardrobe, WeatherBand::Cool);
        let kept = filter_by_vibe(&rules, &by_weather, "unknownvibe");

        assert_eq!(kept.len(), by_weather.len());
    }

    #[test]
    fn test_weather_outerwear_always_added() {
        let wardrobe = vec![
            casual("Hoodie", GarmentType::Hoodie, &[WeatherBand::Rainy]),
            casual("Rain Jacket", GarmentType::Jacket, &[WeatherBand::Rainy]),
        ];

        for seed in 0..20 {
            let result = engine(seed).suggest_outfit(&wardrobe, "rainy", "casual", "general");
            assert_eq!(result.item_names(), vec!["Hoodie", "Rain Jacket"]);
        }
    }

    #[test]
    fn test_dress_chosen_without_formal_items() {
        let wardrobe = vec![
            casual("Sundress", GarmentType::Dress, &[WeatherBand::Hot]),
            casual("Tee", GarmentType::TShirt, &[WeatherBand::Hot]),
            casual("Sandals", GarmentType::Sandals, &[WeatherBand::Hot]),
        ];

        for seed in 0..20 {
            let result = engine(seed).suggest_outfit(&wardrobe, "HOT", "casual", "general");
            assert_eq!(result.item_names(), vec!["Sundress", "Sandals"]);
        }
    }

    #[test]
    fn test_skirts_are_never_chosen() {
        let wardrobe = vec![casual("Skirt", GarmentType::Skirt, &[WeatherBand::Warm])];
        let result = engine(5).suggest_outfit(&wardrobe, "warm", "casual", "general");

        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let wardrobe = sample_wardrobe();
        let mut a = engine(42);
        let mut b = engine(42);

        for (weather, vibe) in [("hot", "casual"), ("cool", "trendy"), ("mild", "sporty")] {
            assert_eq!(
                a.suggest_outfit(&wardrobe, weather, vibe, "general"),
                b.suggest_outfit(&wardrobe, weather, vibe, "general")
            );
        }
    }

    #[test]
    fn test_reasoning_echoes_raw_strings() {
        let wardrobe = vec![casual("Tee", GarmentType::TShirt, &[WeatherBand::Mild])];
        let result = engine(0).suggest_outfit(&wardrobe, "Balmy", "Chill", "general");

        assert_eq!(
            result.reasoning,
            "Tee is perfect for Balmy weather. This combination matches your Chill vibe."
        );
    }
}
