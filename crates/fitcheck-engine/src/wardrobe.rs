//! In-memory wardrobe store
//!
//! A single lock guards both appends and scans. Wardrobes are tens of
//! items, so every read hands out a snapshot copy.

use fitcheck_core::{GarmentRecord, GarmentType, Style, WeatherBand};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Ordered collection of garments shared by request handlers
#[derive(Debug, Default)]
pub struct WardrobeStore {
    items: RwLock<Vec<GarmentRecord>>,
}

impl WardrobeStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the given records, in order
    pub fn with_items(items: Vec<GarmentRecord>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// A store preloaded with [`sample_wardrobe`]
    pub fn with_sample() -> Self {
        Self::with_items(sample_wardrobe())
    }

    /// Append a record; it stays until the store is reset
    pub fn add_item(&self, record: GarmentRecord) {
        debug!(name = %record.name, garment_type = %record.garment_type, "Adding wardrobe item");
        self.items.write().push(record);
    }

    /// Snapshot of every record in insertion order
    pub fn list_items(&self) -> Vec<GarmentRecord> {
        self.items.read().clone()
    }

    /// Remove every record
    pub fn reset(&self) {
        let mut items = self.items.write();
        info!(removed = items.len(), "Resetting wardrobe");
        items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Counts per type and per style plus a short listing
    pub fn summary(&self) -> WardrobeSummary {
        WardrobeSummary::from_items(&self.items.read())
    }
}

/// Aggregate view of a wardrobe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeSummary {
    pub total_items: usize,
    pub types_distribution: BTreeMap<GarmentType, usize>,
    pub styles_distribution: BTreeMap<Style, usize>,
    pub items: Vec<ItemOverview>,
}

/// One line of a wardrobe listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOverview {
    pub name: String,
    #[serde(rename = "type")]
    pub garment_type: GarmentType,
    pub style: Style,
    pub color: String,
}

impl WardrobeSummary {
    pub fn from_items(items: &[GarmentRecord]) -> Self {
        let mut types_distribution = BTreeMap::new();
        let mut styles_distribution = BTreeMap::new();

        for item in items {
            *types_distribution.entry(item.garment_type).or_insert(0) += 1;
            *styles_distribution.entry(item.style).or_insert(0) += 1;
        }

        Self {
            total_items: items.len(),
            types_distribution,
            styles_distribution,
            items: items.iter().map(ItemOverview::from).collect(),
        }
    }
}

impl From<&GarmentRecord> for ItemOverview {
    fn from(record: &GarmentRecord) -> Self {
        Self {
            name: record.name.clone(),
            garment_type: record.garment_type,
            style: record.style,
            color: record.color.clone(),
        }
    }
}

/// The demo wardrobe: sixteen everyday pieces spanning every default vibe
pub fn sample_wardrobe() -> Vec<GarmentRecord> {
    use GarmentType::*;
    use WeatherBand::*;

    let table: [(&str, GarmentType, Style, &[WeatherBand], &str, &[&str], u8, u8); 16] = [
        ("Basic White Tee", TShirt, Style::Casual, &[Hot, Warm], "white", &["spring", "summer"], 3, 2),
        ("Gray Hoodie", Hoodie, Style::Casual, &[Cool, Cold], "gray", &["fall", "winter"], 2, 7),
        ("Blue Jeans", Jeans, Style::Casual, &[Mild, Cool], "blue", &["all"], 4, 5),
        ("Summer Dress", Dress, Style::Casual, &[Hot, Warm], "floral", &["spring", "summer"], 6, 2),
        ("White Sneakers", Sneakers, Style::Casual, &[Mild, Warm, Hot], "white", &["all"], 3, 4),
        ("Navy Blazer", Jacket, Style::Formal, &[Mild, Cool], "navy", &["all"], 9, 5),
        ("White Dress Shirt", TShirt, Style::Formal, &[Mild, Cool, Warm], "white", &["all"], 8, 3),
        ("Black Dress Pants", Pants, Style::Formal, &[Mild, Cool], "black", &["all"], 8, 4),
        ("Black Oxford Shoes", Boots, Style::Formal, &[Mild, Cool], "black", &["all"], 9, 3),
        ("Leather Jacket", Jacket, Style::Trendy, &[Cool], "black", &["fall", "spring"], 7, 6),
        ("Skinny Black Jeans", Jeans, Style::Trendy, &[Mild, Cool], "black", &["all"], 6, 4),
        ("Winter Boots", Boots, Style::Casual, &[Cold, Snowy], "brown", &["winter"], 4, 8),
        ("Rain Jacket", Jacket, Style::Casual, &[Rainy, Cool], "navy", &["all"], 4, 6),
        ("Cotton Shorts", Shorts, Style::Casual, &[Hot, Warm], "khaki", &["summer"], 3, 1),
        ("Wool Sweater", Sweater, Style::Casual, &[Cold, Cool], "gray", &["winter", "fall"], 5, 8),
        ("Waterproof Boots", Boots, Style::Casual, &[Rainy, Cold], "black", &["all"], 4, 7),
    ];

    table
        .into_iter()
        .map(|(name, garment_type, style, bands, color, season, formality, warmth)| {
            GarmentRecord::new(name, garment_type, style, bands.iter().copied(), color)
                .with_season(season.iter().copied())
                .with_formality(formality)
                .with_warmth(warmth)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_listed_in_insertion_order() {
        let store = WardrobeStore::new();
        assert!(store.is_empty());

        for name in ["first", "second", "third"] {
            store.add_item(GarmentRecord::new(
                name,
                GarmentType::TShirt,
                Style::Casual,
                [WeatherBand::Mild],
                "white",
            ));
        }

        let names: Vec<String> = store.list_items().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(store.len(), 3);

        store.reset();
        assert!(store.list_items().is_empty());
    }

    #[test]
    fn test_sample_wardrobe_is_valid() {
        let items = sample_wardrobe();
        assert_eq!(items.len(), 16);
        for item in &items {
            assert!(item.validate().is_ok(), "{} failed validation", item.name);
        }
    }

    #[test]
    fn test_summary_counts() {
        let store = WardrobeStore::with_sample();
        let summary = store.summary();

        assert_eq!(summary.total_items, 16);
        assert_eq!(summary.types_distribution[&GarmentType::Boots], 3);
        assert_eq!(summary.types_distribution[&GarmentType::Jacket], 3);
        assert_eq!(summary.styles_distribution[&Style::Formal], 4);
        assert_eq!(summary.styles_distribution[&Style::Trendy], 2);
        assert!(!summary.types_distribution.contains_key(&GarmentType::Skirt));
        assert_eq!(summary.items[0].name, "Basic White Tee");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["types_distribution"]["t-shirt"], 2);
        assert_eq!(json["items"][1]["type"], "hoodie");
    }
}
