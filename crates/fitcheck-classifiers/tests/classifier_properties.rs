//! Property tests for the keyword classifiers

use fitcheck_classifiers::{GarmentClassifier, KeywordTables, RequestParser};
use fitcheck_core::{GarmentType, WeatherBand};
use proptest::prelude::*;

/// Words drawn from letters no keyword is built from
fn filler() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[xyzqv]{1,8}", 0..6)
}

fn type_keyword() -> impl Strategy<Value = (GarmentType, &'static str)> {
    prop::sample::select(vec![
        (GarmentType::Hoodie, "hoodie"),
        (GarmentType::TShirt, "t-shirt"),
        (GarmentType::Jeans, "jeans"),
        (GarmentType::Shorts, "shorts"),
        (GarmentType::Jacket, "jacket"),
        (GarmentType::Sweater, "sweater"),
        (GarmentType::Dress, "dress"),
        (GarmentType::Skirt, "skirt"),
        (GarmentType::Pants, "pants"),
        (GarmentType::Sneakers, "sneakers"),
        (GarmentType::Boots, "boots"),
        (GarmentType::Sandals, "sandals"),
    ])
}

fn formality_words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "formal", "business", "professional", "suit", "dress shirt", "casual", "relaxed",
            "hoodie", "jeans", "t-shirt",
        ]),
        0..6,
    )
}

proptest! {
    #[test]
    fn exact_type_keyword_is_detected(
        (expected, keyword) in type_keyword(),
        before in filler(),
        after in filler(),
    ) {
        let classifier = GarmentClassifier::with_defaults().unwrap();
        let text = format!("{} {} {}", before.join(" "), keyword.to_uppercase(), after.join(" "));

        let result = classifier.classify(&text);
        prop_assert_eq!(result.garment_type, Some(expected));
    }

    #[test]
    fn no_style_keywords_means_no_styles(words in filler()) {
        let classifier = GarmentClassifier::with_defaults().unwrap();
        let result = classifier.classify(&words.join(" "));

        prop_assert!(result.styles.is_empty());
        prop_assert_eq!(result.weather_suitability, vec![WeatherBand::Mild]);
    }

    #[test]
    fn adding_formal_keyword_never_lowers_formality(
        words in formality_words(),
        extra in prop::sample::select(vec!["formal", "business", "professional", "suit", "dress shirt"]),
    ) {
        let classifier = GarmentClassifier::with_defaults().unwrap();
        let text = words.join(" ");
        let before = classifier.classify(&text).formality_level;
        let after = classifier.classify(&format!("{} {}", text, extra)).formality_level;

        prop_assert!(after >= before, "'{}' + '{}': {} -> {}", text, extra, before, after);
    }

    #[test]
    fn scores_stay_in_range(text in ".{0,200}") {
        let classifier = GarmentClassifier::with_defaults().unwrap();
        let result = classifier.classify(&text);

        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!((1..=10).contains(&result.formality_level));
        prop_assert!((1..=10).contains(&result.warmth_rating));
        prop_assert!(!result.weather_suitability.is_empty());
    }

    #[test]
    fn parser_always_yields_known_vibe(text in ".{0,200}") {
        let parser = RequestParser::with_defaults().unwrap();
        let request = parser.parse(&text);

        prop_assert!(
            ["casual", "professional", "business", "trendy", "sporty"].contains(&request.vibe.as_str())
        );
        prop_assert!(
            ["date", "work", "party", "casual", "general"].contains(&request.occasion.as_str())
        );
    }
}

#[test]
fn keyword_tables_load_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "garment_types:\n  - label: sandals\n    keywords: [flip flops]\ndefault_color: beige"
    )
    .unwrap();

    let tables = KeywordTables::from_file(file.path()).unwrap();
    let classifier = GarmentClassifier::new(&tables).unwrap();

    let result = classifier.classify("flip flops");
    assert_eq!(result.garment_type, Some(GarmentType::Sandals));
    assert_eq!(result.color, "beige");
}

#[test]
fn malformed_keyword_tables_are_config_errors() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "garment_types:\n  - label: overalls\n    keywords: [bib]").unwrap();

    let err = KeywordTables::from_file(file.path()).unwrap_err();
    assert!(matches!(err, fitcheck_core::Error::Config(_)));
}
