//! Substring keyword matching backed by Aho-Corasick

use aho_corasick::AhoCorasick;
use fitcheck_core::{Error, Result};

/// Matches a fixed keyword list against text in a single pass.
///
/// Keywords are substring matches, not word matches: "tee" hits inside
/// "teenager". Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    automaton: AhoCorasick,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Build a matcher for the given keywords
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| Error::classifier(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            automaton,
            keywords,
        })
    }

    /// Whether any keyword occurs in the text
    pub fn is_match(&self, text: &str) -> bool {
        !self.keywords.is_empty() && self.automaton.is_match(text)
    }

    /// Number of distinct keywords that occur in the text.
    ///
    /// Each keyword counts once no matter how often it repeats.
    pub fn count_distinct(&self, text: &str) -> usize {
        let mut seen = vec![false; self.keywords.len()];
        for m in self.automaton.find_overlapping_iter(text) {
            seen[m.pattern().as_usize()] = true;
        }
        seen.into_iter().filter(|hit| *hit).count()
    }

    /// The keywords this matcher was built from (lower-cased)
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
