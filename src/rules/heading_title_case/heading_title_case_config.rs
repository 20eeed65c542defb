use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;

/// Words kept lowercase in title case unless they open or close the title
/// or follow a colon.
pub fn default_lowercase_words() -> Vec<String> {
    [
        "a", "an", "the", "and", "but", "or", "nor", "for", "so", "yet", "as", "at", "by", "in",
        "of", "off", "on", "onto", "out", "over", "per", "to", "up", "via", "with", "from",
        "into", "is", "if", "than", "that", "vs",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeadingTitleCaseConfig {
    /// Extends the built-in lowercase-word list, or replaces it when
    /// `lowercase-words-replace-default` is set.
    #[serde(alias = "lowercaseWords")]
    pub lowercase_words: Vec<String>,

    #[serde(alias = "lowercaseWordsReplaceDefault")]
    pub lowercase_words_replace_default: bool,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl HeadingTitleCaseConfig {
    /// The lowercase-word list after merge semantics are applied.
    pub fn effective_lowercase_words(&self) -> Vec<String> {
        if self.lowercase_words_replace_default {
            self.lowercase_words.clone()
        } else {
            let mut words = default_lowercase_words();
            words.extend(self.lowercase_words.iter().cloned());
            words
        }
    }
}

impl RuleConfig for HeadingTitleCaseConfig {
    const RULE_NAME: &'static str = "heading-title-case";
}
