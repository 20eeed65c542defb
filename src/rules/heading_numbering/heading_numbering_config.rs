use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;

/// Configuration for the heading-numbering rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeadingNumberingConfig {
    /// Headings deeper than this level are violations.
    #[serde(alias = "maxHeadingLevel")]
    pub max_heading_level: Option<usize>,

    /// Largest value any numbering segment may carry.
    #[serde(alias = "maxSegmentValue")]
    pub max_segment_value: Option<u64>,

    /// Restrict the segment-value bound to headings at or below this level.
    #[serde(alias = "maxSegmentValueMinLevel")]
    pub max_segment_value_min_level: Option<usize>,

    /// Restrict the segment-value bound to headings at or above this level.
    #[serde(alias = "maxSegmentValueMaxLevel")]
    pub max_segment_value_max_level: Option<usize>,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl RuleConfig for HeadingNumberingConfig {
    const RULE_NAME: &'static str = "heading-numbering";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, load_rule_config};

    #[test]
    fn test_default_config() {
        let config = HeadingNumberingConfig::default();
        assert_eq!(config.max_heading_level, None);
        assert_eq!(config.max_segment_value, None);
        assert!(config.exclude_path_patterns.is_empty());
    }

    #[test]
    fn test_kebab_case_keys() {
        let config = Config::from_toml_str(
            "[heading-numbering]\nmax-heading-level = 4\nmax-segment-value = 20\n",
        )
        .unwrap();
        let parsed: HeadingNumberingConfig = load_rule_config(&config);
        assert_eq!(parsed.max_heading_level, Some(4));
        assert_eq!(parsed.max_segment_value, Some(20));
    }

    #[test]
    fn test_camel_case_aliases() {
        let config = Config::from_toml_str(
            "[heading-numbering]\nmaxHeadingLevel = 3\nexcludePathPatterns = [\"CHANGELOG.md\"]\n",
        )
        .unwrap();
        let parsed: HeadingNumberingConfig = load_rule_config(&config);
        assert_eq!(parsed.max_heading_level, Some(3));
        assert_eq!(parsed.exclude_path_patterns, vec!["CHANGELOG.md"]);
    }
}
