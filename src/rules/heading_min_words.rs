/// Rule heading-min-words: heading titles carry a minimum word count.
///
/// One-word headings like "Notes" say little about their section. The word
/// count ignores any numbering prefix unless configured otherwise, and only
/// headings at or above the configured depth cutoff are checked.
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::heading_tree::parse_number_prefix;
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

fn default_min_words() -> usize {
    2
}

fn default_level_cutoff() -> usize {
    2
}

fn default_strip_numbering() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeadingMinWordsConfig {
    #[serde(alias = "minWords")]
    pub min_words: usize,

    /// Headings deeper than this level are not checked.
    #[serde(alias = "applyToLevelsAtOrBelow")]
    pub apply_to_levels_at_or_below: usize,

    #[serde(alias = "minLevel")]
    pub min_level: Option<usize>,

    #[serde(alias = "maxLevel")]
    pub max_level: Option<usize>,

    /// Exact titles that pass regardless of word count.
    #[serde(alias = "allowList")]
    pub allow_list: Vec<String>,

    #[serde(alias = "stripNumbering")]
    pub strip_numbering: bool,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for HeadingMinWordsConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            apply_to_levels_at_or_below: default_level_cutoff(),
            min_level: None,
            max_level: None,
            allow_list: Vec::new(),
            strip_numbering: default_strip_numbering(),
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for HeadingMinWordsConfig {
    const RULE_NAME: &'static str = "heading-min-words";
}

#[derive(Clone, Default)]
pub struct HeadingMinWords {
    config: HeadingMinWordsConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl HeadingMinWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: HeadingMinWordsConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    fn level_in_scope(&self, level: usize) -> bool {
        level <= self.config.apply_to_levels_at_or_below
            && self.config.min_level.is_none_or(|min| level >= min)
            && self.config.max_level.is_none_or(|max| level <= max)
    }
}

impl Rule for HeadingMinWords {
    fn name(&self) -> &'static str {
        "heading-min-words"
    }

    fn description(&self) -> &'static str {
        "Heading titles have a minimum number of words"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_headings() || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        for (line, heading) in ctx.headings() {
            if !self.level_in_scope(heading.level) {
                continue;
            }
            let title = if self.config.strip_numbering {
                let title_offset = parse_number_prefix(&heading.raw_text)
                    .map_or(0, |prefix| prefix.title_offset);
                &heading.raw_text[title_offset..]
            } else {
                heading.raw_text.as_str()
            };
            let title = title.trim();
            if self.config.allow_list.iter().any(|allowed| allowed == title) {
                continue;
            }
            let words = title.split_whitespace().count();
            if words == 0 || words >= self.config.min_words {
                // Empty titles are no-empty-heading's concern.
                continue;
            }
            warnings.push(LintWarning {
                rule_name: Some(self.name().to_string()),
                line,
                column: heading.content_column + 1,
                end_line: line,
                end_column: heading.content_column + 1 + heading.raw_text.len(),
                message: format!(
                    "Heading '{title}' has {words} word(s), minimum is {}",
                    self.config.min_words
                ),
                severity: Severity::Warning,
                fix: None,
            });
        }
        Ok(warnings)
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(Self::from_config_struct(load_rule_config(config)))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<LintWarning> {
        let ctx = LintContext::new(content, None);
        HeadingMinWords::new().check(&ctx).unwrap()
    }

    #[test]
    fn multi_word_headings_pass() {
        assert!(check("# Getting Started\n\n## Error Handling\n").is_empty());
    }

    #[test]
    fn single_word_heading_is_flagged() {
        let warnings = check("## Notes\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("1 word(s), minimum is 2"));
    }

    #[test]
    fn numbering_prefix_does_not_count_as_a_word() {
        let warnings = check("## 1.2 Setup\n");
        assert_eq!(warnings.len(), 1);
        assert!(check("## 1.2 Setup Steps\n").is_empty());
    }

    #[test]
    fn headings_below_the_cutoff_are_not_checked() {
        assert!(check("### Notes\n").is_empty());
    }

    #[test]
    fn level_range_restricts_scope() {
        let rule = HeadingMinWords::from_config_struct(HeadingMinWordsConfig {
            apply_to_levels_at_or_below: 4,
            min_level: Some(3),
            max_level: Some(3),
            ..Default::default()
        });
        let ctx = LintContext::new("## One\n\n### Two Words\n", None);
        assert!(rule.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn allow_list_exempts_exact_titles() {
        let rule = HeadingMinWords::from_config_struct(HeadingMinWordsConfig {
            allow_list: vec!["Overview".to_string()],
            ..Default::default()
        });
        let ctx = LintContext::new("## Overview\n\n## Notes\n", None);
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 3);
    }

    #[test]
    fn unstripped_numbering_counts_as_a_word() {
        let rule = HeadingMinWords::from_config_struct(HeadingMinWordsConfig {
            min_words: 3,
            strip_numbering: false,
            ..Default::default()
        });
        let ctx = LintContext::new("## 1.2.3 Setup\n", None);
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("2 word(s)"));
    }

    #[test]
    fn empty_title_is_left_to_other_rules() {
        assert!(check("## 1.\n").is_empty());
    }

    #[test]
    fn configured_minimum() {
        let rule = HeadingMinWords::from_config_struct(HeadingMinWordsConfig {
            min_words: 3,
            ..Default::default()
        });
        let ctx = LintContext::new("## Two Words\n", None);
        assert_eq!(rule.check(&ctx).unwrap().len(), 1);
    }
}
