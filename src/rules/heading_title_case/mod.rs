/// Rule heading-title-case: headings use title case.
///
/// The title text after any numbering prefix is title-cased: every word is
/// capitalized except short connector words, which stay lowercase unless
/// they open or close the title or follow a colon. Words that already carry
/// capitals beyond the first letter (acronyms, camelCase, single-letter
/// phase markers) are left alone, as is anything in backticks. Bare
/// filename tokens are wrapped in backticks rather than capitalized.
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::load_rule_config;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintError, LintResult, LintWarning, Rule, RuleCategory, Severity, apply_warning_fixes};
use crate::utils::heading_tree::parse_number_prefix;
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

mod heading_title_case_config;
pub use heading_title_case_config::{HeadingTitleCaseConfig, default_lowercase_words};

static FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+(?:\.[A-Za-z][A-Za-z0-9]{0,4})+$").unwrap());

#[derive(Clone)]
pub struct HeadingTitleCase {
    config: HeadingTitleCaseConfig,
    lowercase_set: HashSet<String>,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl Default for HeadingTitleCase {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingTitleCase {
    pub fn new() -> Self {
        Self::from_config_struct(HeadingTitleCaseConfig::default())
    }

    pub fn from_config_struct(config: HeadingTitleCaseConfig) -> Self {
        let lowercase_set = config
            .effective_lowercase_words()
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            lowercase_set,
            include,
            exclude,
        }
    }

    fn title_case(&self, title: &str) -> String {
        let words: Vec<&str> = title.split_whitespace().collect();
        let last = words.len().saturating_sub(1);
        let mut out: Vec<String> = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let forced = i == 0
                || i == last
                || words.get(i.wrapping_sub(1)).is_some_and(|w| w.ends_with(':'));
            out.push(self.fix_word(word, forced));
        }
        out.join(" ")
    }

    fn fix_word(&self, word: &str, forced: bool) -> String {
        // Code spans are preserved verbatim.
        if word.contains('`') {
            return word.to_string();
        }
        let core_start = word
            .find(|c: char| c.is_alphanumeric())
            .unwrap_or(word.len());
        let core_end = word
            .rfind(|c: char| c.is_alphanumeric())
            .map_or(core_start, |i| i + word[i..].chars().next().map_or(1, char::len_utf8));
        let (prefix, rest) = word.split_at(core_start);
        let (core, suffix) = rest.split_at(core_end - core_start);
        if core.is_empty() {
            return word.to_string();
        }

        // Filenames become code, not capitalized words.
        if core.contains('.') && FILENAME.is_match(core) {
            return format!("{prefix}`{core}`{suffix}");
        }

        let mut chars = core.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return word.to_string(),
        };
        // Capitals after the first letter mark acronyms and identifiers;
        // single uppercase letters mark things like "Phase A".
        let has_internal_caps = chars.clone().any(|c| c.is_uppercase());
        if has_internal_caps || (core.chars().count() == 1 && first.is_uppercase()) {
            return word.to_string();
        }

        if !forced && self.lowercase_set.contains(&core.to_lowercase()) {
            return format!("{prefix}{}{suffix}", core.to_lowercase());
        }

        let capitalized: String = first.to_uppercase().chain(chars).collect();
        format!("{prefix}{capitalized}{suffix}")
    }
}

impl Rule for HeadingTitleCase {
    fn name(&self) -> &'static str {
        "heading-title-case"
    }

    fn description(&self) -> &'static str {
        "Headings use title case"
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
            let title_offset = parse_number_prefix(&heading.raw_text)
                .map_or(0, |prefix| prefix.title_offset);
            let title = &heading.raw_text[title_offset..];
            if title.is_empty() {
                continue;
            }
            let fixed = self.title_case(title);
            if fixed == title {
                continue;
            }
            let Some(info) = ctx.line_info(line) else {
                continue;
            };
            let start = info.byte_offset + heading.content_column + title_offset;
            let column = heading.content_column + title_offset + 1;
            warnings.push(LintWarning {
                rule_name: Some(self.name().to_string()),
                line,
                column,
                end_line: line,
                end_column: column + title.len(),
                message: format!("Heading should use title case: '{title}' -> '{fixed}'"),
                severity: Severity::Warning,
                fix: Some(Fix {
                    range: start..start + title.len(),
                    replacement: fixed,
                }),
            });
        }
        Ok(warnings)
    }

    fn fix(&self, ctx: &LintContext) -> Result<String, LintError> {
        let warnings = self.check(ctx)?;
        apply_warning_fixes(ctx.content, &warnings)
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

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content, None);
        HeadingTitleCase::new().fix(&ctx).unwrap()
    }

    fn check_count(content: &str) -> usize {
        let ctx = LintContext::new(content, None);
        HeadingTitleCase::new().check(&ctx).unwrap().len()
    }

    #[test]
    fn capitalizes_plain_words() {
        assert_eq!(fix("## the quick brown fox\n"), "## The Quick Brown Fox\n");
    }

    #[test]
    fn connector_words_stay_lowercase() {
        assert_eq!(
            fix("## a guide to the settings\n"),
            "## A Guide to the Settings\n"
        );
    }

    #[test]
    fn first_and_last_words_are_always_capitalized() {
        assert_eq!(fix("## what to look for\n"), "## What to Look For\n");
    }

    #[test]
    fn word_after_colon_is_capitalized() {
        assert_eq!(
            fix("## Phase A: getting started\n"),
            "## Phase A: Getting Started\n"
        );
    }

    #[test]
    fn acronyms_and_camel_case_are_preserved() {
        assert_eq!(check_count("## Working on HTTP and iOS\n"), 0);
        assert_eq!(fix("## using JavaScript tooling\n"), "## Using JavaScript Tooling\n");
    }

    #[test]
    fn numbering_prefix_is_untouched() {
        assert_eq!(fix("## 1.2 error handling\n"), "## 1.2 Error Handling\n");
    }

    #[test]
    fn code_spans_are_preserved() {
        assert_eq!(check_count("## The `lower_case` Helper\n"), 0);
    }

    #[test]
    fn filenames_are_backticked() {
        assert_eq!(
            fix("## Helpers (utils.js)\n"),
            "## Helpers (`utils.js`)\n"
        );
    }

    #[test]
    fn already_correct_headings_pass() {
        assert_eq!(check_count("# A Complete Guide\n\n## Setup and Teardown\n"), 0);
    }

    #[test]
    fn extra_lowercase_words_extend_the_default() {
        let rule = HeadingTitleCase::from_config_struct(HeadingTitleCaseConfig {
            lowercase_words: vec!["und".to_string()],
            ..Default::default()
        });
        let ctx = LintContext::new("## Fehler und Tests\n\n## Working of the Parts\n", None);
        assert!(rule.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn replace_default_uses_only_the_configured_list() {
        let rule = HeadingTitleCase::from_config_struct(HeadingTitleCaseConfig {
            lowercase_words: vec!["und".to_string()],
            lowercase_words_replace_default: true,
            ..Default::default()
        });
        // "the" is no longer a connector word, so lowercase "the" is flagged.
        let ctx = LintContext::new("## State of the Art\n", None);
        assert_eq!(rule.check(&ctx).unwrap().len(), 1);
    }
}
