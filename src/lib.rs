//! mdstyle: style and structure lint rules for Markdown documents.
//!
//! Each rule inspects a pre-parsed [`LintContext`](lint_context::LintContext)
//! and reports [`LintWarning`](rule::LintWarning)s, many with a mechanical
//! fix. The [`lint`] driver runs a rule set over one document, honoring
//! per-rule path scoping and inline suppression comments.

pub mod config;
pub mod inline_config;
pub mod lint_context;
pub mod rule;
pub mod rules;
pub mod utils;

use std::path::PathBuf;

pub use config::Config;
pub use lint_context::LintContext;
pub use rule::{Fix, LintError, LintResult, LintWarning, Rule, Severity};
pub use rules::{all_rules, rule_by_name};

/// Lint one document with the given rules.
///
/// Warnings come back sorted by position. Rules whose `should_skip` fires
/// are not run at all; warnings on lines covered by an inline suppression
/// comment for that rule are dropped.
pub fn lint(
    content: &str,
    rules: &[Box<dyn Rule>],
    source_file: Option<PathBuf>,
) -> LintResult {
    let mut warnings = Vec::new();
    if content.is_empty() {
        return Ok(warnings);
    }

    let ctx = LintContext::new(content, source_file);
    for rule in rules {
        if rule.should_skip(&ctx) {
            continue;
        }
        let mut rule_warnings = rule.check(&ctx)?;
        rule_warnings.retain(|w| !ctx.inline_config().is_rule_disabled(rule.name(), w.line));
        warnings.extend(rule_warnings);
    }

    warnings.sort_by_key(|w| (w.line, w.column));
    Ok(warnings)
}

/// Apply every rule's fix in registration order, re-parsing between rules
/// so later fixes see earlier ones.
pub fn fix_all(
    content: &str,
    rules: &[Box<dyn Rule>],
    source_file: Option<PathBuf>,
) -> Result<String, LintError> {
    let mut current = content.to_string();
    for rule in rules {
        let ctx = LintContext::new(&current, source_file.clone());
        if rule.should_skip(&ctx) {
            continue;
        }
        current = rule.fix(&ctx)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_reports_sorted_warnings() {
        let rules = all_rules(&Config::default());
        let content = "# Title\n\nFirst. Second.\n\n## notes\n";
        let warnings = lint(content, &rules, None).unwrap();
        assert!(!warnings.is_empty());
        let positions: Vec<_> = warnings.iter().map(|w| (w.line, w.column)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn empty_content_yields_no_warnings() {
        let rules = all_rules(&Config::default());
        assert!(lint("", &rules, None).unwrap().is_empty());
    }

    #[test]
    fn inline_allow_suppresses_a_single_line() {
        let rules = all_rules(&Config::default());
        let content = "# Title and More\n\n## Notes <!-- heading-min-words allow -->\n";
        let warnings = lint(content, &rules, None).unwrap();
        assert!(!warnings.iter().any(|w| w.rule_name.as_deref() == Some("heading-min-words")));
    }

    #[test]
    fn disable_enable_block_suppresses_a_range() {
        let content = "# Long Title\n\n<!-- no-tables disable -->\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\n<!-- no-tables enable -->\n";
        let rules = all_rules(&Config::default());
        let warnings = lint(content, &rules, None).unwrap();
        assert!(!warnings.iter().any(|w| w.rule_name.as_deref() == Some("no-tables")));
    }

    #[test]
    fn fix_all_applies_every_rule() {
        let rules = all_rules(&Config::default());
        let content = "# Project Guide\n\n## setup steps\n\nDo this. Then that.\n";
        let fixed = fix_all(content, &rules, None).unwrap();
        assert!(fixed.contains("## Setup Steps"));
        assert!(fixed.contains("Do this.\nThen that."));
    }
}
