/// Rule one-sentence-per-line: prose lines hold exactly one sentence.
///
/// Each new sentence starts on its own line. Sentence ends are found with
/// the boundary scanner, so abbreviations, decimals, filenames and quoted
/// numbering labels never trigger a split. The fix re-breaks the line,
/// indenting continuation lines to the list item's content column (or the
/// line's own prefix outside lists).
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::{LineInfo, LintContext};
use crate::rule::{Fix, LintError, LintResult, LintWarning, Rule, RuleCategory, Severity, apply_warning_fixes};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};
use crate::utils::sentence_scanner::{abbreviation_set, find_sentence_boundaries};
use crate::utils::text::mask_inline_code;

static LINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(?:>\s*)?").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct OneSentencePerLineConfig {
    /// Fixed indent for list-item continuation lines. When unset, the
    /// item's measured content column is used.
    #[serde(alias = "continuationIndent")]
    pub continuation_indent: Option<usize>,

    /// Replaces the built-in abbreviation list entirely when provided.
    #[serde(alias = "strictAbbreviations")]
    pub strict_abbreviations: Option<Vec<String>>,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl RuleConfig for OneSentencePerLineConfig {
    const RULE_NAME: &'static str = "one-sentence-per-line";
}

#[derive(Clone)]
pub struct OneSentencePerLine {
    config: OneSentencePerLineConfig,
    abbreviations: HashSet<String>,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl Default for OneSentencePerLine {
    fn default() -> Self {
        Self::new()
    }
}

impl OneSentencePerLine {
    pub fn new() -> Self {
        Self::from_config_struct(OneSentencePerLineConfig::default())
    }

    pub fn from_config_struct(config: OneSentencePerLineConfig) -> Self {
        let abbreviations = abbreviation_set(config.strict_abbreviations.as_deref());
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            abbreviations,
            include,
            exclude,
        }
    }

    fn is_prose_line(info: &LineInfo, line: &str) -> bool {
        if info.is_blank
            || info.in_code_block
            || info.is_fence_marker
            || info.is_html_comment
            || info.is_html_line
            || info.heading.is_some()
        {
            return false;
        }
        // Table rows are no prose.
        !line.trim_start().starts_with('|')
    }

    fn continuation_indent(&self, info: &LineInfo, line: &str) -> String {
        if let Some(item) = &info.list_item {
            let width = self.config.continuation_indent.unwrap_or(item.content_column);
            return " ".repeat(width);
        }
        LINE_PREFIX
            .find(line)
            .map_or(String::new(), |m| m.as_str().to_string())
    }

    fn split_line(&self, info: &LineInfo, line: &str, boundaries: &[usize]) -> String {
        let indent = self.continuation_indent(info, line);
        let mut pieces = Vec::with_capacity(boundaries.len() + 1);
        let mut start = 0;
        for &offset in boundaries {
            pieces.push(line[start..offset].trim_end());
            start = offset;
        }
        pieces.push(line[start..].trim_end());
        let mut out = String::with_capacity(line.len() + boundaries.len() * (indent.len() + 1));
        for (i, piece) in pieces.iter().enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(&indent);
            }
            out.push_str(piece);
        }
        out
    }
}

impl Rule for OneSentencePerLine {
    fn name(&self) -> &'static str {
        "one-sentence-per-line"
    }

    fn description(&self) -> &'static str {
        "Each sentence starts on its own line"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Sentence
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        for (idx, info) in ctx.lines.iter().enumerate() {
            let line = info.content(ctx.content);
            if !Self::is_prose_line(info, line) {
                continue;
            }
            let masked = mask_inline_code(line);
            // Scan past the list marker so `1. ` is never read as a
            // sentence end.
            let scan_start = info
                .list_item
                .as_ref()
                .map_or(0, |item| item.content_column.min(masked.len()));
            let boundaries: Vec<usize> = find_sentence_boundaries(&masked[scan_start..], &self.abbreviations)
                .into_iter()
                .map(|offset| offset + scan_start)
                .collect();
            if boundaries.is_empty() {
                continue;
            }
            let replacement = self.split_line(info, line, &boundaries);
            for (n, &offset) in boundaries.iter().enumerate() {
                warnings.push(LintWarning {
                    rule_name: Some(self.name().to_string()),
                    line: idx + 1,
                    column: offset + 1,
                    end_line: idx + 1,
                    end_column: info.byte_len + 1,
                    message: "Sentence should start on a new line".to_string(),
                    severity: Severity::Warning,
                    // One whole-line rewrite covers every boundary.
                    fix: (n == 0).then(|| Fix {
                        range: info.byte_offset..info.byte_offset + info.byte_len,
                        replacement: replacement.clone(),
                    }),
                });
            }
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

    fn check(content: &str) -> Vec<LintWarning> {
        let ctx = LintContext::new(content, None);
        OneSentencePerLine::new().check(&ctx).unwrap()
    }

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content, None);
        OneSentencePerLine::new().fix(&ctx).unwrap()
    }

    #[test]
    fn single_sentence_lines_pass() {
        let content = "This is one sentence.\nThis is another.\n";
        assert!(check(content).is_empty());
    }

    #[test]
    fn two_sentences_on_one_line_are_split() {
        assert_eq!(
            fix("This is one. This is two.\n"),
            "This is one.\nThis is two.\n"
        );
    }

    #[test]
    fn list_item_continuation_uses_content_column() {
        assert_eq!(fix("- One. Two.\n"), "- One.\n  Two.\n");
        assert_eq!(fix("1. First thing. Second thing.\n"), "1. First thing.\n   Second thing.\n");
    }

    #[test]
    fn configured_continuation_indent_wins() {
        let rule = OneSentencePerLine::from_config_struct(OneSentencePerLineConfig {
            continuation_indent: Some(4),
            ..Default::default()
        });
        let ctx = LintContext::new("- One. Two.\n", None);
        assert_eq!(rule.fix(&ctx).unwrap(), "- One.\n    Two.\n");
    }

    #[test]
    fn blockquote_continuation_keeps_the_quote_marker() {
        assert_eq!(fix("> First. Second.\n"), "> First.\n> Second.\n");
    }

    #[test]
    fn abbreviations_and_filenames_do_not_split() {
        assert!(check("Open config.json and see e.g. the notes.\n").is_empty());
    }

    #[test]
    fn inline_code_is_never_split() {
        assert!(check("Run `a.sh; b. Sh` to begin now\n").is_empty());
    }

    #[test]
    fn code_blocks_and_headings_are_skipped() {
        let content = "# One. Two.\n\n```\nfirst. Second.\n```\n";
        assert!(check(content).is_empty());
    }

    #[test]
    fn tables_are_skipped() {
        assert!(check("| a. B | c. D |\n").is_empty());
    }

    #[test]
    fn warning_reports_boundary_column() {
        let warnings = check("First. Second.\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 1);
        assert_eq!(warnings[0].column, 8);
        assert!(warnings[0].fix.is_some());
    }

    #[test]
    fn override_abbreviations_replace_defaults() {
        let rule = OneSentencePerLine::from_config_struct(OneSentencePerLineConfig {
            strict_abbreviations: Some(vec!["zz.".to_string()]),
            ..Default::default()
        });
        let ctx = LintContext::new("See Dr. Smith now.\n", None);
        assert_eq!(rule.check(&ctx).unwrap().len(), 1);
    }
}
