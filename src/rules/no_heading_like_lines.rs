/// Rule no-heading-like-lines: bold lines posing as headings.
///
/// A paragraph consisting solely of strong emphasis (`**Summary:**`) or a
/// numbered bold item (`1. **Introduction**`) reads like a heading but is
/// invisible to the document outline. The fix strips the markup, or turns
/// the line into a real heading when convert-to-heading is set.
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintError, LintResult, LintWarning, Rule, RuleCategory, Severity, apply_warning_fixes};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

static BOLD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\*\*([^*]+)\*\*|__([^_]+)__)\s*$").unwrap()
});
static NUMBERED_BOLD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+[.)]\s+(?:\*\*([^*]+)\*\*|__([^_]+)__)\s*$").unwrap()
});

fn default_heading_level() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NoHeadingLikeLinesConfig {
    /// Rewrite flagged lines as real headings instead of plain text.
    #[serde(alias = "convertToHeading")]
    pub convert_to_heading: bool,

    /// Heading level used when converting.
    #[serde(alias = "defaultHeadingLevel")]
    pub default_heading_level: usize,

    /// Overrides `default-heading-level` when set.
    #[serde(alias = "fixedHeadingLevel")]
    pub fixed_heading_level: Option<usize>,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for NoHeadingLikeLinesConfig {
    fn default() -> Self {
        Self {
            convert_to_heading: false,
            default_heading_level: default_heading_level(),
            fixed_heading_level: None,
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for NoHeadingLikeLinesConfig {
    const RULE_NAME: &'static str = "no-heading-like-lines";
}

#[derive(Clone, Default)]
pub struct NoHeadingLikeLines {
    config: NoHeadingLikeLinesConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl NoHeadingLikeLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: NoHeadingLikeLinesConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    /// The bold text of a heading-like line, when the line qualifies.
    fn heading_like_text(line: &str) -> Option<String> {
        let caps = BOLD_LINE
            .captures(line)
            .or_else(|| NUMBERED_BOLD_LINE.captures(line))?;
        let text = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim())?;
        if text.is_empty() {
            return None;
        }
        Some(text.to_string())
    }

    fn replacement(&self, text: &str) -> String {
        if self.config.convert_to_heading {
            let level = self
                .config
                .fixed_heading_level
                .unwrap_or(self.config.default_heading_level)
                .clamp(1, 6);
            format!("{} {}", "#".repeat(level), text.trim_end_matches(':'))
        } else {
            text.to_string()
        }
    }
}

impl Rule for NoHeadingLikeLines {
    fn name(&self) -> &'static str {
        "no-heading-like-lines"
    }

    fn description(&self) -> &'static str {
        "Bold lines must not stand in for headings"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        for (idx, info) in ctx.lines.iter().enumerate() {
            if info.in_code_block || info.is_fence_marker || info.heading.is_some() {
                continue;
            }
            // Only standalone lines: a bold lead-in inside a paragraph is
            // ordinary emphasis.
            if idx > 0 && !ctx.lines[idx - 1].is_blank && ctx.lines[idx - 1].heading.is_none() {
                continue;
            }
            let line = info.content(ctx.content);
            let Some(text) = Self::heading_like_text(line) else {
                continue;
            };
            warnings.push(LintWarning {
                rule_name: Some(self.name().to_string()),
                line: idx + 1,
                column: 1,
                end_line: idx + 1,
                end_column: info.byte_len + 1,
                message: format!("Line looks like a heading: '{}'", line.trim()),
                severity: Severity::Warning,
                fix: Some(Fix {
                    range: info.byte_offset..info.byte_offset + info.byte_len,
                    replacement: self.replacement(&text),
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
