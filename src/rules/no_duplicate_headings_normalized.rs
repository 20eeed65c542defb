/// Rule no-duplicate-headings-normalized: heading titles are unique after
/// normalization.
///
/// Titles are compared with the numbering prefix stripped, backticks
/// removed, lowercased, and whitespace collapsed, so `## 1. Overview` and
/// `### overview` still collide. With siblings-only set, only headings
/// sharing a parent and level are compared, allowing recurring subsection
/// names like "Examples" under different sections.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::heading_tree::{HeadingOutline, OutlineHeading, parse_number_prefix};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct NoDuplicateHeadingsNormalizedConfig {
    /// Compare only headings with the same parent and level.
    #[serde(alias = "siblingsOnly")]
    pub siblings_only: bool,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl RuleConfig for NoDuplicateHeadingsNormalizedConfig {
    const RULE_NAME: &'static str = "no-duplicate-headings-normalized";
}

#[derive(Clone, Default)]
pub struct NoDuplicateHeadingsNormalized {
    config: NoDuplicateHeadingsNormalizedConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl NoDuplicateHeadingsNormalized {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: NoDuplicateHeadingsNormalizedConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    fn normalize(text: &str) -> String {
        let title_offset = parse_number_prefix(text).map_or(0, |prefix| prefix.title_offset);
        let stripped: String = text[title_offset..]
            .chars()
            .filter(|&c| c != '`')
            .collect();
        stripped
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Rule for NoDuplicateHeadingsNormalized {
    fn name(&self) -> &'static str {
        "no-duplicate-headings-normalized"
    }

    fn description(&self) -> &'static str {
        "Heading titles are unique after normalization"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_headings() || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let outline = HeadingOutline::new(
            ctx.headings()
                .map(|(line, h)| OutlineHeading {
                    line,
                    level: h.level,
                    text: h.raw_text.clone(),
                })
                .collect(),
        );

        // Key duplicates either globally or per (parent, level) scope.
        let mut seen: HashMap<(Option<usize>, usize, String), usize> = HashMap::new();
        let mut warnings = Vec::new();
        for index in 0..outline.len() {
            let heading = outline.heading(index);
            let normalized = Self::normalize(&heading.text);
            if normalized.is_empty() {
                continue;
            }
            let key = if self.config.siblings_only {
                (outline.parent(index), heading.level, normalized)
            } else {
                (None, 0, normalized)
            };
            match seen.get(&key) {
                Some(&first_line) => {
                    let Some(info) = ctx.line_info(heading.line) else {
                        continue;
                    };
                    let Some(heading_info) = &info.heading else {
                        continue;
                    };
                    warnings.push(LintWarning {
                        rule_name: Some(self.name().to_string()),
                        line: heading.line,
                        column: heading_info.content_column + 1,
                        end_line: heading.line,
                        end_column: heading_info.content_column + 1 + heading.text.len(),
                        message: format!(
                            "Heading '{}' duplicates the heading on line {first_line}",
                            heading.text
                        ),
                        severity: Severity::Warning,
                        fix: None,
                    });
                }
                None => {
                    seen.insert(key, heading.line);
                }
            }
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
