/// Rule no-h1-content: no body text between the document title and the
/// first section heading.
///
/// The H1 is a title, not a section; prose belongs under a real section
/// heading. Blank lines, HTML comments, custom anchors, TOC list entries,
/// badge lines and link reference definitions are fine.
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

static BADGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\[!\[|!\[)").unwrap());
static REFERENCE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[[^\]]+\]:\s*\S").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct NoH1ContentConfig {
    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl RuleConfig for NoH1ContentConfig {
    const RULE_NAME: &'static str = "no-h1-content";
}

#[derive(Clone, Default)]
pub struct NoH1Content {
    #[allow(dead_code)]
    config: NoH1ContentConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl NoH1Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: NoH1ContentConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }
}

impl Rule for NoH1Content {
    fn name(&self) -> &'static str {
        "no-h1-content"
    }

    fn description(&self) -> &'static str {
        "No content between the document title and the first section"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_headings() || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let Some(h1_idx) = ctx
            .lines
            .iter()
            .position(|info| info.heading.as_ref().is_some_and(|h| h.level == 1))
        else {
            return Ok(Vec::new());
        };

        let mut warnings = Vec::new();
        for (idx, info) in ctx.lines.iter().enumerate().skip(h1_idx + 1) {
            if info.heading.is_some() {
                break;
            }
            if info.is_blank || info.is_html_comment || info.is_html_line {
                continue;
            }
            // TOC entries, badges and reference definitions conventionally
            // sit under the title.
            let line = info.content(ctx.content);
            if info.list_item.is_some()
                || BADGE_LINE.is_match(line)
                || REFERENCE_DEFINITION.is_match(line)
            {
                continue;
            }
            warnings.push(LintWarning {
                rule_name: Some(self.name().to_string()),
                line: idx + 1,
                column: 1,
                end_line: idx + 1,
                end_column: info.byte_len + 1,
                message: "Content between the document title and the first section heading"
                    .to_string(),
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
