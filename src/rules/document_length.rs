/// Rule document-length: documents stay under a line-count ceiling.
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

fn default_maximum() -> usize {
    2000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocumentLengthConfig {
    /// Maximum number of lines.
    pub maximum: usize,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for DocumentLengthConfig {
    fn default() -> Self {
        Self {
            maximum: default_maximum(),
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for DocumentLengthConfig {
    const RULE_NAME: &'static str = "document-length";
}

#[derive(Clone, Default)]
pub struct DocumentLength {
    config: DocumentLengthConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl DocumentLength {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: DocumentLengthConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }
}

impl Rule for DocumentLength {
    fn name(&self) -> &'static str {
        "document-length"
    }

    fn description(&self) -> &'static str {
        "Documents stay under a maximum line count"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Document
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let total = ctx.lines.len();
        if total <= self.config.maximum {
            return Ok(Vec::new());
        }
        // One warning on the first line past the limit.
        let line = self.config.maximum + 1;
        Ok(vec![LintWarning {
            rule_name: Some(self.name().to_string()),
            line,
            column: 1,
            end_line: total,
            end_column: 1,
            message: format!(
                "Document has {total} lines, maximum is {}; split it up",
                self.config.maximum
            ),
            severity: Severity::Warning,
            fix: None,
        }])
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule> {
        Box::new(Self::from_config_struct(load_rule_config(config)))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
