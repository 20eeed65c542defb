/// Rule fenced-code-under-heading: fenced blocks of configured languages
/// must sit in a section headed at an acceptable level.
///
/// With no configured languages the rule matches nothing. A matching block
/// with no heading above it is a violation when `require-heading` is set,
/// and `max-blocks-per-heading` / `exclusive` bound how many matching
/// blocks one section may host.
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

fn default_min_heading_level() -> usize {
    1
}

fn default_max_heading_level() -> usize {
    6
}

fn default_require_heading() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FencedCodeUnderHeadingConfig {
    /// Fence info strings the rule applies to; empty matches nothing.
    pub languages: Vec<String>,

    #[serde(alias = "minHeadingLevel")]
    pub min_heading_level: usize,

    #[serde(alias = "maxHeadingLevel")]
    pub max_heading_level: usize,

    #[serde(alias = "requireHeading")]
    pub require_heading: bool,

    #[serde(alias = "maxBlocksPerHeading")]
    pub max_blocks_per_heading: Option<usize>,

    /// Shorthand for `max-blocks-per-heading = 1`.
    pub exclusive: bool,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for FencedCodeUnderHeadingConfig {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            min_heading_level: default_min_heading_level(),
            max_heading_level: default_max_heading_level(),
            require_heading: default_require_heading(),
            max_blocks_per_heading: None,
            exclusive: false,
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for FencedCodeUnderHeadingConfig {
    const RULE_NAME: &'static str = "fenced-code-under-heading";
}

#[derive(Clone, Default)]
pub struct FencedCodeUnderHeading {
    config: FencedCodeUnderHeadingConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl FencedCodeUnderHeading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: FencedCodeUnderHeadingConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    fn block_limit(&self) -> Option<usize> {
        if self.config.exclusive {
            Some(1)
        } else {
            self.config.max_blocks_per_heading
        }
    }
}

impl Rule for FencedCodeUnderHeading {
    fn name(&self) -> &'static str {
        "fenced-code-under-heading"
    }

    fn description(&self) -> &'static str {
        "Fenced code blocks of configured languages sit under an acceptable heading"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::CodeBlock
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        self.config.languages.is_empty()
            || !ctx.has_code_blocks()
            || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        // Heading line -> matching blocks seen in its section so far.
        let mut blocks_per_heading: std::collections::HashMap<usize, usize> =
            std::collections::HashMap::new();
        let mut open = false;
        let mut current_heading: Option<(usize, usize)> = None;
        for (idx, info) in ctx.lines.iter().enumerate() {
            if let Some(heading) = &info.heading {
                current_heading = Some((idx + 1, heading.level));
            }
            if !info.is_fence_marker {
                continue;
            }
            open = !open;
            if !open {
                continue;
            }
            let matches = info
                .code_block_language
                .as_deref()
                .is_some_and(|language| {
                    self.config.languages.iter().any(|l| l == language)
                });
            if !matches {
                continue;
            }
            let line = idx + 1;
            let Some((heading_line, heading_level)) = current_heading else {
                if self.config.require_heading {
                    warnings.push(LintWarning {
                        rule_name: Some(self.name().to_string()),
                        line,
                        column: 1,
                        end_line: line,
                        end_column: info.byte_len + 1,
                        message: "Fenced code block has no heading above it".to_string(),
                        severity: Severity::Warning,
                        fix: None,
                    });
                }
                continue;
            };
            if heading_level < self.config.min_heading_level
                || heading_level > self.config.max_heading_level
            {
                warnings.push(LintWarning {
                    rule_name: Some(self.name().to_string()),
                    line,
                    column: 1,
                    end_line: line,
                    end_column: info.byte_len + 1,
                    message: format!(
                        "Fenced code block sits under a level {heading_level} heading, allowed range is {}-{}",
                        self.config.min_heading_level, self.config.max_heading_level
                    ),
                    severity: Severity::Warning,
                    fix: None,
                });
                continue;
            }
            let count = blocks_per_heading.entry(heading_line).or_insert(0);
            *count += 1;
            if let Some(limit) = self.block_limit()
                && *count > limit
            {
                warnings.push(LintWarning {
                    rule_name: Some(self.name().to_string()),
                    line,
                    column: 1,
                    end_line: line,
                    end_column: info.byte_len + 1,
                    message: format!(
                        "Section already holds {limit} matching code block(s)"
                    ),
                    severity: Severity::Warning,
                    fix: None,
                });
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
