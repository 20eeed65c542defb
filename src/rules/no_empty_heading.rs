/// Rule no-empty-heading: every section carries content.
///
/// A heading whose section, up to the next heading, holds nothing but blank
/// lines is a hole in the document. Headings that only group deeper headings
/// are containers and exempt. What counts as content is configurable: blank
/// lines, HTML comments, and bare HTML lines are ignored by default while
/// code block lines count.
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

fn default_minimum_content_lines() -> usize {
    1
}

fn default_count_code_block_lines() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NoEmptyHeadingConfig {
    #[serde(alias = "minimumContentLines")]
    pub minimum_content_lines: usize,

    #[serde(alias = "countBlankLinesAsContent")]
    pub count_blank_lines_as_content: bool,

    #[serde(alias = "countHTMLCommentsAsContent", alias = "countHtmlCommentsAsContent")]
    pub count_html_comments_as_content: bool,

    #[serde(alias = "countHtmlLinesAsContent", alias = "countHTMLLinesAsContent")]
    pub count_html_lines_as_content: bool,

    #[serde(alias = "countCodeBlockLinesAsContent")]
    pub count_code_block_lines_as_content: bool,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for NoEmptyHeadingConfig {
    fn default() -> Self {
        Self {
            minimum_content_lines: default_minimum_content_lines(),
            count_blank_lines_as_content: false,
            count_html_comments_as_content: false,
            count_html_lines_as_content: false,
            count_code_block_lines_as_content: default_count_code_block_lines(),
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for NoEmptyHeadingConfig {
    const RULE_NAME: &'static str = "no-empty-heading";
}

#[derive(Clone, Default)]
pub struct NoEmptyHeading {
    config: NoEmptyHeadingConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl NoEmptyHeading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: NoEmptyHeadingConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    fn counts_as_content(&self, info: &crate::lint_context::LineInfo) -> bool {
        if info.is_blank {
            return self.config.count_blank_lines_as_content;
        }
        if info.in_code_block || info.is_fence_marker {
            return self.config.count_code_block_lines_as_content;
        }
        if info.is_html_comment {
            return self.config.count_html_comments_as_content;
        }
        if info.is_html_line {
            return self.config.count_html_lines_as_content;
        }
        true
    }
}

impl Rule for NoEmptyHeading {
    fn name(&self) -> &'static str {
        "no-empty-heading"
    }

    fn description(&self) -> &'static str {
        "Every heading's section must have content"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_headings() || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let headings: Vec<_> = ctx.headings().collect();
        let mut warnings = Vec::new();
        for (position, &(line, heading)) in headings.iter().enumerate() {
            // Container exemption: the next heading is nested under this one.
            if headings
                .get(position + 1)
                .is_some_and(|&(_, next)| next.level > heading.level)
            {
                continue;
            }
            let section_end = headings
                .get(position + 1)
                .map_or(ctx.lines.len(), |&(next_line, _)| next_line - 1);
            let content_lines = ctx.lines[line..section_end]
                .iter()
                .filter(|info| self.counts_as_content(info))
                .count();
            if content_lines >= self.config.minimum_content_lines {
                continue;
            }
            warnings.push(LintWarning {
                rule_name: Some(self.name().to_string()),
                line,
                column: heading.marker_column + 1,
                end_line: line,
                end_column: heading.content_column + 1 + heading.raw_text.len(),
                message: format!(
                    "Section '{}' has {content_lines} content line(s), minimum is {}",
                    heading.raw_text.trim(),
                    self.config.minimum_content_lines
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
        NoEmptyHeading::new().check(&ctx).unwrap()
    }

    #[test]
    fn sections_with_prose_pass() {
        assert!(check("# Title\n\n## Section One\n\nBody text.\n").is_empty());
    }

    #[test]
    fn empty_trailing_section_is_flagged() {
        let warnings = check("# Title\n\nIntro.\n\n## Section One\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 5);
    }

    #[test]
    fn container_heading_is_exempt() {
        assert!(check("# Title\n\n## Parent Section\n\n### Child Section\n\nBody.\n").is_empty());
    }

    #[test]
    fn comment_only_section_is_flagged_by_default() {
        let warnings = check("# Title\n\nIntro.\n\n## Section One\n\n<!-- placeholder -->\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 5);
    }

    #[test]
    fn comments_can_be_counted_as_content() {
        let rule = NoEmptyHeading::from_config_struct(NoEmptyHeadingConfig {
            count_html_comments_as_content: true,
            ..Default::default()
        });
        let ctx = LintContext::new("# Title\n\nIntro.\n\n## Section One\n\n<!-- placeholder -->\n", None);
        assert!(rule.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn code_block_counts_as_content_by_default() {
        assert!(check("# Title\n\nIntro.\n\n## Section One\n\n```text\nonly code\n```\n").is_empty());
    }

    #[test]
    fn code_block_can_be_discounted() {
        let rule = NoEmptyHeading::from_config_struct(NoEmptyHeadingConfig {
            count_code_block_lines_as_content: false,
            ..Default::default()
        });
        let ctx = LintContext::new("# Title\n\nIntro.\n\n## Section One\n\n```text\nonly code\n```\n", None);
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 5);
    }

    #[test]
    fn minimum_content_lines_raises_the_bar() {
        let rule = NoEmptyHeading::from_config_struct(NoEmptyHeadingConfig {
            minimum_content_lines: 2,
            ..Default::default()
        });
        let ctx = LintContext::new("# Title\n\nIntro here.\n\n## Section One\n\nOne line.\n", None);
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 5);
    }
}
