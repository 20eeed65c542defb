/// Rule allow-custom-anchors: custom anchors are empty `<a>` elements
/// placed directly before a heading.
///
/// Anchors exist to give headings stable link targets, so a well-formed
/// anchor is `<a id="..."></a>` alone on its line with a heading as the
/// next non-blank line. Anything else that opens an `<a>` tag on its own
/// line is flagged. The placement requirement can be relaxed with
/// `strict-placement = false`.
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

static ANCHOR_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<a[\s>]").unwrap());
static WELL_FORMED_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*<a id="([^"]+)"></a>\s*$"#).unwrap());

fn default_id_patterns() -> Vec<String> {
    vec!["^[a-z0-9][a-z0-9-]*$".to_string()]
}

fn default_strict_placement() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AllowCustomAnchorsConfig {
    /// Regexes the anchor id must match one of.
    #[serde(alias = "allowedIdPatterns")]
    pub allowed_id_patterns: Vec<String>,

    /// Require the anchor to sit directly above a heading.
    #[serde(alias = "strictPlacement")]
    pub strict_placement: bool,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for AllowCustomAnchorsConfig {
    fn default() -> Self {
        Self {
            allowed_id_patterns: default_id_patterns(),
            strict_placement: default_strict_placement(),
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for AllowCustomAnchorsConfig {
    const RULE_NAME: &'static str = "allow-custom-anchors";
}

#[derive(Clone)]
pub struct AllowCustomAnchors {
    config: AllowCustomAnchorsConfig,
    id_patterns: Vec<Regex>,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl Default for AllowCustomAnchors {
    fn default() -> Self {
        Self::new()
    }
}

impl AllowCustomAnchors {
    pub fn new() -> Self {
        Self::from_config_struct(AllowCustomAnchorsConfig::default())
    }

    pub fn from_config_struct(config: AllowCustomAnchorsConfig) -> Self {
        // Broken user patterns are discarded; if none survive, the default
        // takes over rather than rejecting every anchor in the document.
        let mut id_patterns: Vec<Regex> = config
            .allowed_id_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    log::warn!("allow-custom-anchors: invalid id pattern '{pattern}': {e}");
                    None
                }
            })
            .collect();
        if id_patterns.is_empty() {
            id_patterns = default_id_patterns()
                .iter()
                .filter_map(|pattern| Regex::new(pattern).ok())
                .collect();
        }
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            id_patterns,
            include,
            exclude,
        }
    }

    fn id_allowed(&self, id: &str) -> bool {
        self.id_patterns.iter().any(|pattern| pattern.is_match(id))
    }
}

impl Rule for AllowCustomAnchors {
    fn name(&self) -> &'static str {
        "allow-custom-anchors"
    }

    fn description(&self) -> &'static str {
        "Custom anchors are empty elements directly before a heading"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Html
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains("<a")
            || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        for (idx, info) in ctx.lines.iter().enumerate() {
            if info.in_code_block || info.is_fence_marker {
                continue;
            }
            let line = info.content(ctx.content);
            if !ANCHOR_LINE.is_match(line) {
                continue;
            }

            let message = if let Some(caps) = WELL_FORMED_ANCHOR.captures(line) {
                let id = &caps[1];
                if !self.id_allowed(id) {
                    Some(format!("Anchor id '{id}' does not match any allowed pattern"))
                } else if self.config.strict_placement {
                    // The next non-blank line must be a heading.
                    let next = ctx.lines[idx + 1..]
                        .iter()
                        .find(|info| !info.is_blank && !info.is_html_comment);
                    match next {
                        Some(info) if info.heading.is_some() => None,
                        _ => Some(
                            "Custom anchor must directly precede a heading".to_string(),
                        ),
                    }
                } else {
                    None
                }
            } else {
                Some("Custom anchor must be an empty <a id=\"...\"></a> element on its own line".to_string())
            };

            if let Some(message) = message {
                warnings.push(LintWarning {
                    rule_name: Some(self.name().to_string()),
                    line: idx + 1,
                    column: 1,
                    end_line: idx + 1,
                    end_column: info.byte_len + 1,
                    message,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<LintWarning> {
        let ctx = LintContext::new(content, None);
        AllowCustomAnchors::new().check(&ctx).unwrap()
    }

    #[test]
    fn anchor_before_heading_passes() {
        assert!(check("<a id=\"setup\"></a>\n\n## Setup Steps\n").is_empty());
    }

    #[test]
    fn anchor_without_heading_is_flagged() {
        let warnings = check("<a id=\"setup\"></a>\n\nJust prose.\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("precede a heading"));
    }

    #[test]
    fn anchor_with_content_is_flagged() {
        let warnings = check("<a id=\"x\">text</a>\n\n## Heading Here\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("empty"));
    }

    #[test]
    fn anchor_with_extra_attributes_is_flagged() {
        let warnings = check("<a id=\"x\" class=\"y\"></a>\n\n## Heading Here\n");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn invalid_id_is_flagged() {
        let warnings = check("<a id=\"Bad_ID\"></a>\n\n## Heading Here\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("allowed pattern"));
    }

    #[test]
    fn any_matching_pattern_accepts_the_id() {
        let rule = AllowCustomAnchors::from_config_struct(AllowCustomAnchorsConfig {
            allowed_id_patterns: vec!["^custom-[a-z]+$".to_string(), "^x[0-9]+$".to_string()],
            ..Default::default()
        });
        let ctx = LintContext::new("<a id=\"x42\"></a>\n\n## Heading Here\n", None);
        assert!(rule.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn relaxed_placement_allows_anchors_anywhere() {
        let rule = AllowCustomAnchors::from_config_struct(AllowCustomAnchorsConfig {
            allowed_id_patterns: vec!["^custom-[a-z]+$".to_string()],
            strict_placement: false,
            ..Default::default()
        });
        let ctx = LintContext::new("<a id=\"custom-x\"></a>\n\nText.\n", None);
        assert!(rule.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn inline_links_are_not_anchors() {
        assert!(check("See <a href=\"https://example.com\">the site</a> inline? No: that line does not start with the tag.\n").is_empty());
    }

    #[test]
    fn anchors_in_code_blocks_pass() {
        assert!(check("```html\n<a id=\"x\">nope</a>\n```\n").is_empty());
    }

    #[test]
    fn invalid_configured_patterns_fall_back_to_default() {
        let rule = AllowCustomAnchors::from_config_struct(AllowCustomAnchorsConfig {
            allowed_id_patterns: vec!["[unclosed".to_string()],
            ..Default::default()
        });
        let ctx = LintContext::new("<a id=\"ok-id\"></a>\n\n## Heading Here\n", None);
        assert!(rule.check(&ctx).unwrap().is_empty());
    }
}
