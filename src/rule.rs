use std::any::Any;
use std::fmt;
use std::ops::Range;

use crate::lint_context::LintContext;

/// Result of running a rule's check: warnings, or an internal error.
pub type LintResult = Result<Vec<LintWarning>, LintError>;

/// Internal lint engine errors. Rule misconfiguration never surfaces here;
/// rules degrade to defaults instead of failing the pass.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("fix failed: {0}")]
    FixFailed(String),
}

/// Severity of a lint warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Error,
    #[default]
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A mechanical replacement for the offending span, expressed as a byte
/// range into the original content.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub rule_name: Option<String>,
    /// 1-based line of the violation.
    pub line: usize,
    /// 1-based column of the violation start.
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub message: String,
    pub severity: Severity,
    pub fix: Option<Fix>,
}

/// Coarse content category used to skip rules that cannot fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Heading,
    Sentence,
    CodeBlock,
    Table,
    Html,
    Document,
}

pub trait Rule: dyn_clone::DynClone + Send + Sync {
    /// Stable rule name used in configuration and suppression comments.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn category(&self) -> RuleCategory;

    /// Cheap pre-check so documents without relevant content skip the rule.
    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }

    fn check(&self, ctx: &LintContext) -> LintResult;

    /// Return the fixed document. The default keeps content unchanged;
    /// rules with mechanical fixes override this.
    fn fix(&self, ctx: &LintContext) -> Result<String, LintError> {
        Ok(ctx.content.to_string())
    }

    /// Construct the rule from the global config, falling back to defaults
    /// for missing or malformed sections.
    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;

    fn as_any(&self) -> &dyn Any;
}

dyn_clone::clone_trait_object!(Rule);

/// Apply all fixes from a warning list to content, back to front so byte
/// ranges stay valid. Overlapping fixes keep the earliest one.
pub fn apply_warning_fixes(content: &str, warnings: &[LintWarning]) -> Result<String, LintError> {
    let mut fixes: Vec<&Fix> = warnings.iter().filter_map(|w| w.fix.as_ref()).collect();
    fixes.sort_by_key(|f| (f.range.start, f.range.end));
    fixes.dedup_by(|b, a| b.range.start < a.range.end);

    let mut result = content.to_string();
    for fix in fixes.iter().rev() {
        if fix.range.end > result.len() || !result.is_char_boundary(fix.range.start) {
            return Err(LintError::FixFailed(format!(
                "fix range {:?} out of bounds for content of length {}",
                fix.range,
                result.len()
            )));
        }
        result.replace_range(fix.range.clone(), &fix.replacement);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning_with_fix(start: usize, end: usize, replacement: &str) -> LintWarning {
        LintWarning {
            rule_name: Some("test".to_string()),
            line: 1,
            column: 1,
            end_line: 1,
            end_column: 1,
            message: String::new(),
            severity: Severity::Warning,
            fix: Some(Fix {
                range: start..end,
                replacement: replacement.to_string(),
            }),
        }
    }

    #[test]
    fn test_apply_fixes_back_to_front() {
        let content = "aaa bbb ccc";
        let warnings = vec![warning_with_fix(0, 3, "xx"), warning_with_fix(8, 11, "yy")];
        assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "xx bbb yy");
    }

    #[test]
    fn test_apply_fixes_drops_overlaps() {
        let content = "abcdef";
        let warnings = vec![warning_with_fix(0, 4, "X"), warning_with_fix(2, 6, "Y")];
        assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "Xef");
    }

    #[test]
    fn test_apply_fixes_rejects_out_of_bounds() {
        let warnings = vec![warning_with_fix(0, 10, "X")];
        assert!(apply_warning_fixes("short", &warnings).is_err());
    }
}
