/// Rule no-tables: pipe tables are not allowed.
///
/// Tables render poorly in diffs and narrow terminals, so table content is
/// expressed as nested lists instead. The fix rewrites each table: one list
/// item per row, the first column in bold as the item label and the
/// remaining columns as sub-items.
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintError, LintResult, LintWarning, Rule, RuleCategory, Severity, apply_warning_fixes};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

static SEPARATOR_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?[\s:|\-]+\|?\s*$").unwrap());

fn default_convert_to() -> String {
    "list".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NoTablesConfig {
    /// Fix target; only "list" is supported, anything else disables the fix.
    #[serde(alias = "convertTo")]
    pub convert_to: String,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for NoTablesConfig {
    fn default() -> Self {
        Self {
            convert_to: default_convert_to(),
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for NoTablesConfig {
    const RULE_NAME: &'static str = "no-tables";
}

#[derive(Clone, Default)]
pub struct NoTables {
    config: NoTablesConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

struct TableBlock {
    /// 0-based index of the header line.
    header: usize,
    /// 0-based index one past the last row.
    end: usize,
}

impl NoTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: NoTablesConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    fn find_tables(ctx: &LintContext) -> Vec<TableBlock> {
        let mut tables = Vec::new();
        let mut idx = 0;
        while idx + 1 < ctx.lines.len() {
            let info = &ctx.lines[idx];
            let line = info.content(ctx.content);
            let next = ctx.lines[idx + 1].content(ctx.content);
            let is_header = !info.in_code_block
                && !info.is_fence_marker
                && line.trim_start().starts_with('|')
                && next.contains('-')
                && SEPARATOR_ROW.is_match(next);
            if !is_header {
                idx += 1;
                continue;
            }
            let mut end = idx + 2;
            while end < ctx.lines.len()
                && ctx.lines[end].content(ctx.content).trim_start().starts_with('|')
            {
                end += 1;
            }
            tables.push(TableBlock { header: idx, end });
            idx = end;
        }
        tables
    }

    fn split_row(line: &str) -> Vec<String> {
        line.trim()
            .trim_start_matches('|')
            .trim_end_matches('|')
            .split('|')
            .map(|cell| cell.trim().to_string())
            .collect()
    }

    fn table_as_list(ctx: &LintContext, table: &TableBlock) -> String {
        let headers = Self::split_row(ctx.lines[table.header].content(ctx.content));
        let mut out = String::new();
        for row_idx in table.header + 2..table.end {
            let cells = Self::split_row(ctx.lines[row_idx].content(ctx.content));
            let mut columns = headers.iter().zip(cells.iter());
            if let Some((label, value)) = columns.next() {
                out.push_str(&format!("- **{label}:** {value}\n"));
            }
            for (label, value) in columns {
                if !value.is_empty() {
                    out.push_str(&format!("  - {label}: {value}\n"));
                }
            }
        }
        // The fix replaces lines without their trailing newline.
        out.truncate(out.trim_end_matches('\n').len());
        out
    }
}

impl Rule for NoTables {
    fn name(&self) -> &'static str {
        "no-tables"
    }

    fn description(&self) -> &'static str {
        "Tables are not allowed; use nested lists"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Table
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('|')
            || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        for table in Self::find_tables(ctx) {
            let header_info = &ctx.lines[table.header];
            let last_info = &ctx.lines[table.end - 1];
            let range = header_info.byte_offset..last_info.byte_offset + last_info.byte_len;
            warnings.push(LintWarning {
                rule_name: Some(self.name().to_string()),
                line: table.header + 1,
                column: 1,
                end_line: table.end,
                end_column: last_info.byte_len + 1,
                message: "Table found; use a nested list instead".to_string(),
                severity: Severity::Warning,
                fix: (self.config.convert_to == "list").then(|| Fix {
                    range,
                    replacement: Self::table_as_list(ctx, &table),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<LintWarning> {
        let ctx = LintContext::new(content, None);
        NoTables::new().check(&ctx).unwrap()
    }

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content, None);
        NoTables::new().fix(&ctx).unwrap()
    }

    #[test]
    fn prose_passes() {
        assert!(check("No tables here, just a | pipe in text?\n").is_empty());
    }

    #[test]
    fn table_is_reported_once() {
        let content = "| Name | Age |\n| --- | --- |\n| Alice | 30 |\n| Bob | 25 |\n";
        let warnings = check(content);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 1);
        assert_eq!(warnings[0].end_line, 4);
    }

    #[test]
    fn fix_converts_rows_to_nested_lists() {
        let content = "| Name | Age | City |\n| --- | --- | --- |\n| Alice | 30 | Oslo |\n";
        assert_eq!(
            fix(content),
            "- **Name:** Alice\n  - Age: 30\n  - City: Oslo\n"
        );
    }

    #[test]
    fn fix_skips_empty_cells() {
        let content = "| Name | Age |\n| --- | --- |\n| Alice | |\n";
        assert_eq!(fix(content), "- **Name:** Alice\n");
    }

    #[test]
    fn disabled_conversion_reports_without_a_fix() {
        let rule = NoTables::from_config_struct(NoTablesConfig {
            convert_to: "none".to_string(),
            ..Default::default()
        });
        let ctx = LintContext::new("| A | B |\n| - | - |\n| 1 | 2 |\n", None);
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].fix.is_none());
    }

    #[test]
    fn table_inside_code_block_passes() {
        let content = "```\n| a | b |\n| - | - |\n| 1 | 2 |\n```\n";
        assert!(check(content).is_empty());
    }

    #[test]
    fn surrounding_prose_survives_the_fix() {
        let content = "Before.\n\n| A | B |\n| - | - |\n| 1 | 2 |\n\nAfter.\n";
        assert_eq!(fix(content), "Before.\n\n- **A:** 1\n  - B: 2\n\nAfter.\n");
    }
}
