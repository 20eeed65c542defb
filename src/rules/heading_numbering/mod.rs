/// Rule heading-numbering: numeric heading prefixes must be consistent.
///
/// Sections may number their headings (`## 1. Setup`, `### 1.1 Install`).
/// Once any heading in a section is numbered, every sibling must be, the
/// number of dot-separated segments must match the depth below the nearest
/// unnumbered ancestor, the trailing-period style must agree across the
/// section, and the values must run in sequence. Numbering is validated per
/// section, not per document, so an appendix can count from 0 while the main
/// body counts from 1.
use crate::config::load_rule_config;
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintError, LintResult, LintWarning, Rule, RuleCategory, Severity, apply_warning_fixes};
use crate::utils::heading_tree::{HeadingOutline, NumberPrefix, OutlineHeading};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

mod heading_numbering_config;
pub use heading_numbering_config::HeadingNumberingConfig;

#[derive(Clone, Default)]
pub struct HeadingNumbering {
    config: HeadingNumberingConfig,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl HeadingNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config_struct(config: HeadingNumberingConfig) -> Self {
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            include,
            exclude,
        }
    }

    fn render(segments: &[u64], trailing_period: bool) -> String {
        let mut out = segments
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        if trailing_period {
            out.push('.');
        }
        out
    }

    fn warning(
        &self,
        ctx: &LintContext,
        line: usize,
        column: usize,
        span_len: usize,
        message: String,
        fix: Option<Fix>,
    ) -> LintWarning {
        LintWarning {
            rule_name: Some(self.name().to_string()),
            line,
            column: column + 1,
            end_line: line,
            end_column: column + 1 + span_len,
            message,
            severity: Severity::Warning,
            fix: fix.filter(|f| f.range.end <= ctx.content.len()),
        }
    }

    fn check_heading(
        &self,
        ctx: &LintContext,
        outline: &HeadingOutline,
        index: usize,
        warnings: &mut Vec<LintWarning>,
    ) {
        let heading = outline.heading(index);
        let Some(line_info) = ctx.line_info(heading.line) else {
            return;
        };
        let Some(heading_info) = &line_info.heading else {
            return;
        };
        let content_start = line_info.byte_offset + heading_info.content_column;

        let siblings = outline.siblings(index);
        let numbered: Vec<usize> = siblings
            .iter()
            .copied()
            .filter(|&s| outline.prefix(s).is_some())
            .collect();
        let parent_prefix = outline.parent(index).and_then(|p| outline.prefix(p));

        // Section conventions come from the first numbered sibling, falling
        // back to the parent's own prefix.
        let first_numbered = numbered.first().and_then(|&s| outline.prefix(s));
        let section_period = first_numbered
            .map(|p| p.trailing_period)
            .or(parent_prefix.map(|p| p.trailing_period))
            .unwrap_or(true);
        let ordinal_base: u64 = match first_numbered.and_then(|p| p.segments.last()) {
            Some(0) => 0,
            _ => 1,
        };

        let Some(prefix) = outline.prefix(index) else {
            let section_requires = !numbered.is_empty() || parent_prefix.is_some();
            if section_requires {
                // The suggestion slots the heading in after the numbered
                // siblings that precede it. A missing prefix suppresses the
                // remaining checks for this heading.
                let position = siblings
                    .iter()
                    .take_while(|&&s| s != index)
                    .filter(|&&s| outline.prefix(s).is_some())
                    .count() as u64;
                let mut expected: Vec<u64> =
                    parent_prefix.map(|p| p.segments.clone()).unwrap_or_default();
                expected.push(ordinal_base + position);
                let rendered = Self::render(&expected, section_period);
                warnings.push(self.warning(
                    ctx,
                    heading.line,
                    heading_info.content_column,
                    heading.text.len(),
                    format!(
                        "Heading is missing a number prefix; siblings are numbered, expected '{rendered}'"
                    ),
                    Some(Fix {
                        range: content_start..content_start,
                        replacement: format!("{rendered} "),
                    }),
                ));
            } else {
                self.check_level(ctx, heading, heading_info, warnings);
            }
            return;
        };

        self.check_level(ctx, heading, heading_info, warnings);

        // Segment count must match the depth below the numbering root. A
        // wrong shape makes position-based suggestions meaningless, so the
        // period and sequence checks are skipped.
        let root_level = outline.numbering_root_level(index);
        let expected_count = heading.level.saturating_sub(root_level);
        if prefix.segments.len() != expected_count {
            warnings.push(self.warning(
                ctx,
                heading.line,
                heading_info.content_column,
                prefix.prefix_len,
                format!(
                    "Number prefix '{}' has {} segment(s), expected {} at this depth",
                    prefix.render(),
                    prefix.segments.len(),
                    expected_count
                ),
                None,
            ));
            self.check_bounds(ctx, heading, heading_info, prefix, warnings);
            return;
        }

        let expected_period = section_period;
        if prefix.trailing_period != expected_period {
            let corrected = Self::render(&prefix.segments, expected_period);
            warnings.push(self.warning(
                ctx,
                heading.line,
                heading_info.content_column,
                prefix.prefix_len,
                format!(
                    "Number prefix '{}' does not match the section's period style, expected '{corrected}'",
                    prefix.render()
                ),
                Some(Fix {
                    range: content_start..content_start + prefix.prefix_len,
                    replacement: corrected,
                }),
            ));
        }

        // Sequence: parent prefix plus the 1-based (or 0-based) ordinal
        // among numbered siblings.
        let position = numbered.iter().position(|&s| s == index).unwrap_or(0) as u64;
        let mut expected: Vec<u64> = match parent_prefix {
            Some(p) => p.segments.clone(),
            None => prefix.segments[..prefix.segments.len() - 1].to_vec(),
        };
        expected.push(ordinal_base + position);
        if expected != prefix.segments {
            let rendered = Self::render(&expected, expected_period);
            warnings.push(self.warning(
                ctx,
                heading.line,
                heading_info.content_column,
                prefix.prefix_len,
                format!(
                    "Number prefix '{}' is out of sequence, expected '{rendered}'",
                    prefix.render()
                ),
                Some(Fix {
                    range: content_start..content_start + prefix.prefix_len,
                    replacement: rendered,
                }),
            ));
        }

        self.check_bounds(ctx, heading, heading_info, prefix, warnings);
    }

    fn check_level(
        &self,
        ctx: &LintContext,
        heading: &OutlineHeading,
        heading_info: &crate::lint_context::HeadingInfo,
        warnings: &mut Vec<LintWarning>,
    ) {
        if let Some(max_level) = self.config.max_heading_level
            && heading.level > max_level
        {
            warnings.push(self.warning(
                ctx,
                heading.line,
                heading_info.marker_column,
                heading.level,
                format!(
                    "Heading level {} exceeds the configured maximum of {max_level}",
                    heading.level
                ),
                None,
            ));
        }
    }

    fn check_bounds(
        &self,
        ctx: &LintContext,
        heading: &OutlineHeading,
        heading_info: &crate::lint_context::HeadingInfo,
        prefix: &NumberPrefix,
        warnings: &mut Vec<LintWarning>,
    ) {
        if let Some(max_value) = self.config.max_segment_value {
            let min_level = self.config.max_segment_value_min_level.unwrap_or(1);
            let max_level = self.config.max_segment_value_max_level.unwrap_or(6);
            if (min_level..=max_level).contains(&heading.level)
                && let Some(segment) = prefix.segments.iter().find(|&&s| s > max_value)
            {
                warnings.push(self.warning(
                    ctx,
                    heading.line,
                    heading_info.content_column,
                    prefix.prefix_len,
                    format!("Numbering segment {segment} exceeds the configured maximum of {max_value}"),
                    None,
                ));
            }
        }
    }
}

impl Rule for HeadingNumbering {
    fn name(&self) -> &'static str {
        "heading-numbering"
    }

    fn description(&self) -> &'static str {
        "Heading number prefixes must be sequential and consistently styled"
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
        let mut warnings = Vec::new();
        for index in 0..outline.len() {
            self.check_heading(ctx, &outline, index, &mut warnings);
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
