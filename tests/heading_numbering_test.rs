use mdstyle::lint_context::LintContext;
use mdstyle::rule::Rule;
use mdstyle::rules::heading_numbering::{HeadingNumbering, HeadingNumberingConfig};
use mdstyle::utils::heading_tree::{HeadingOutline, OutlineHeading};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn check(content: &str) -> Vec<mdstyle::rule::LintWarning> {
    let ctx = LintContext::new(content, None);
    HeadingNumbering::new().check(&ctx).unwrap()
}

fn fix(content: &str) -> String {
    let ctx = LintContext::new(content, None);
    HeadingNumbering::new().fix(&ctx).unwrap()
}

#[test]
fn document_with_full_numbering_passes() {
    let content = "\
# Design Notes

## 1. Motivation

### 1.1 Background

### 1.2 Goals

## 2. Approach

### 2.1 Data Model

### 2.2 Algorithms

## 3. Rollout
";
    assert_eq!(check(content), vec![]);
}

#[test]
fn sequence_gap_reports_expected_and_actual() {
    let content = "# T\n\n## 1. First\n\n## 2. Second\n\n## 4. Skip\n";
    let warnings = check(content);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, 7);
    assert!(warnings[0].message.contains("'4.'"));
    assert!(warnings[0].message.contains("expected '3.'"));
}

#[test]
fn fix_renumbers_a_whole_section() {
    let content = "# T\n\n## Steps\n\n### 1. Download\n\n### 3. Install\n\n### 5. Verify\n";
    assert_eq!(
        fix(content),
        "# T\n\n## Steps\n\n### 1. Download\n\n### 2. Install\n\n### 3. Verify\n"
    );
}

#[test]
fn missing_prefix_fix_inserts_the_number() {
    let content = "# T\n\n## 1. Alpha\n\n## 2. Beta\n\n## Gamma\n";
    assert_eq!(fix(content), "# T\n\n## 1. Alpha\n\n## 2. Beta\n\n## 3. Gamma\n");
}

#[test]
fn period_style_follows_the_first_numbered_sibling() {
    // The first sibling has no trailing period, so the others must not
    // either.
    let content = "# T\n\n## 1 First\n\n## 2. Second\n";
    let warnings = check(content);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, 5);
    assert_eq!(warnings[0].fix.as_ref().unwrap().replacement, "2");
}

#[test]
fn zero_based_appendix_beside_one_based_body() {
    let content = "\
# T

## Body

### 1. One

### 2. Two

## Appendix

### 0. Zero

### 1. One
";
    assert_eq!(check(content), vec![]);
}

#[test]
fn nested_numbering_follows_the_parent_prefix() {
    let content = "# T\n\n## 2. Section\n";
    // "2." alone out of sequence.
    let warnings = check(content);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("expected '1.'"));

    let content = "# T\n\n## 1. Section\n\n### 2.1 Wrong Parent\n";
    let warnings = check(content);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("expected '1.1'"));
}

#[test]
fn segment_count_violation_reports_depth() {
    let content = "# T\n\n## 1.1 Too Deep\n";
    let warnings = check(content);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("2 segment(s), expected 1"));
}

#[test]
fn inline_allow_comment_suppresses_one_heading() {
    let content = "# T\n\n## 1. First\n\n<!-- heading-numbering allow -->\n## 4. Jump\n";
    let rules: Vec<Box<dyn Rule>> =
        vec![Box::new(HeadingNumbering::new())];
    let warnings = mdstyle::lint(content, &rules, None).unwrap();
    assert_eq!(warnings.len(), 0);
}

#[test]
fn bounds_from_toml_config() {
    let config = mdstyle::Config::from_toml_str(
        "[heading-numbering]\nmax-heading-level = 3\nmax-segment-value = 50\n",
    )
    .unwrap();
    let rule = HeadingNumbering::from_config(&config);
    let ctx = LintContext::new("# A\n\n## B\n\n#### C Here\n", None);
    let warnings = rule.check(&ctx).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("maximum of 3"));
}

#[test]
fn exclude_patterns_from_config_struct() {
    let rule = HeadingNumbering::from_config_struct(HeadingNumberingConfig {
        exclude_path_patterns: vec!["generated/**".to_string()],
        ..Default::default()
    });
    let ctx = LintContext::new(
        "# T\n\n## 9. Wrong\n",
        Some("generated/api.md".into()),
    );
    assert!(rule.should_skip(&ctx));
}

proptest! {
    // Parent reconstruction is a pure function of the heading list.
    #[test]
    fn outline_reconstruction_is_idempotent(levels in proptest::collection::vec(1usize..=6, 0..40)) {
        let headings: Vec<OutlineHeading> = levels
            .iter()
            .enumerate()
            .map(|(i, &level)| OutlineHeading {
                line: i * 2 + 1,
                level,
                text: format!("Heading {i}"),
            })
            .collect();
        let first = HeadingOutline::new(headings.clone());
        let second = HeadingOutline::new(headings);
        for i in 0..first.len() {
            prop_assert_eq!(first.parent(i), second.parent(i));
        }
    }

    // A parent always comes earlier and sits at a strictly shallower level.
    #[test]
    fn parents_are_earlier_and_shallower(levels in proptest::collection::vec(1usize..=6, 0..40)) {
        let headings: Vec<OutlineHeading> = levels
            .iter()
            .enumerate()
            .map(|(i, &level)| OutlineHeading {
                line: i + 1,
                level,
                text: String::new(),
            })
            .collect();
        let outline = HeadingOutline::new(headings);
        for i in 0..outline.len() {
            if let Some(p) = outline.parent(i) {
                prop_assert!(p < i);
                prop_assert!(outline.heading(p).level < outline.heading(i).level);
            }
        }
    }
}
