//! Inline suppression comments.
//!
//! Two forms are recognized, both as HTML comments naming a rule:
//!
//! - `<!-- <rule-name> allow -->` on the violating line, or on the line
//!   immediately before it, suppresses that rule for that line only.
//! - `<!-- <rule-name> disable -->` / `<!-- <rule-name> enable -->` pairs
//!   suppress the rule between the markers. An unmatched disable runs to
//!   the end of the file.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

static SUPPRESSION_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*([A-Za-z0-9][A-Za-z0-9-]*)\s+(allow|disable|enable)\s*-->").unwrap());

#[derive(Debug, Clone, Default)]
pub struct InlineConfig {
    /// Lines (1-based) where a rule is suppressed by an `allow` comment.
    allowed: HashMap<String, HashSet<usize>>,
    /// Lines (1-based) inside a disable/enable block for a rule.
    disabled: HashMap<String, HashSet<usize>>,
}

impl InlineConfig {
    pub fn from_lines(lines: &[&str]) -> Self {
        let mut allowed: HashMap<String, HashSet<usize>> = HashMap::new();
        // Open disable blocks: rule name -> line the disable appeared on.
        let mut open: HashMap<String, usize> = HashMap::new();
        let mut disabled: HashMap<String, HashSet<usize>> = HashMap::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_num = idx + 1;
            for caps in SUPPRESSION_COMMENT.captures_iter(line) {
                let rule = caps[1].to_string();
                match &caps[2] {
                    "allow" => {
                        let entry = allowed.entry(rule).or_default();
                        entry.insert(line_num);
                        entry.insert(line_num + 1);
                    }
                    "disable" => {
                        open.entry(rule).or_insert(line_num);
                    }
                    "enable" => {
                        if let Some(start) = open.remove(&rule) {
                            disabled.entry(rule).or_default().extend(start..=line_num);
                        }
                    }
                    _ => unreachable!(),
                }
            }
        }

        // Unmatched disable suppresses through end of file.
        for (rule, start) in open {
            disabled.entry(rule).or_default().extend(start..=lines.len());
        }

        Self { allowed, disabled }
    }

    /// Whether `rule` is suppressed at `line` (1-based).
    pub fn is_rule_disabled(&self, rule: &str, line: usize) -> bool {
        self.allowed.get(rule).is_some_and(|lines| lines.contains(&line))
            || self.disabled.get(rule).is_some_and(|lines| lines.contains(&line))
    }
}
