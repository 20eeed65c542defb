/// Rule ascii-only: documents contain only ASCII characters.
///
/// Smart punctuation and common typographic symbols pasted from editors and
/// chat tools get a mechanical ASCII replacement; anything else non-ASCII is
/// reported without a fix. Paths matching the unicode pattern list are
/// exempt wholesale, listed emoji are exempt on matching paths, and code
/// blocks are left alone by default since samples often quote real output.
use std::collections::HashSet;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::config::{RuleConfig, load_rule_config};
use crate::lint_context::{LineInfo, LintContext};
use crate::rule::{Fix, LintError, LintResult, LintWarning, Rule, RuleCategory, Severity, apply_warning_fixes};
use crate::utils::path_patterns::{PathMatcher, path_in_scope};

/// ASCII stand-ins for the usual suspects.
static REPLACEMENTS: phf::Map<char, &'static str> = phf_map! {
    '\u{2018}' => "'",  // left single quote
    '\u{2019}' => "'",  // right single quote
    '\u{201C}' => "\"", // left double quote
    '\u{201D}' => "\"", // right double quote
    '\u{2013}' => "-",  // en dash
    '\u{2014}' => "--", // em dash
    '\u{2026}' => "...",
    '\u{2192}' => "->",
    '\u{2190}' => "<-",
    '\u{21D2}' => "=>",
    '\u{00D7}' => "x",
    '\u{00A0}' => " ",  // no-break space
    '\u{2022}' => "-",  // bullet
    '\u{2212}' => "-",  // minus sign
};

fn default_allow_unicode_in_code_blocks() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AsciiOnlyConfig {
    /// Non-ASCII characters that are acceptable anywhere.
    #[serde(alias = "allowedChars")]
    pub allowed_chars: Vec<char>,

    /// Paths where any non-ASCII text is acceptable.
    #[serde(alias = "allowedPathPatternsUnicode")]
    pub allowed_path_patterns_unicode: Vec<String>,

    /// Paths where the characters in `allowed-emoji` are acceptable.
    #[serde(alias = "allowedPathPatternsEmoji")]
    pub allowed_path_patterns_emoji: Vec<String>,

    #[serde(alias = "allowedEmoji")]
    pub allowed_emoji: Vec<String>,

    #[serde(alias = "allowUnicodeInCodeBlocks")]
    pub allow_unicode_in_code_blocks: bool,

    /// Fence languages whose blocks are checked regardless of the
    /// code-block allowance.
    #[serde(alias = "disallowUnicodeInCodeBlockTypes")]
    pub disallow_unicode_in_code_block_types: Vec<String>,

    #[serde(alias = "excludePathPatterns")]
    pub exclude_path_patterns: Vec<String>,

    #[serde(alias = "includePathPatterns")]
    pub include_path_patterns: Vec<String>,
}

impl Default for AsciiOnlyConfig {
    fn default() -> Self {
        Self {
            allowed_chars: Vec::new(),
            allowed_path_patterns_unicode: Vec::new(),
            allowed_path_patterns_emoji: Vec::new(),
            allowed_emoji: Vec::new(),
            allow_unicode_in_code_blocks: default_allow_unicode_in_code_blocks(),
            disallow_unicode_in_code_block_types: Vec::new(),
            exclude_path_patterns: Vec::new(),
            include_path_patterns: Vec::new(),
        }
    }
}

impl RuleConfig for AsciiOnlyConfig {
    const RULE_NAME: &'static str = "ascii-only";
}

#[derive(Clone)]
pub struct AsciiOnly {
    config: AsciiOnlyConfig,
    allowed: HashSet<char>,
    emoji: HashSet<char>,
    unicode_paths: PathMatcher,
    emoji_paths: PathMatcher,
    include: PathMatcher,
    exclude: PathMatcher,
}

impl Default for AsciiOnly {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiOnly {
    pub fn new() -> Self {
        Self::from_config_struct(AsciiOnlyConfig::default())
    }

    pub fn from_config_struct(config: AsciiOnlyConfig) -> Self {
        let allowed = config.allowed_chars.iter().copied().collect();
        let emoji = config
            .allowed_emoji
            .iter()
            .flat_map(|entry| entry.chars())
            .collect();
        let unicode_paths = PathMatcher::new(&config.allowed_path_patterns_unicode);
        let emoji_paths = PathMatcher::new(&config.allowed_path_patterns_emoji);
        let include = PathMatcher::new(&config.include_path_patterns);
        let exclude = PathMatcher::new(&config.exclude_path_patterns);
        Self {
            config,
            allowed,
            emoji,
            unicode_paths,
            emoji_paths,
            include,
            exclude,
        }
    }

    fn path_allows_unicode(&self, ctx: &LintContext) -> bool {
        let Some(path) = ctx.source_file.as_deref() else {
            return false;
        };
        !self.unicode_paths.is_empty() && self.unicode_paths.matches(&path.to_string_lossy())
    }

    fn emoji_allowed(&self, ctx: &LintContext, c: char) -> bool {
        if !self.emoji.contains(&c) {
            return false;
        }
        if self.emoji_paths.is_empty() {
            return true;
        }
        ctx.source_file
            .as_deref()
            .is_some_and(|path| self.emoji_paths.matches(&path.to_string_lossy()))
    }

    fn line_is_checked(&self, info: &LineInfo) -> bool {
        if !info.in_code_block {
            return true;
        }
        let listed = info.code_block_language.as_deref().is_some_and(|language| {
            self.config
                .disallow_unicode_in_code_block_types
                .iter()
                .any(|l| l == language)
        });
        if listed {
            return true;
        }
        // A non-empty type list narrows the check to those languages only.
        !self.config.allow_unicode_in_code_blocks
            && self.config.disallow_unicode_in_code_block_types.is_empty()
    }
}

impl Rule for AsciiOnly {
    fn name(&self) -> &'static str {
        "ascii-only"
    }

    fn description(&self) -> &'static str {
        "Only ASCII characters are allowed"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Document
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        ctx.content.is_ascii()
            || self.path_allows_unicode(ctx)
            || !path_in_scope(ctx.source_file.as_deref(), &self.include, &self.exclude)
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        for (idx, info) in ctx.lines.iter().enumerate() {
            if !self.line_is_checked(info) {
                continue;
            }
            let line = info.content(ctx.content);
            if line.is_ascii() {
                continue;
            }
            for (offset, c) in line.char_indices() {
                if c.is_ascii() || self.allowed.contains(&c) || self.emoji_allowed(ctx, c) {
                    continue;
                }
                let start = info.byte_offset + offset;
                let replacement = REPLACEMENTS.get(&c);
                let message = match replacement {
                    Some(ascii) => {
                        format!("Non-ASCII character '{c}' (U+{:04X}), replace with '{ascii}'", c as u32)
                    }
                    None => format!("Non-ASCII character '{c}' (U+{:04X})", c as u32),
                };
                warnings.push(LintWarning {
                    rule_name: Some(self.name().to_string()),
                    line: idx + 1,
                    column: offset + 1,
                    end_line: idx + 1,
                    end_column: offset + 1 + c.len_utf8(),
                    message,
                    severity: Severity::Warning,
                    fix: replacement.map(|ascii| Fix {
                        range: start..start + c.len_utf8(),
                        replacement: (*ascii).to_string(),
                    }),
                });
            }
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
