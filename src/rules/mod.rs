pub mod allow_custom_anchors;
pub mod ascii_only;
pub mod document_length;
pub mod fenced_code_under_heading;
pub mod heading_min_words;
pub mod heading_numbering;
pub mod heading_title_case;
pub mod no_duplicate_headings_normalized;
pub mod no_empty_heading;
pub mod no_h1_content;
pub mod no_heading_like_lines;
pub mod no_tables;
pub mod one_sentence_per_line;

pub use allow_custom_anchors::AllowCustomAnchors;
pub use ascii_only::AsciiOnly;
pub use document_length::DocumentLength;
pub use fenced_code_under_heading::FencedCodeUnderHeading;
pub use heading_min_words::HeadingMinWords;
pub use heading_numbering::HeadingNumbering;
pub use heading_title_case::HeadingTitleCase;
pub use no_duplicate_headings_normalized::NoDuplicateHeadingsNormalized;
pub use no_empty_heading::NoEmptyHeading;
pub use no_h1_content::NoH1Content;
pub use no_heading_like_lines::NoHeadingLikeLines;
pub use no_tables::NoTables;
pub use one_sentence_per_line::OneSentencePerLine;

use crate::config::Config;
use crate::rule::Rule;

type RuleCtor = fn(&Config) -> Box<dyn Rule>;

/// Every rule in registration order, keyed by its stable name.
pub static RULES: &[(&str, RuleCtor)] = &[
    ("heading-numbering", HeadingNumbering::from_config),
    ("one-sentence-per-line", OneSentencePerLine::from_config),
    ("heading-title-case", HeadingTitleCase::from_config),
    ("ascii-only", AsciiOnly::from_config),
    ("no-tables", NoTables::from_config),
    ("no-heading-like-lines", NoHeadingLikeLines::from_config),
    ("heading-min-words", HeadingMinWords::from_config),
    ("no-empty-heading", NoEmptyHeading::from_config),
    ("document-length", DocumentLength::from_config),
    ("no-h1-content", NoH1Content::from_config),
    ("allow-custom-anchors", AllowCustomAnchors::from_config),
    ("no-duplicate-headings-normalized", NoDuplicateHeadingsNormalized::from_config),
    ("fenced-code-under-heading", FencedCodeUnderHeading::from_config),
];

/// Instantiate every rule from the given configuration.
pub fn all_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    RULES.iter().map(|(_, ctor)| ctor(config)).collect()
}

/// Instantiate one rule by name.
pub fn rule_by_name(name: &str, config: &Config) -> Option<Box<dyn Rule>> {
    RULES
        .iter()
        .find(|(rule_name, _)| *rule_name == name)
        .map(|(_, ctor)| ctor(config))
}
