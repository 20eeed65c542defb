//! Pre-parsed document context shared by all rules.
//!
//! `LintContext::new` makes exactly one pass over the document: line
//! offsets, fenced-code membership, ATX heading extraction, list markers,
//! and inline suppression comments are computed once and reused by every
//! rule. Rules never re-tokenize the document themselves.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::inline_config::InlineConfig;

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( {0,3})(#{1,6})(?:\s+(.*?))??(\s+#+)?\s*$").unwrap());
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)([-*+]|\d{1,9}[.)])(\s+)").unwrap());
static HTML_COMMENT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<!--.*-->\s*$").unwrap());
static HTML_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<[!/A-Za-z].*$").unwrap());

/// One ATX heading, as it appears on its line.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingInfo {
    /// Nesting depth, 1-6.
    pub level: usize,
    /// 0-based column of the first `#`.
    pub marker_column: usize,
    /// 0-based column where the heading text starts.
    pub content_column: usize,
    /// Heading text, numbering prefix included, closing hashes excluded.
    pub raw_text: String,
    pub has_closing_sequence: bool,
}

/// A list item marker at the start of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemInfo {
    pub is_ordered: bool,
    /// 0-based column of the marker.
    pub marker_column: usize,
    /// 0-based column where the item's content starts.
    pub content_column: usize,
}

/// Pre-computed facts about one line.
#[derive(Debug, Clone)]
pub struct LineInfo {
    /// Byte offset of the line start in the document.
    pub byte_offset: usize,
    /// Byte length of the line, newline excluded.
    pub byte_len: usize,
    pub is_blank: bool,
    /// Inside a fenced code block (fence markers themselves excluded).
    pub in_code_block: bool,
    /// Language of the enclosing fenced block, when inside one.
    pub code_block_language: Option<String>,
    /// This line opens or closes a fenced code block.
    pub is_fence_marker: bool,
    /// Full-line HTML comment.
    pub is_html_comment: bool,
    /// Starts an HTML tag (and is not a comment).
    pub is_html_line: bool,
    pub heading: Option<HeadingInfo>,
    pub list_item: Option<ListItemInfo>,
}

impl LineInfo {
    /// The line's text, borrowed from the original document.
    pub fn content<'a>(&self, content: &'a str) -> &'a str {
        &content[self.byte_offset..self.byte_offset + self.byte_len]
    }
}

pub struct LintContext<'a> {
    pub content: &'a str,
    pub source_file: Option<PathBuf>,
    pub lines: Vec<LineInfo>,
    inline_config: InlineConfig,
}

struct OpenFence {
    marker: char,
    length: usize,
    language: Option<String>,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str, source_file: Option<PathBuf>) -> Self {
        // Split manually so CRLF widths stay visible; `str::lines` hides the
        // carriage return and the byte offsets would drift on such input.
        let mut raw_lines: Vec<&str> = content.split('\n').collect();
        if content.ends_with('\n') {
            raw_lines.pop();
        }
        let text_lines: Vec<&str> = raw_lines
            .iter()
            .map(|raw| raw.strip_suffix('\r').unwrap_or(raw))
            .collect();
        let inline_config = InlineConfig::from_lines(&text_lines);

        let mut lines = Vec::with_capacity(raw_lines.len());
        let mut offset = 0usize;
        let mut fence: Option<OpenFence> = None;

        for (raw, text) in raw_lines.iter().zip(&text_lines) {
            let mut info = LineInfo {
                byte_offset: offset,
                byte_len: text.len(),
                is_blank: text.trim().is_empty(),
                in_code_block: fence.is_some(),
                code_block_language: fence.as_ref().and_then(|f| f.language.clone()),
                is_fence_marker: false,
                is_html_comment: false,
                is_html_line: false,
                heading: None,
                list_item: None,
            };

            if let Some(open) = &fence {
                if is_closing_fence(text, open) {
                    fence = None;
                    info.in_code_block = false;
                    info.code_block_language = None;
                    info.is_fence_marker = true;
                }
            } else if let Some(opened) = parse_opening_fence(text) {
                info.code_block_language = opened.language.clone();
                fence = Some(opened);
                info.is_fence_marker = true;
            } else {
                info.heading = parse_atx_heading(text);
                if info.heading.is_none() {
                    info.list_item = parse_list_marker(text);
                }
                info.is_html_comment = HTML_COMMENT_LINE.is_match(text);
                info.is_html_line = !info.is_html_comment && HTML_LINE.is_match(text);
            }

            lines.push(info);
            offset += raw.len() + 1;
        }

        Self {
            content,
            source_file,
            lines,
            inline_config,
        }
    }

    /// Line info by 1-based line number.
    pub fn line_info(&self, line: usize) -> Option<&LineInfo> {
        if line == 0 {
            return None;
        }
        self.lines.get(line - 1)
    }

    pub fn inline_config(&self) -> &InlineConfig {
        &self.inline_config
    }

    /// All headings as (1-based line number, info), in document order.
    pub fn headings(&self) -> impl Iterator<Item = (usize, &HeadingInfo)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, info)| info.heading.as_ref().map(|h| (idx + 1, h)))
    }

    pub fn has_headings(&self) -> bool {
        self.lines.iter().any(|info| info.heading.is_some())
    }

    pub fn has_code_blocks(&self) -> bool {
        self.lines.iter().any(|info| info.is_fence_marker)
    }

    /// Byte range of a 1-based line, newline excluded.
    pub fn line_byte_range(&self, line: usize) -> Option<std::ops::Range<usize>> {
        self.line_info(line)
            .map(|info| info.byte_offset..info.byte_offset + info.byte_len)
    }
}

fn parse_opening_fence(line: &str) -> Option<OpenFence> {
    let trimmed = line.trim_start();
    if line.len() - trimmed.len() >= 4 {
        return None; // indented that far it is code, not a fence
    }
    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }
    let length = trimmed.chars().take_while(|&c| c == marker).count();
    if length < 3 {
        return None;
    }
    let rest = trimmed[length..].trim();
    // Backtick info strings cannot contain backticks.
    if marker == '`' && rest.contains('`') {
        return None;
    }
    let language = rest.split_whitespace().next().map(|s| s.to_string());
    Some(OpenFence {
        marker,
        length,
        language,
    })
}

fn is_closing_fence(line: &str, open: &OpenFence) -> bool {
    let trimmed = line.trim_start();
    let length = trimmed.chars().take_while(|&c| c == open.marker).count();
    length >= open.length && trimmed[length..].trim().is_empty()
}

fn parse_atx_heading(line: &str) -> Option<HeadingInfo> {
    let caps = ATX_HEADING.captures(line)?;
    let indent = caps.get(1).map_or(0, |m| m.len());
    let hashes = caps.get(2).map_or("", |m| m.as_str());
    let text = caps.get(3).map_or("", |m| m.as_str());
    let content_column = caps.get(3).map_or(indent + hashes.len(), |m| m.start());
    Some(HeadingInfo {
        level: hashes.len(),
        marker_column: indent,
        content_column,
        raw_text: text.to_string(),
        has_closing_sequence: caps.get(4).is_some(),
    })
}

fn parse_list_marker(line: &str) -> Option<ListItemInfo> {
    let caps = LIST_MARKER.captures(line)?;
    let indent = caps.get(1).map_or(0, |m| m.len());
    let marker = caps.get(2).map_or("", |m| m.as_str());
    let spaces = caps.get(3).map_or(0, |m| m.len());
    Some(ListItemInfo {
        is_ordered: marker.chars().next().is_some_and(|c| c.is_ascii_digit()),
        marker_column: indent,
        content_column: indent + marker.len() + spaces,
    })
}
