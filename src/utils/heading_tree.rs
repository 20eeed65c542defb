//! Reconstruction of the heading hierarchy from the flat heading list.
//!
//! Markdown has no explicit tree syntax for headings, so the outline is
//! rebuilt with a level stack: walking the headings in document order, every
//! entry with a level greater than or equal to the current heading is popped,
//! and whatever remains on top is the parent. Skipped levels (an `####` under
//! an `##`) still resolve to the nearest shallower heading.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

/// One ATX heading as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineHeading {
    /// 1-indexed source line.
    pub line: usize,
    /// ATX level, 1 through 6.
    pub level: usize,
    /// Heading text with the marker and surrounding whitespace removed.
    pub text: String,
}

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)(\.?)(?:\s+|$)").unwrap());

/// A numeric prefix such as `1.`, `2.3` or `4.1.2.` at the start of a
/// heading's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPrefix {
    /// The numeric path, e.g. `[4, 1, 2]` for `4.1.2.`.
    pub segments: Vec<u64>,
    /// Whether the prefix ends with a period before the title.
    pub trailing_period: bool,
    /// Byte length of the prefix itself, trailing period included.
    pub prefix_len: usize,
    /// Byte offset of the title text after the prefix and its whitespace.
    pub title_offset: usize,
}

impl NumberPrefix {
    /// Renders the prefix back to its textual form.
    pub fn render(&self) -> String {
        let mut out = self.segments.iter().join(".");
        if self.trailing_period {
            out.push('.');
        }
        out
    }
}

/// Parses a numeric prefix off the front of heading text.
///
/// The prefix must be followed by whitespace or the end of the text, so
/// `1.5x` or `2.0-beta` are never treated as numbering.
pub fn parse_number_prefix(text: &str) -> Option<NumberPrefix> {
    let captures = NUMBER_PREFIX.captures(text)?;
    let digits = captures.get(1)?.as_str();
    let mut segments = Vec::new();
    for part in digits.split('.') {
        segments.push(part.parse::<u64>().ok()?);
    }
    let trailing_period = !captures[2].is_empty();
    let prefix_len = digits.len() + captures[2].len();
    let title_offset = captures.get(0)?.end();
    Some(NumberPrefix {
        segments,
        trailing_period,
        prefix_len,
        title_offset,
    })
}

/// The reconstructed heading tree.
///
/// Parent links are computed once at construction; everything else is a
/// lookup over the stored indices.
#[derive(Debug, Clone)]
pub struct HeadingOutline {
    headings: Vec<OutlineHeading>,
    parents: Vec<Option<usize>>,
    prefixes: Vec<Option<NumberPrefix>>,
}

impl HeadingOutline {
    pub fn new(mut headings: Vec<OutlineHeading>) -> Self {
        // Callers may collect headings in any order; the stack walk
        // needs document order.
        headings.sort_by_key(|h| h.line);
        let mut parents = Vec::with_capacity(headings.len());
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for (index, heading) in headings.iter().enumerate() {
            while stack
                .last()
                .is_some_and(|&(level, _)| level >= heading.level)
            {
                stack.pop();
            }
            parents.push(stack.last().map(|&(_, parent)| parent));
            stack.push((heading.level, index));
        }
        let prefixes = headings
            .iter()
            .map(|h| parse_number_prefix(&h.text))
            .collect();
        Self {
            headings,
            parents,
            prefixes,
        }
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn heading(&self, index: usize) -> &OutlineHeading {
        &self.headings[index]
    }

    pub fn headings(&self) -> &[OutlineHeading] {
        &self.headings
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents[index]
    }

    /// The parsed numeric prefix of a heading, if it has one.
    pub fn prefix(&self, index: usize) -> Option<&NumberPrefix> {
        self.prefixes[index].as_ref()
    }

    /// Indices of all headings sharing this heading's parent and level, in
    /// document order. The heading itself is included.
    pub fn siblings(&self, index: usize) -> Vec<usize> {
        let parent = self.parents[index];
        let level = self.headings[index].level;
        (0..self.headings.len())
            .filter(|&i| self.parents[i] == parent && self.headings[i].level == level)
            .collect()
    }

    /// The level at which this heading's numbering sequence is rooted.
    ///
    /// Walks up the parent chain past every numbered ancestor; the nearest
    /// unnumbered ancestor's level is the root. A chain of numbered headings
    /// all the way up roots at level 1.
    pub fn numbering_root_level(&self, index: usize) -> usize {
        let mut current = index;
        loop {
            match self.parents[current] {
                Some(parent) => {
                    if self.prefixes[parent].is_none() {
                        return self.headings[parent].level;
                    }
                    current = parent;
                }
                None => return 1,
            }
        }
    }
}
