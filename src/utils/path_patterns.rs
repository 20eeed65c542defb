//! Glob-style path matching for include/exclude pattern lists.
//!
//! The dialect is deliberately small: `*` matches within a single path
//! segment, `**` matches any number of segments, and everything else is
//! literal. A pattern with no leading `/`, `*` or `./` also matches as a
//! suffix anywhere in the path, as if prefixed with `**/`.

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// A path segment, possibly containing `*` wildcards.
    Literal(String),
    /// `**`: zero or more whole segments.
    AnyDepth,
}

/// A compiled list of glob patterns. Matching any one pattern matches the
/// set.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    patterns: Vec<Vec<Segment>>,
}

impl PathMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| compile_pattern(p.as_ref()))
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, path: &str) -> bool {
        let normalized = normalize(path);
        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        self.patterns
            .iter()
            .any(|pattern| match_segments(pattern, &segments))
    }
}

/// Whether a file is in scope for a rule given its include and exclude
/// pattern lists. A missing path is always in scope, matching an exclude
/// takes the file out, and a non-empty include list admits only matches.
pub fn path_in_scope(path: Option<&Path>, include: &PathMatcher, exclude: &PathMatcher) -> bool {
    let Some(path) = path else {
        return true;
    };
    let text = path.to_string_lossy();
    if !exclude.is_empty() && exclude.matches(&text) {
        return false;
    }
    if !include.is_empty() && !include.matches(&text) {
        return false;
    }
    true
}

fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").unwrap_or(&path).to_string()
}

fn compile_pattern(pattern: &str) -> Vec<Segment> {
    let anchored =
        pattern.starts_with('/') || pattern.starts_with('*') || pattern.starts_with("./");
    let body = normalize(pattern);
    let body = body.strip_prefix('/').unwrap_or(&body);
    let mut segments = Vec::new();
    if !anchored {
        segments.push(Segment::AnyDepth);
    }
    for part in body.split('/').filter(|s| !s.is_empty()) {
        if part == "**" {
            // Collapse adjacent any-depth segments.
            if segments.last() != Some(&Segment::AnyDepth) {
                segments.push(Segment::AnyDepth);
            }
        } else {
            segments.push(Segment::Literal(part.to_string()));
        }
    }
    segments
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.first() {
        None => path.is_empty(),
        Some(Segment::AnyDepth) => {
            (0..=path.len()).any(|skip| match_segments(&pattern[1..], &path[skip..]))
        }
        Some(Segment::Literal(literal)) => {
            !path.is_empty()
                && segment_matches(literal, path[0])
                && match_segments(&pattern[1..], &path[1..])
        }
    }
}

/// Wildcard match within one segment: `*` covers any run of characters, all
/// other characters are literal.
fn segment_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    fn inner(pattern: &[char], text: &[char]) -> bool {
        match pattern.first() {
            None => text.is_empty(),
            Some('*') => (0..=text.len()).any(|skip| inner(&pattern[1..], &text[skip..])),
            Some(&c) => !text.is_empty() && text[0] == c && inner(&pattern[1..], &text[1..]),
        }
    }
    inner(&pattern, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> PathMatcher {
        PathMatcher::new(patterns)
    }

    #[test]
    fn bare_name_matches_anywhere() {
        let m = matcher(&["CHANGELOG.md"]);
        assert!(m.matches("CHANGELOG.md"));
        assert!(m.matches("docs/history/CHANGELOG.md"));
        assert!(!m.matches("docs/CHANGELOG.md.bak"));
    }

    #[test]
    fn relative_path_matches_as_suffix() {
        let m = matcher(&["tmp/scratch.md"]);
        assert!(m.matches("tmp/scratch.md"));
        assert!(m.matches("work/tmp/scratch.md"));
        assert!(!m.matches("tmp/other.md"));
    }

    #[test]
    fn leading_slash_anchors_at_root() {
        let m = matcher(&["/docs/guide.md"]);
        assert!(m.matches("docs/guide.md"));
        assert!(!m.matches("src/docs/guide.md"));
    }

    #[test]
    fn star_stays_within_one_segment() {
        let m = matcher(&["*.md"]);
        assert!(m.matches("README.md"));
        assert!(!m.matches("docs/README.md"));
    }

    #[test]
    fn double_star_spans_directories() {
        let m = matcher(&["**/generated/*.md"]);
        assert!(m.matches("generated/api.md"));
        assert!(m.matches("build/out/generated/api.md"));
        assert!(!m.matches("generated/sub/api.md"));
    }

    #[test]
    fn double_star_alone_matches_everything() {
        let m = matcher(&["**"]);
        assert!(m.matches("a.md"));
        assert!(m.matches("deep/ly/nested/file.md"));
    }

    #[test]
    fn dot_slash_prefix_anchors() {
        let m = matcher(&["./notes.md"]);
        assert!(m.matches("notes.md"));
        assert!(!m.matches("sub/notes.md"));
    }

    #[test]
    fn empty_matcher_matches_nothing() {
        let m = matcher(&[]);
        assert!(m.is_empty());
        assert!(!m.matches("anything.md"));
    }

    #[test]
    fn scope_combines_include_and_exclude() {
        let include = matcher(&["docs/**"]);
        let exclude = matcher(&["**/draft-*.md"]);
        fn path(s: &str) -> Option<&Path> {
            Some(Path::new(s))
        }
        assert!(path_in_scope(path("docs/guide.md"), &include, &exclude));
        assert!(!path_in_scope(path("docs/draft-guide.md"), &include, &exclude));
        assert!(!path_in_scope(path("src/lib.md"), &include, &exclude));
        assert!(path_in_scope(None, &include, &exclude));
    }
}
