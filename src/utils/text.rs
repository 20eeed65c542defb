//! Small text helpers shared by several rules.

use std::sync::LazyLock;

use regex::Regex;

/// Replaces the contents of inline code spans with `x` filler of the same
/// byte length, so later scanning never treats punctuation inside backticks
/// as prose while all byte offsets stay valid for the original line.
pub fn mask_inline_code(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut masked = line.to_string();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let mut run = 1;
        while i + run < bytes.len() && bytes[i + run] == b'`' {
            run += 1;
        }
        // Find a closing run of the same length.
        let open_end = i + run;
        let mut j = open_end;
        let mut close = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let mut len = 1;
                while j + len < bytes.len() && bytes[j + len] == b'`' {
                    len += 1;
                }
                if len == run {
                    close = Some(j);
                    break;
                }
                j += len;
            } else {
                j += 1;
            }
        }
        match close {
            Some(close_start) => {
                // Mask byte-for-byte; multi-byte characters become several
                // `x` bytes, keeping offsets aligned.
                masked.replace_range(open_end..close_start, &"x".repeat(close_start - open_end));
                i = close_start + run;
            }
            None => {
                i = open_end;
            }
        }
    }
    masked
}

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap());
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*|\b_([^_]+)_\b").unwrap());

/// Strips `**strong**` and `*emphasis*` delimiters, keeping the inner text.
pub fn strip_emphasis(text: &str) -> String {
    let pass = STRONG.replace_all(text, "$1$2");
    EMPHASIS.replace_all(&pass, "$1$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_code_span_contents() {
        assert_eq!(mask_inline_code("Use `a.b` here"), "Use `xxx` here");
        assert_eq!(mask_inline_code("plain text"), "plain text");
    }

    #[test]
    fn masking_preserves_byte_length() {
        let line = "before `naïve.rs` after";
        let masked = mask_inline_code(line);
        assert_eq!(masked.len(), line.len());
        assert!(masked.starts_with("before `"));
        assert!(masked.ends_with("` after"));
    }

    #[test]
    fn double_backtick_spans_allow_single_backticks_inside() {
        assert_eq!(mask_inline_code("a ``x ` y`` b"), "a ``xxxxx`` b");
    }

    #[test]
    fn unterminated_backtick_is_left_alone() {
        assert_eq!(mask_inline_code("open ` span"), "open ` span");
    }

    #[test]
    fn strips_emphasis_markers() {
        assert_eq!(strip_emphasis("**Summary:** text"), "Summary: text");
        assert_eq!(strip_emphasis("*light* and __heavy__"), "light and heavy");
        assert_eq!(strip_emphasis("no markers"), "no markers");
    }
}
