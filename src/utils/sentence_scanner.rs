//! Sentence boundary detection for prose text.
//!
//! A single left-to-right pass finds sentence-ending punctuation while
//! suppressing the usual false positives: abbreviations, decimal numbers,
//! list-numbering labels, and anything inside link brackets, parentheses or
//! double quotes. The returned offsets mark where each new sentence begins;
//! the first sentence implicitly starts at offset 0 and is not reported.

use std::collections::HashSet;

use phf::phf_set;

/// Abbreviations that never end a sentence, used when no override list is
/// configured. Multi-token entries like "U.S. Government" match the word
/// together with the token that follows it.
pub static DEFAULT_ABBREVIATIONS: phf::Set<&'static str> = phf_set! {
    "e.g.", "i.e.", "etc.", "cf.", "vs.", "et al.", "al.",
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr.", "St.",
    "fig.", "figs.", "eq.", "sec.", "ch.", "p.", "pp.", "no.", "vol.",
    "approx.", "dept.", "est.", "min.", "max.", "misc.", "incl.",
    "Inc.", "Ltd.", "Co.", "Corp.",
    "U.S.", "U.K.", "U.N.",
};

/// Builds the working abbreviation set: the override list when one is given,
/// the defaults otherwise.
pub fn abbreviation_set(overrides: Option<&[String]>) -> HashSet<String> {
    match overrides {
        Some(list) => list.iter().cloned().collect(),
        None => DEFAULT_ABBREVIATIONS
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    }
}

/// Finds the byte offsets at which new sentences begin in `content`.
///
/// Offsets are ascending and point at the first character after the
/// punctuation and its trailing quote/space run. Splitting at these offsets,
/// trimming trailing spaces, and rejoining with single spaces reproduces the
/// original content.
pub fn find_sentence_boundaries(content: &str, abbreviations: &HashSet<String>) -> Vec<usize> {
    let chars: Vec<(usize, char)> = content.char_indices().collect();
    let mut boundaries = Vec::new();
    let mut bracket_depth: usize = 0;
    let mut paren_depth: usize = 0;
    let mut in_double_quote = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i].1;
        // Bracket and paren tracking are mutually exclusive so that a paren
        // inside link brackets does not start its own nesting and vice versa.
        match c {
            '[' if paren_depth == 0 => {
                bracket_depth += 1;
                i += 1;
                continue;
            }
            ']' if paren_depth == 0 => {
                bracket_depth = bracket_depth.saturating_sub(1);
                i += 1;
                continue;
            }
            '(' if bracket_depth == 0 => {
                paren_depth += 1;
                i += 1;
                continue;
            }
            ')' if bracket_depth == 0 => {
                paren_depth = paren_depth.saturating_sub(1);
                i += 1;
                continue;
            }
            '"' => {
                let escaped = i > 0 && chars[i - 1].1 == '\\';
                if !escaped {
                    in_double_quote = !in_double_quote;
                }
                i += 1;
                continue;
            }
            _ => {}
        }
        if bracket_depth > 0 || paren_depth > 0 {
            i += 1;
            continue;
        }
        if c != '.' && c != '?' && c != '!' {
            i += 1;
            continue;
        }

        // A quoted numbering label like `"1. Overview"` reads as punctuation
        // plus a capitalized word but is no sentence end.
        if in_double_quote && is_quoted_numbering_label(&chars, i) {
            i += 1;
            continue;
        }

        // Look past trailing quotes, then spaces. Without a space, or with
        // something other than a word character after it, this punctuation
        // does not end a sentence (filenames, version strings, `?!` runs).
        let mut j = i + 1;
        let mut quote_toggles = 0usize;
        while j < chars.len() && matches!(chars[j].1, '\'' | '"') {
            if chars[j].1 == '"' {
                quote_toggles += 1;
            }
            j += 1;
        }
        let space_start = j;
        while j < chars.len() && chars[j].1 == ' ' {
            j += 1;
        }
        if j == space_start || j >= chars.len() || !chars[j].1.is_alphanumeric() {
            i += 1;
            continue;
        }

        let word = preceding_word(&chars, i);
        let next = next_token(&chars, j);
        if is_abbreviation(&word, c, &next, abbreviations) {
            i += 1;
            continue;
        }

        // "1. 2." style numbering: a digit before the period and a digit
        // starting the next token. A digit-period before a capitalized word
        // is a genuine boundary ("released in version 2. The next ...").
        if c == '.'
            && i > 0
            && chars[i - 1].1.is_ascii_digit()
            && next.chars().next().is_some_and(|ch| ch.is_ascii_digit())
        {
            i += 1;
            continue;
        }

        boundaries.push(chars[j].0);
        // The consumed run may have crossed closing quotes; fold their
        // toggles in before resuming after the run.
        if quote_toggles % 2 == 1 {
            in_double_quote = !in_double_quote;
        }
        i = j;
    }
    boundaries
}

/// The contiguous run of letters and periods directly before position `i`.
fn preceding_word(chars: &[(usize, char)], i: usize) -> String {
    let mut start = i;
    while start > 0 {
        let ch = chars[start - 1].1;
        if ch.is_alphabetic() || ch == '.' {
            start -= 1;
        } else {
            break;
        }
    }
    chars[start..i].iter().map(|&(_, ch)| ch).collect()
}

/// The run of non-space characters starting at position `j`.
fn next_token(chars: &[(usize, char)], j: usize) -> String {
    chars[j..]
        .iter()
        .map(|&(_, ch)| ch)
        .take_while(|ch| *ch != ' ')
        .collect()
}

/// Checks the four abbreviation forms: the word with its punctuation, that
/// form lowercased, and both again with the following token appended.
fn is_abbreviation(
    word: &str,
    punctuation: char,
    next_token: &str,
    abbreviations: &HashSet<String>,
) -> bool {
    if word.is_empty() {
        return false;
    }
    let with_punct = format!("{word}{punctuation}");
    if abbreviations.contains(&with_punct) || abbreviations.contains(&with_punct.to_lowercase()) {
        return true;
    }
    if next_token.is_empty() {
        return false;
    }
    let combined = format!("{with_punct} {next_token}");
    abbreviations.contains(&combined) || abbreviations.contains(&combined.to_lowercase())
}

/// Inside a double-quoted span, a numeric-dot token followed by spaces and a
/// capitalized word is a numbering label, not a sentence end.
fn is_quoted_numbering_label(chars: &[(usize, char)], i: usize) -> bool {
    let mut k = i;
    let mut has_digit = false;
    while k > 0 {
        let ch = chars[k - 1].1;
        if ch.is_ascii_digit() {
            has_digit = true;
            k -= 1;
        } else if ch == '.' {
            k -= 1;
        } else {
            break;
        }
    }
    if !has_digit {
        return false;
    }
    let mut j = i + 1;
    let mut saw_space = false;
    while j < chars.len() && chars[j].1 == ' ' {
        saw_space = true;
        j += 1;
    }
    saw_space && j < chars.len() && chars[j].1.is_uppercase()
}
