//! Plain-text helpers for HTML-bearing message bodies.
//!
//! These are deliberately naive: bracketed runs are dropped without any
//! understanding of entities, quoted attributes or malformed markup.

/// Removes every `<...>` run, brackets included. An unclosed `<` drops the
/// rest of the input.
pub fn strip_html_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

/// Collapses runs of spaces, tabs, newlines and carriage returns into a
/// single space and trims both ends.
pub fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_space = false;

    for c in input.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }

    out.trim().to_string()
}

/// Tag-stripped, whitespace-collapsed text.
pub fn clean_text(input: &str) -> String {
    collapse_whitespace(&strip_html_tags(input))
}
