use chat_core::text::clean_text;

/// Maximum snippet width in code points, ellipses excluded.
pub const SNIPPET_LEN: usize = 120;

const ELLIPSIS: char = '…';

/// Builds a short excerpt of an HTML-bearing body around a match.
///
/// `match_offset` is a byte offset into `body`. It is mapped onto the cleaned
/// text by scaling with the ratio of cleaned to raw byte length and used as a
/// code point index, which drifts on heavy markup and multi-byte text. Bodies
/// whose cleaned text fits in [`SNIPPET_LEN`] are returned whole.
pub fn extract_snippet(body: &str, match_offset: usize) -> String {
    let cleaned = clean_text(body);
    let chars: Vec<char> = cleaned.chars().collect();
    let total = chars.len();

    if total <= SNIPPET_LEN {
        return cleaned;
    }

    let center = scaled_position(match_offset, body.len(), cleaned.len(), total);
    let mut start = center.saturating_sub(SNIPPET_LEN / 2);
    let mut end = start + SNIPPET_LEN;
    if end > total {
        end = total;
        start = total - SNIPPET_LEN;
    }

    let mut snippet = String::with_capacity((SNIPPET_LEN + 2) * 4);
    if start > 0 {
        snippet.push(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < total {
        snippet.push(ELLIPSIS);
    }
    snippet
}

/// Scales a byte offset in the raw body by the cleaned/raw byte ratio and
/// clamps it to the last code point index of the cleaned text.
fn scaled_position(
    raw_offset: usize,
    raw_len: usize,
    cleaned_len: usize,
    char_count: usize,
) -> usize {
    if raw_offset == 0 || char_count == 0 {
        return 0;
    }
    let ratio = cleaned_len as f64 / raw_len.max(1) as f64;
    let scaled = (raw_offset as f64 * ratio).round() as usize;
    scaled.min(char_count - 1)
}
