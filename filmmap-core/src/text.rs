/// Removes every innermost `open ... close` group in a single
/// left-to-right pass. A group is innermost if it contains
/// neither `open` nor `close`, so `a (b (c) d)` becomes `a (b  d)`.
pub fn strip_enclosed(text: &str, open: char, close: char) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let (head, tail) = rest.split_at(start);
        result.push_str(head);
        let inner = &tail[open.len_utf8()..];
        match inner.find(|c| c == open || c == close) {
            Some(end) if inner[end..].starts_with(close) => {
                rest = &inner[end + close.len_utf8()..];
            }
            _ => {
                result.push(open);
                rest = inner;
            }
        }
    }
    result.push_str(rest);
    result
}

/// Strips parenthesized notes and curly-brace annotations
/// (e.g. episode names) from a catalog field and trims the result.
pub fn strip_annotations(text: &str) -> String {
    let text = strip_enclosed(text, '(', ')');
    let text = strip_enclosed(&text, '{', '}');
    text.trim().to_string()
}
