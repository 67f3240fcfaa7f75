//! Char-aware string helpers shared by the detectors

/// First `max` chars of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Up to `radius` chars on each side of the byte range `start..end`
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    if radius == 0 {
        return &text[start..end];
    }
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(radius - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[from..to]
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
