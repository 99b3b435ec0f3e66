//! Input rules enforced at the boundary; the stores trust their callers.

/// Trims the body and accepts it only if non-empty and within
/// `max_len` characters. Length is counted in characters, not bytes.
pub fn normalize_body(raw: &str, max_len: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_len {
        return None;
    }
    Some(trimmed.to_string())
}

/// Database ids are positive; anything else is malformed client input.
pub fn plausible_user_id(id: i64) -> bool {
    id > 0
}
