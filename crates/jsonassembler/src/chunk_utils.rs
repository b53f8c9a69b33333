/// Split `payload` into approximately equal-sized chunks without
/// breaking UTF-8 code points.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Split `payload` into chunks whose lengths, in characters, follow `sizes`.
///
/// Each size is taken modulo the characters that are left (plus one), so any
/// sequence of numbers yields a valid partition; whatever remains after the
/// sizes run out becomes the last chunk. Mirrors how a model's tokens carve
/// up a document at arbitrary points.
#[must_use]
pub fn produce_char_chunks<'a>(payload: &'a str, sizes: &[usize]) -> Vec<&'a str> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &size in sizes {
        let remaining = rest.chars().count();
        if remaining == 0 {
            break;
        }
        let take = 1 + size % remaining;
        let end = rest.char_indices().nth(take).map_or(rest.len(), |(i, _)| i);
        chunks.push(&rest[..end]);
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
