// WHY: every chunk offset is measured against the normalized text, so normalization
// lives apart from sentence splitting and runs exactly once per document

/// Normalize a policy document into the coordinate space used for chunk offsets
/// CRLF becomes a single break, every whitespace run collapses to one space, ends are trimmed
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_text_into(text, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
/// WHY: the bench and the server normalize many documents back to back
pub fn normalize_text_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut chars = text.chars().peekable();
    let mut prev_was_space = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\r' if chars.peek() == Some(&'\n') => {
                // \r\n counts as one line break
                chars.next();
                push_space(buffer, &mut prev_was_space);
            }
            _ if ch.is_whitespace() => push_space(buffer, &mut prev_was_space),
            _ => {
                buffer.push(ch);
                prev_was_space = false;
            }
        }
    }

    // Interior runs are already single spaces; only the ends can still carry one
    if buffer.ends_with(' ') {
        buffer.pop();
    }
    if buffer.starts_with(' ') {
        buffer.remove(0);
    }
}

fn push_space(buffer: &mut String, prev_was_space: &mut bool) {
    if !*prev_was_space {
        buffer.push(' ');
        *prev_was_space = true;
    }
}
