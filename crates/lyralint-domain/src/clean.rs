//! Clean-text derivation from raw event text.
//!
//! Karaoke timing tags are elided silently; every other override block is
//! recorded for the override-tag rule. Line-break markers are normalized to a
//! single space but remembered. Whitespace is otherwise left untouched so the
//! spacing rules still see it.

/// The checkable form of one event's text. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanText {
    pub text: String,
    pub had_line_break: bool,
    /// Override blocks that are not pure karaoke timing, verbatim (braces kept).
    pub foreign_tags: Vec<String>,
}

/// Derive [`CleanText`] from a raw Dialogue text.
pub fn clean_event_text(raw: &str) -> CleanText {
    let mut text = String::with_capacity(raw.len());
    let mut foreign_tags = Vec::new();
    let mut had_line_break = false;

    let mut rest = raw;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('{') {
            match stripped.find('}') {
                Some(end) => {
                    let inner = &stripped[..end];
                    if !is_karaoke_block(inner) {
                        foreign_tags.push(format!("{{{inner}}}"));
                    }
                    rest = &stripped[end + 1..];
                    continue;
                }
                None => {
                    // Unclosed brace: not a tag block, keep it literally.
                    text.push('{');
                    rest = stripped;
                    continue;
                }
            }
        }

        if let Some(stripped) = rest.strip_prefix("\\N").or_else(|| rest.strip_prefix("\\n")) {
            had_line_break = true;
            text.push(' ');
            rest = stripped;
            continue;
        }

        let mut chars = rest.chars();
        // rest is non-empty here.
        if let Some(c) = chars.next() {
            text.push(c);
        }
        rest = chars.as_str();
    }

    CleanText {
        text,
        had_line_break,
        foreign_tags,
    }
}

/// A block is karaoke-only when every `\tag` inside is a `\k`/`\K`/`\kf`/`\ko`
/// timing tag with a numeric argument.
fn is_karaoke_block(inner: &str) -> bool {
    let mut segments = inner.split('\\');
    // Content before the first backslash must be empty for a tag block.
    match segments.next() {
        Some("") => {}
        _ => return false,
    }

    let mut any = false;
    for seg in segments {
        let arg = seg
            .strip_prefix("kf")
            .or_else(|| seg.strip_prefix("ko"))
            .or_else(|| seg.strip_prefix('k'))
            .or_else(|| seg.strip_prefix('K'));
        match arg {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                any = true;
            }
            _ => return false,
        }
    }
    any
}
