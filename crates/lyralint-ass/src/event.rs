#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Dialogue,
    Comment,
}

/// One entry of the `[Events]` section. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub layer: u32,
    /// Start timestamp, verbatim. Validated only for structural presence.
    pub start: String,
    /// End timestamp, verbatim.
    pub end: String,
    pub style: String,
    pub name: String,
    pub margin_l: String,
    pub margin_r: String,
    pub margin_v: String,
    /// Free text; doubles as the suppression-directive channel.
    pub effect: String,
    /// Raw text, tags and line-break markers intact.
    pub text: String,
    /// 1-based position within the event list (comments included).
    pub line_no: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptParseError {
    #[error("no [Events] section found")]
    MissingEventsSection,

    #[error("[Events] section has no Format declaration")]
    MissingFormatLine,

    #[error("malformed Format declaration: {0}")]
    MalformedFormatLine(String),

    #[error("malformed event at line {line_no}: {detail}")]
    MalformedEventLine { line_no: u32, detail: String },
}

/// The ten standard v4+ event fields, in canonical order.
const KNOWN_FIELDS: [&str; 10] = [
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

/// Parse the `[Events]` section of an ASS script into ordered events.
///
/// Field mapping is positional, driven by the section's `Format:` line.
/// On any structural failure the whole file is rejected; the caller turns
/// the error into a single parse diagnostic and runs no checks.
pub fn parse_script(content: &str) -> Result<Vec<Event>, ScriptParseError> {
    // Files written by most ASS tooling carry a UTF-8 BOM.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.lines();
    let mut in_events = false;
    for line in lines.by_ref() {
        if line.trim().eq_ignore_ascii_case("[events]") {
            in_events = true;
            break;
        }
    }
    if !in_events {
        return Err(ScriptParseError::MissingEventsSection);
    }

    let mut order: Option<Vec<usize>> = None;
    let mut events: Vec<Event> = Vec::new();
    let mut event_no: u32 = 0;

    for raw in lines {
        let line = raw.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        if trimmed.starts_with('[') {
            // Next section; events are done.
            break;
        }

        if let Some(rest) = strip_key_ci(line, "Format") {
            order = Some(parse_format_line(rest)?);
            continue;
        }

        let field_order = order.as_ref().ok_or(ScriptParseError::MissingFormatLine)?;

        let kind = if strip_key_ci(line, "Dialogue").is_some() {
            EventKind::Dialogue
        } else if strip_key_ci(line, "Comment").is_some() {
            EventKind::Comment
        } else {
            return Err(ScriptParseError::MalformedEventLine {
                line_no: event_no + 1,
                detail: format!("unrecognized entry '{}'", truncate(trimmed, 40)),
            });
        };

        event_no += 1;
        let rest = line.splitn(2, ':').nth(1).unwrap_or("");
        events.push(parse_event_line(kind, rest, field_order, event_no)?);
    }

    if order.is_none() {
        return Err(ScriptParseError::MissingFormatLine);
    }

    Ok(events)
}

/// Match `Key:` at the start of a line, case-insensitively, returning the value.
fn strip_key_ci<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let (head, rest) = trimmed.split_at(trimmed.find(':')?);
    if head.trim().eq_ignore_ascii_case(key) {
        Some(&rest[1..])
    } else {
        None
    }
}

/// Parse a `Format:` value into indices into [`KNOWN_FIELDS`].
fn parse_format_line(value: &str) -> Result<Vec<usize>, ScriptParseError> {
    let mut order = Vec::new();
    for name in value.split(',') {
        let name = name.trim();
        let idx = KNOWN_FIELDS
            .iter()
            .position(|f| f.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ScriptParseError::MalformedFormatLine(format!("unknown field '{name}'"))
            })?;
        order.push(idx);
    }

    let text_idx = KNOWN_FIELDS.len() - 1;
    match order.iter().position(|&i| i == text_idx) {
        Some(pos) if pos == order.len() - 1 => Ok(order),
        Some(_) => Err(ScriptParseError::MalformedFormatLine(
            "Text must be the last field".to_string(),
        )),
        None => Err(ScriptParseError::MalformedFormatLine(
            "missing Text field".to_string(),
        )),
    }
}

fn parse_event_line(
    kind: EventKind,
    value: &str,
    field_order: &[usize],
    line_no: u32,
) -> Result<Event, ScriptParseError> {
    // Text is last and may contain commas, so split at most N parts.
    let parts: Vec<&str> = value.splitn(field_order.len(), ',').collect();
    if parts.len() != field_order.len() {
        return Err(ScriptParseError::MalformedEventLine {
            line_no,
            detail: format!(
                "expected {} fields, found {}",
                field_order.len(),
                parts.len()
            ),
        });
    }

    let mut fields: [&str; 10] = [""; 10];
    for (part, &idx) in parts.iter().zip(field_order) {
        fields[idx] = part;
    }

    let layer: u32 =
        fields[0]
            .trim()
            .parse()
            .map_err(|_| ScriptParseError::MalformedEventLine {
                line_no,
                detail: format!("invalid layer '{}'", fields[0].trim()),
            })?;

    Ok(Event {
        kind,
        layer,
        start: fields[1].trim().to_string(),
        end: fields[2].trim().to_string(),
        style: fields[3].trim().to_string(),
        name: fields[4].trim().to_string(),
        margin_l: fields[5].trim().to_string(),
        margin_r: fields[6].trim().to_string(),
        margin_v: fields[7].trim().to_string(),
        effect: fields[8].trim().to_string(),
        // Verbatim: leading/trailing whitespace in the text is lint-relevant.
        text: fields[9].to_string(),
        line_no,
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i >= max_chars {
            out.push('…');
            break;
        }
        out.push(ch);
    }
    out
}
