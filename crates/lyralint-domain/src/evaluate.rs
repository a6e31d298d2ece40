//! The per-file fold: events in, diagnostics out.
//!
//! Suppression state is a value threaded through the ordered walk; a Comment
//! event's directive is visible only to events after it. Within a line,
//! checks run in registry order so output is reproducible.

use std::panic::{catch_unwind, AssertUnwindSafe};

use lyralint_types::Diagnostic;
use tracing::warn;

use lyralint_ass::{Event, EventKind};

use crate::clean::clean_event_text;
use crate::registry::{descriptor, CleanLine, CompiledChecks, REGISTRY};
use crate::suppression::{parse_line_directive, LineDirective, SuppressionState};

/// Walk a file's events and collect diagnostics in line order.
///
/// `global_disabled` seeds the file's suppression state; it is never consulted
/// again afterwards (an in-file `lint-enable` reset overrides it).
pub fn evaluate_events<S: AsRef<str>>(
    events: &[Event],
    checks: &CompiledChecks,
    global_disabled: &[S],
) -> Vec<Diagnostic> {
    let mut state = SuppressionState::seeded(global_disabled.iter().map(|s| s.as_ref()));
    let mut diagnostics = Vec::new();

    for event in events {
        match event.kind {
            EventKind::Comment => {
                state.apply_comment(&event.effect, &event.text);
            }
            EventKind::Dialogue => {
                check_dialogue(event, checks, &state, &mut diagnostics);
            }
        }
    }

    diagnostics
}

fn check_dialogue(
    event: &Event,
    checks: &CompiledChecks,
    state: &SuppressionState,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let directive = parse_line_directive(&event.effect);
    if directive == LineDirective::SkipAll {
        return;
    }

    let clean = clean_event_text(&event.text);
    if clean.text.trim().is_empty() {
        return;
    }
    let line = CleanLine::from_clean(&clean);

    for desc in &REGISTRY {
        let code = desc.code;
        if state.is_disabled(code.as_str()) || directive.skips(code.as_str()) {
            continue;
        }

        // A checker tripping over pathological input must not cost the rest
        // of the file its diagnostics: downgrade to no-finding for this rule
        // on this line.
        let findings = match catch_unwind(AssertUnwindSafe(|| checks.run(code, &line))) {
            Ok(findings) => findings,
            Err(_) => {
                warn!(
                    code = code.as_str(),
                    line = event.line_no,
                    "checker panicked; skipping this rule for this line"
                );
                continue;
            }
        };

        for f in findings {
            let d = descriptor(f.code);
            diagnostics.push(Diagnostic {
                line: event.line_no,
                code: f.code.as_str().to_string(),
                message: d.message.to_string(),
                level: d.severity,
                context: f.context,
                full_line: event.text.clone(),
            });
        }
    }
}
