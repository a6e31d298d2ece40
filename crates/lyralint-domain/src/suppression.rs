//! Suppression directives.
//!
//! The effect field is the directive channel. Comment events flip the
//! per-file state (`lint-disable` / `lint-enable`, code list in the comment's
//! text field); Dialogue events may carry line-scoped `skip-<CODE>` tokens or
//! the `noqa` marker, which never touch the per-file state.
//!
//! Codes are matched case-insensitively and accepted without registry
//! validation, so a directive written for a future rule keeps working.

use std::collections::BTreeSet;

/// Per-file suppression state, threaded through the ordered event fold.
///
/// `enabled` holds codes explicitly re-enabled while `all_disabled` is in
/// force; `lint-enable` with an empty code list is a hard reset to
/// fully-enabled, not a restore of earlier state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionState {
    all_disabled: bool,
    disabled: BTreeSet<String>,
    enabled: BTreeSet<String>,
}

impl SuppressionState {
    /// Seed from the global (CLI-supplied) disabled set.
    pub fn seeded<I, S>(global_disabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            all_disabled: false,
            disabled: global_disabled
                .into_iter()
                .map(|c| normalize(c.as_ref()))
                .collect(),
            enabled: BTreeSet::new(),
        }
    }

    /// Apply a Comment event's directive, if it carries one.
    ///
    /// `effect` holds the directive word, `text` the optional space-separated
    /// code list. Unrecognized effects are ignored.
    pub fn apply_comment(&mut self, effect: &str, text: &str) {
        let directive = effect.trim();
        let codes: Vec<String> = text.split_whitespace().map(normalize).collect();

        if directive.eq_ignore_ascii_case("lint-disable") {
            if codes.is_empty() {
                self.all_disabled = true;
                self.enabled.clear();
            } else {
                for code in codes {
                    self.enabled.remove(&code);
                    self.disabled.insert(code);
                }
            }
        } else if directive.eq_ignore_ascii_case("lint-enable") {
            if codes.is_empty() {
                // Hard reset: every rule back on, including globally seeded ones.
                self.all_disabled = false;
                self.disabled.clear();
                self.enabled.clear();
            } else {
                for code in codes {
                    self.disabled.remove(&code);
                    self.enabled.insert(code);
                }
            }
        }
    }

    /// Is `code` disabled by the current file-wide state?
    pub fn is_disabled(&self, code: &str) -> bool {
        let code = normalize(code);
        if self.enabled.contains(&code) {
            return false;
        }
        self.all_disabled || self.disabled.contains(&code)
    }
}

/// Line-scoped directive parsed from a Dialogue event's effect field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDirective {
    /// Run checks, minus the named codes.
    Check { skipped: BTreeSet<String> },
    /// `noqa`: no checker runs for this line at all.
    SkipAll,
}

impl LineDirective {
    pub fn skips(&self, code: &str) -> bool {
        match self {
            LineDirective::SkipAll => true,
            LineDirective::Check { skipped } => skipped.contains(&normalize(code)),
        }
    }
}

/// Parse a Dialogue effect field: `noqa` wins outright; otherwise collect
/// `skip-<CODE>` tokens. Anything else in the field is ignored.
pub fn parse_line_directive(effect: &str) -> LineDirective {
    let mut skipped = BTreeSet::new();
    for token in effect.split_whitespace() {
        if token.eq_ignore_ascii_case("noqa") {
            return LineDirective::SkipAll;
        }
        if let Some(code) = strip_prefix_ci(token, "skip-") {
            if !code.is_empty() {
                skipped.insert(normalize(code));
            }
        }
    }
    LineDirective::Check { skipped }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
