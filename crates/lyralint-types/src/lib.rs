//! Data types (rule codes + reports) for lyralint.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rule code emitted when a file cannot be parsed structurally.
pub const CODE_PARSE_ERROR: &str = "PRS001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// The fixed catalogue of rule codes.
///
/// Codes are six characters: a category prefix plus a three-digit number.
/// Their textual form is case-insensitive everywhere (CLI flags, effect-field
/// directives); [`RuleCode::parse`] normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCode {
    /// First letter of a case-bearing line must be uppercase.
    Cap001,
    /// Whole line written in capitals (shouting).
    Cap002,
    /// Every word capitalized (title case).
    Cap003,
    /// Trailing comma.
    Pct001,
    /// Trailing period without an acronym before it.
    Pct002,
    /// Consecutive punctuation marks other than a plain ellipsis.
    Pct003,
    /// Whitespace before punctuation.
    Pct004,
    /// Missing space after punctuation.
    Pct005,
    /// Run of two or more spaces.
    Fmt001,
    /// Leading or trailing whitespace.
    Fmt002,
    /// Curly quote glyphs instead of straight quotes.
    Fmt003,
    /// Unicode ellipsis instead of three dots.
    Fmt004,
    /// Explicit line-break marker embedded in the text.
    Fmt005,
    /// Inline override tag that is not a karaoke timing tag.
    Fmt006,
    /// Square brackets in lyric text.
    Spc001,
    /// Asterisk censoring.
    Spc002,
    /// Number over ten spelled out in words.
    Num001,
    /// Repetition multiplier shorthand such as "(x5)".
    Mul001,
    /// Parenthesized song-structure label.
    Nvc001,
    /// Asterisk-wrapped sound-effect description.
    Nvc002,
    /// Direct speech not introduced by a comma.
    Dsp001,
    /// Direct speech starting with a lowercase letter.
    Dsp002,
}

impl RuleCode {
    /// All codes, in the stable order diagnostics are emitted per line.
    pub const ALL: [RuleCode; 22] = [
        RuleCode::Cap001,
        RuleCode::Cap002,
        RuleCode::Cap003,
        RuleCode::Pct001,
        RuleCode::Pct002,
        RuleCode::Pct003,
        RuleCode::Pct004,
        RuleCode::Pct005,
        RuleCode::Fmt001,
        RuleCode::Fmt002,
        RuleCode::Fmt003,
        RuleCode::Fmt004,
        RuleCode::Fmt005,
        RuleCode::Fmt006,
        RuleCode::Spc001,
        RuleCode::Spc002,
        RuleCode::Num001,
        RuleCode::Mul001,
        RuleCode::Nvc001,
        RuleCode::Nvc002,
        RuleCode::Dsp001,
        RuleCode::Dsp002,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::Cap001 => "CAP001",
            RuleCode::Cap002 => "CAP002",
            RuleCode::Cap003 => "CAP003",
            RuleCode::Pct001 => "PCT001",
            RuleCode::Pct002 => "PCT002",
            RuleCode::Pct003 => "PCT003",
            RuleCode::Pct004 => "PCT004",
            RuleCode::Pct005 => "PCT005",
            RuleCode::Fmt001 => "FMT001",
            RuleCode::Fmt002 => "FMT002",
            RuleCode::Fmt003 => "FMT003",
            RuleCode::Fmt004 => "FMT004",
            RuleCode::Fmt005 => "FMT005",
            RuleCode::Fmt006 => "FMT006",
            RuleCode::Spc001 => "SPC001",
            RuleCode::Spc002 => "SPC002",
            RuleCode::Num001 => "NUM001",
            RuleCode::Mul001 => "MUL001",
            RuleCode::Nvc001 => "NVC001",
            RuleCode::Nvc002 => "NVC002",
            RuleCode::Dsp001 => "DSP001",
            RuleCode::Dsp002 => "DSP002",
        }
    }

    /// Parse a textual code, case-insensitively.
    ///
    /// Returns `None` for codes outside the catalogue; suppression channels
    /// accept unknown codes without consulting this (forward compatibility),
    /// so this is only used where a real registry entry is needed.
    pub fn parse(s: &str) -> Option<RuleCode> {
        RuleCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// A single finding, located on one event line of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    /// 1-based position of the event in the file's event list.
    pub line: u32,
    /// Rule code, e.g. "CAP001", or "PRS001" for a structural parse failure.
    pub code: String,
    pub message: String,
    pub level: Severity,
    /// Short excerpt around the offending span.
    pub context: String,
    /// The original event text, verbatim.
    pub full_line: String,
}

/// Diagnostics for one input file, split by severity, each in line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileReport {
    pub path: String,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl FileReport {
    pub fn clean(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

/// Aggregate counts over all file reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub files_checked: u32,
    pub files_with_issues: u32,
    pub total_errors: u32,
    pub total_warnings: u32,
}

impl Summary {
    /// Fold a summary from per-file reports.
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut s = Summary {
            files_checked: reports.len() as u32,
            ..Summary::default()
        };
        for r in reports {
            if r.has_issues() {
                s.files_with_issues += 1;
            }
            s.total_errors += r.errors.len() as u32;
            s.total_warnings += r.warnings.len() as u32;
        }
        s
    }
}

/// The full JSON report: a summary plus one entry per input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LintReport {
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_as_str() {
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Error.as_str(), "error");
    }

    #[test]
    fn rule_codes_are_unique_and_six_chars() {
        let mut seen = std::collections::HashSet::new();
        for code in RuleCode::ALL {
            assert_eq!(code.as_str().len(), 6, "{} should be 6 chars", code.as_str());
            assert!(seen.insert(code.as_str()), "duplicate code {}", code.as_str());
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RuleCode::parse("cap001"), Some(RuleCode::Cap001));
        assert_eq!(RuleCode::parse("CAP001"), Some(RuleCode::Cap001));
        assert_eq!(RuleCode::parse("  nUm001 "), Some(RuleCode::Num001));
        assert_eq!(RuleCode::parse("XYZ999"), None);
    }

    #[test]
    fn summary_folds_counts() {
        let clean = FileReport::clean("a.ass");
        let mut dirty = FileReport::clean("b.ass");
        dirty.errors.push(Diagnostic {
            line: 3,
            code: "CAP001".to_string(),
            message: "m".to_string(),
            level: Severity::Error,
            context: "c".to_string(),
            full_line: "f".to_string(),
        });
        dirty.warnings.push(Diagnostic {
            line: 4,
            code: "FMT004".to_string(),
            message: "m".to_string(),
            level: Severity::Warning,
            context: "c".to_string(),
            full_line: "f".to_string(),
        });

        let s = Summary::from_reports(&[clean, dirty]);
        assert_eq!(s.files_checked, 2);
        assert_eq!(s.files_with_issues, 1);
        assert_eq!(s.total_errors, 1);
        assert_eq!(s.total_warnings, 1);
    }

    #[test]
    fn report_serializes_with_expected_shape() {
        let report = LintReport {
            summary: Summary {
                files_checked: 1,
                files_with_issues: 1,
                total_errors: 1,
                total_warnings: 0,
            },
            files: vec![FileReport {
                path: "songs/a.ass".to_string(),
                errors: vec![Diagnostic {
                    line: 2,
                    code: "PCT001".to_string(),
                    message: "Don't end lines with commas".to_string(),
                    level: Severity::Error,
                    context: "world,".to_string(),
                    full_line: "Hello world,".to_string(),
                }],
                warnings: vec![],
            }],
        };

        let value = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(value["summary"]["total_errors"], 1);
        assert_eq!(value["files"][0]["path"], "songs/a.ass");
        assert_eq!(value["files"][0]["errors"][0]["level"], "error");
        assert_eq!(value["files"][0]["errors"][0]["code"], "PCT001");
        assert!(value["files"][0]["errors"][0]["full_line"].is_string());
    }
}
