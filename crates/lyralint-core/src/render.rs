use owo_colors::OwoColorize;

use lyralint_domain::REGISTRY;
use lyralint_types::{Diagnostic, LintReport, Severity};

/// Render a report for terminals: diagnostics grouped by file, errors before
/// warnings, one summary line at the end. `color` is decided by the caller
/// (TTY + NO_COLOR).
pub fn render_text(report: &LintReport, color: bool) -> String {
    let mut out = String::new();

    for file in &report.files {
        if !file.has_issues() {
            continue;
        }

        if color {
            out.push_str(&format!("{}\n", file.path.bold()));
        } else {
            out.push_str(&format!("{}\n", file.path));
        }

        for d in &file.errors {
            out.push_str(&render_diagnostic(d, color));
        }
        for d in &file.warnings {
            out.push_str(&render_diagnostic(d, color));
        }
        out.push('\n');
    }

    let s = &report.summary;
    let summary = format!(
        "— Summary — files={} with_issues={} errors={} warnings={}",
        s.files_checked, s.files_with_issues, s.total_errors, s.total_warnings
    );
    if color {
        out.push_str(&format!("{}\n", summary.bold()));
    } else {
        out.push_str(&summary);
        out.push('\n');
    }

    out
}

fn render_diagnostic(d: &Diagnostic, color: bool) -> String {
    let (icon, label) = match d.level {
        Severity::Error => ("✖", "error"),
        Severity::Warning => ("▲", "warning"),
    };
    let (icon, label) = if color {
        match d.level {
            Severity::Error => (icon.red().to_string(), label.red().bold().to_string()),
            Severity::Warning => (icon.yellow().to_string(), label.yellow().bold().to_string()),
        }
    } else {
        (icon.to_string(), label.to_string())
    };

    let location = if d.line > 0 {
        format!("line {}", d.line)
    } else {
        "file".to_string()
    };

    let mut row = format!(
        "  {} {:<7} {:<8} {}  {}",
        icon, label, location, d.code, d.message
    );
    if !d.context.is_empty() {
        row.push_str(&format!(": \"{}\"", d.context));
    }
    row.push('\n');
    row
}

/// Render the report as the machine-readable JSON document.
pub fn render_json(report: &LintReport) -> String {
    serde_json::to_string_pretty(report).expect("report serialization cannot fail")
}

/// Render the full rule catalogue, one row per code.
pub fn render_code_listing() -> String {
    let mut out = String::new();
    for d in &REGISTRY {
        out.push_str(&format!(
            "{}  {:<7} {:<18} {}\n",
            d.code.as_str(),
            d.severity.as_str(),
            d.category,
            d.message
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyralint_types::{FileReport, LintReport, Summary};

    fn sample_report() -> LintReport {
        let files = vec![
            FileReport::clean("songs/clean.ass"),
            FileReport {
                path: "songs/dirty.ass".to_string(),
                errors: vec![Diagnostic {
                    line: 3,
                    code: "CAP001".to_string(),
                    message: "First letter must be capitalized".to_string(),
                    level: Severity::Error,
                    context: "the world is mine".to_string(),
                    full_line: "the world is mine".to_string(),
                }],
                warnings: vec![Diagnostic {
                    line: 5,
                    code: "FMT004".to_string(),
                    message: "Use three dots (...) instead of the ellipsis character".to_string(),
                    level: Severity::Warning,
                    context: "Fading away…".to_string(),
                    full_line: "Fading away…".to_string(),
                }],
            },
        ];
        LintReport {
            summary: Summary::from_reports(&files),
            files,
        }
    }

    #[test]
    fn text_report_without_color_is_stable() {
        let text = render_text(&sample_report(), false);
        let expected = "\
songs/dirty.ass
  ✖ error   line 3   CAP001  First letter must be capitalized: \"the world is mine\"
  ▲ warning line 5   FMT004  Use three dots (...) instead of the ellipsis character: \"Fading away…\"

— Summary — files=2 with_issues=1 errors=1 warnings=1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn clean_files_are_not_listed() {
        let text = render_text(&sample_report(), false);
        assert!(!text.contains("clean.ass"));
    }

    #[test]
    fn color_mode_keeps_the_same_words() {
        let text = render_text(&sample_report(), true);
        assert!(text.contains("CAP001"));
        assert!(text.contains("error"));
        assert!(text.contains("\u{1b}["), "expected ANSI escapes");
    }

    #[test]
    fn parse_failures_render_as_file_level() {
        let files = vec![FileReport {
            path: "bad.ass".to_string(),
            errors: vec![Diagnostic {
                line: 0,
                code: "PRS001".to_string(),
                message: "Failed to parse ASS file: no [Events] section found".to_string(),
                level: Severity::Error,
                context: String::new(),
                full_line: String::new(),
            }],
            warnings: vec![],
        }];
        let report = LintReport {
            summary: Summary::from_reports(&files),
            files,
        };

        let text = render_text(&report, false);
        assert!(text.contains("file     PRS001"));
        assert!(!text.contains("line 0"));
        assert!(!text.contains(": \"\""));
    }

    #[test]
    fn json_matches_schema_shape() {
        let json = render_json(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["summary"]["files_checked"], 2);
        assert_eq!(value["files"][1]["errors"][0]["code"], "CAP001");
        assert_eq!(value["files"][1]["warnings"][0]["level"], "warning");
        assert_eq!(
            value["summary"]["total_errors"],
            value["files"]
                .as_array()
                .expect("files array")
                .iter()
                .map(|f| f["errors"].as_array().map(|a| a.len()).unwrap_or(0))
                .sum::<usize>()
        );
    }

    #[test]
    fn code_listing_covers_the_whole_registry() {
        let listing = render_code_listing();
        assert_eq!(listing.lines().count(), REGISTRY.len());
        assert!(listing.contains("CAP001"));
        assert!(listing.contains("DSP002"));
        for d in &REGISTRY {
            assert!(listing.contains(d.code.as_str()));
        }
    }
}
