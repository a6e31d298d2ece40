use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use lyralint_ass::parse_script;
use lyralint_domain::{evaluate_events, CompiledChecks};
use lyralint_types::{
    Diagnostic, FileReport, LintReport, Severity, Summary, CODE_PARSE_ERROR,
};

/// What to lint and what the run-wide seed looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintPlan {
    /// Globally disabled rule codes (case-insensitive), seeding every file's
    /// suppression state.
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRun {
    pub report: LintReport,
    pub exit_code: i32,
}

/// Lint a batch of files.
///
/// Files are independent, so they fan out across the rayon pool; each file's
/// event walk stays sequential because its suppression state is an ordered
/// fold. Report order follows input order.
pub fn lint_files(paths: &[PathBuf], plan: &LintPlan) -> LintRun {
    let checks = CompiledChecks::compile();

    let files: Vec<FileReport> = paths
        .par_iter()
        .map(|path| lint_path(path, &checks, &plan.disabled))
        .collect();

    let summary = Summary::from_reports(&files);
    let exit_code = i32::from(summary.total_errors > 0);

    LintRun {
        report: LintReport { summary, files },
        exit_code,
    }
}

fn lint_path(path: &Path, checks: &CompiledChecks, disabled: &[String]) -> FileReport {
    let label = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(content) => lint_content(&label, &content, checks, disabled),
        Err(e) => parse_failure_report(label, format!("Failed to read file: {e}")),
    }
}

/// Lint one file's content. A structural parse failure yields exactly one
/// parse diagnostic and no further checks for that file.
pub fn lint_content(
    path_label: &str,
    content: &str,
    checks: &CompiledChecks,
    disabled: &[String],
) -> FileReport {
    let events = match parse_script(content) {
        Ok(events) => events,
        Err(e) => {
            return parse_failure_report(
                path_label.to_string(),
                format!("Failed to parse ASS file: {e}"),
            );
        }
    };

    debug!(path = path_label, events = events.len(), "checking file");

    let mut report = FileReport::clean(path_label);
    for diagnostic in evaluate_events(&events, checks, disabled) {
        match diagnostic.level {
            Severity::Error => report.errors.push(diagnostic),
            Severity::Warning => report.warnings.push(diagnostic),
        }
    }
    report
}

fn parse_failure_report(path: String, message: String) -> FileReport {
    FileReport {
        path,
        errors: vec![Diagnostic {
            line: 0,
            code: CODE_PARSE_ERROR.to_string(),
            message,
            level: Severity::Error,
            context: String::new(),
            full_line: String::new(),
        }],
        warnings: vec![],
    }
}
