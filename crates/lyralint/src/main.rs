use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::debug;
use walkdir::WalkDir;

use lyralint_core::{lint_files, render_code_listing, render_json, render_text, LintPlan};

/// Conventional source directory scanned when no files are named.
const DEFAULT_SOURCE_DIR: &str = "ass";

#[derive(Parser)]
#[command(name = "lyralint")]
#[command(about = "Style linter for ASS lyric files", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to check. When omitted, every *.ass under ./ass is checked.
    files: Vec<PathBuf>,

    /// Emit the report as JSON instead of grouped text.
    #[arg(long)]
    json: bool,

    /// Disable a rule code globally. Repeatable; accepts comma-separated
    /// lists; matched case-insensitively.
    #[arg(long, value_name = "CODE", action = clap::ArgAction::Append, value_delimiter = ',')]
    disable: Vec<String>,

    /// Print the full rule catalogue and exit without checking anything.
    #[arg(long)]
    list_codes: bool,

    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    if cli.list_codes {
        print!("{}", render_code_listing());
        return Ok(0);
    }

    let files = discover_files(&cli.files)?;
    if files.is_empty() {
        println!("No ASS files found");
        return Ok(0);
    }

    debug!(files = files.len(), "starting lint run");

    let plan = LintPlan {
        disabled: cli.disable.clone(),
    };
    let run = lint_files(&files, &plan);

    if cli.json {
        println!("{}", render_json(&run.report));
    } else {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        print!("{}", render_text(&run.report, color));
    }

    Ok(run.exit_code)
}

/// Resolve the input set: named files filtered to `.ass`, or a recursive scan
/// of the conventional source directory. Scan order is sorted for stable output.
fn discover_files(named: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !named.is_empty() {
        return Ok(named
            .iter()
            .filter(|p| has_ass_extension(p))
            .cloned()
            .collect());
    }

    let root = PathBuf::from(DEFAULT_SOURCE_DIR);
    if !root.is_dir() {
        bail!("directory '{DEFAULT_SOURCE_DIR}' not found; name files to check explicitly");
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && has_ass_extension(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

fn has_ass_extension(path: impl AsRef<std::path::Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ass"))
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ass_extension_matching_is_case_insensitive() {
        assert!(has_ass_extension("songs/a.ass"));
        assert!(has_ass_extension("songs/a.ASS"));
        assert!(!has_ass_extension("songs/a.srt"));
        assert!(!has_ass_extension("songs/ass"));
    }

    #[test]
    fn named_inputs_are_filtered_to_ass() {
        let files = discover_files(&[
            PathBuf::from("a.ass"),
            PathBuf::from("notes.txt"),
            PathBuf::from("b.ASS"),
        ])
        .expect("discover");
        assert_eq!(files, vec![PathBuf::from("a.ass"), PathBuf::from("b.ASS")]);
    }
}
