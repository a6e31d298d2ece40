use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FORMAT_LINE: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n";

fn script(events: &str) -> String {
    format!("[Script Info]\nTitle: Test\n\n[Events]\n{FORMAT_LINE}{events}")
}

fn dialogue(effect: &str, text: &str) -> String {
    format!("Dialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,{effect},{text}\n")
}

fn comment(effect: &str, text: &str) -> String {
    format!("Comment: 0,0:00:00.00,0:00:00.00,Default,,0,0,0,{effect},{text}\n")
}

fn write_script(dir: &TempDir, name: &str, events: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, script(events)).expect("write fixture");
    path
}

fn lyralint() -> Command {
    Command::new(cargo::cargo_bin!("lyralint"))
}

#[test]
fn clean_file_passes_with_exit_zero() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "clean.ass", &dialogue("", "The world is mine"));

    lyralint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("errors=0"));
}

#[test]
fn violations_fail_with_exit_one_and_are_listed() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "dirty.ass", &dialogue("", "the world is mine,"));

    lyralint()
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CAP001"))
        .stdout(predicate::str::contains("PCT001"))
        .stdout(predicate::str::contains("dirty.ass"));
}

#[test]
fn warnings_never_affect_the_exit_code() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "warn.ass", &dialogue("", "Fading away…"));

    lyralint()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("FMT004"))
        .stdout(predicate::str::contains("warnings=1"));
}

#[test]
fn json_report_has_the_documented_shape() {
    let td = TempDir::new().expect("temp");
    let file = write_script(
        &td,
        "dirty.ass",
        &(dialogue("", "the world is mine,") + &dialogue("", "Fading away…")),
    );

    let assert = lyralint().arg("--json").arg(&file).assert().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    let summary = &value["summary"];
    assert_eq!(summary["files_checked"], 1);
    assert_eq!(summary["files_with_issues"], 1);
    assert_eq!(summary["total_warnings"], 1);

    let files = value["files"].as_array().expect("files array");
    let error_sum: usize = files
        .iter()
        .map(|f| f["errors"].as_array().map(|a| a.len()).unwrap_or(0))
        .sum();
    assert_eq!(summary["total_errors"].as_u64().expect("count") as usize, error_sum);

    let first = &files[0]["errors"][0];
    for key in ["line", "code", "message", "level", "context", "full_line"] {
        assert!(first.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn disable_flag_is_case_insensitive() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "dirty.ass", &dialogue("", "the world is mine"));

    let lower = lyralint()
        .args(["--json", "--disable", "cap001"])
        .arg(&file)
        .assert()
        .success();
    let upper = lyralint()
        .args(["--json", "--disable", "CAP001"])
        .arg(&file)
        .assert()
        .success();

    assert_eq!(lower.get_output().stdout, upper.get_output().stdout);
}

#[test]
fn unknown_disable_codes_are_accepted_silently() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "clean.ass", &dialogue("", "The world is mine"));

    lyralint()
        .args(["--disable", "fut999"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn list_codes_prints_the_registry_and_checks_nothing() {
    let td = TempDir::new().expect("temp");

    lyralint()
        .current_dir(td.path())
        .arg("--list-codes")
        .assert()
        .success()
        .stdout(predicate::str::contains("CAP001"))
        .stdout(predicate::str::contains("DSP002"))
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn default_scan_walks_the_ass_directory() {
    let td = TempDir::new().expect("temp");
    let sub = td.path().join("ass").join("album");
    std::fs::create_dir_all(&sub).expect("mkdir");
    std::fs::write(sub.join("song.ass"), script(&dialogue("", "the world is mine")))
        .expect("write fixture");

    lyralint()
        .current_dir(td.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CAP001"));
}

#[test]
fn missing_default_directory_is_an_error() {
    let td = TempDir::new().expect("temp");

    lyralint()
        .current_dir(td.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn parse_failure_is_isolated_to_the_offending_file() {
    let td = TempDir::new().expect("temp");
    let bad = td.path().join("bad.ass");
    std::fs::write(&bad, "[Script Info]\nTitle: no events\n").expect("write fixture");
    let good = write_script(&td, "good.ass", &dialogue("", "The world is mine"));

    let assert = lyralint()
        .args(["--json"])
        .arg(&bad)
        .arg(&good)
        .assert()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["files_checked"], 2);
    assert_eq!(value["files"][0]["errors"][0]["code"], "PRS001");
    assert_eq!(value["files"][1]["errors"].as_array().expect("arr").len(), 0);
}

#[test]
fn noqa_effect_suppresses_a_whole_line() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "noqa.ass", &dialogue("noqa", "the world is mine,  [x]"));

    lyralint().arg(&file).assert().success();
}

#[test]
fn comment_directives_drive_file_wide_suppression() {
    let td = TempDir::new().expect("temp");
    let events = comment("lint-disable", "")
        + &dialogue("", "the world is mine.")
        + &comment("lint-enable", "CAP001")
        + &dialogue("", "the world is mine.")
        + &comment("lint-enable", "")
        + &dialogue("", "The world is mine");
    let file = write_script(&td, "directives.ass", &events);

    let assert = lyralint().args(["--json"]).arg(&file).assert().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    let errors = value["files"][0]["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["code"], "CAP001");
    assert_eq!(errors[0]["line"], 4);
}

#[test]
fn relint_of_a_clean_file_stays_clean() {
    let td = TempDir::new().expect("temp");
    let file = write_script(&td, "clean.ass", &dialogue("", "The world is mine"));

    for _ in 0..2 {
        lyralint()
            .args(["--json"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"total_errors\": 0"));
    }
}
