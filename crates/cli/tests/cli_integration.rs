//! CLI integration tests for the `rewire` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. History tests point `--data-dir` at a
//! fresh temp directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rewire() -> Command {
    let mut cmd = cargo_bin_cmd!("rewire");
    cmd.env_remove("REWIRE_DATA_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

fn json_stderr(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().failure().code(1).get_output().stderr.clone();
    serde_json::from_slice(&out).expect("stderr is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    rewire()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "reWire cognitive-training puzzles",
        ));
}

#[test]
fn version_exits_0() {
    rewire()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rewire"));
}

// ──────────────────────────────────────────────
// 2. Registry and routing
// ──────────────────────────────────────────────

#[test]
fn modules_lists_registry_in_order() {
    let v = json_stdout(rewire().args(["modules", "--output", "json"]));
    let ids: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        [
            "arithmetic-grid",
            "digit-span",
            "stroop",
            "number-sequences",
            "spell-check",
            "mental-map"
        ]
    );
}

#[test]
fn route_fragment_resolves_module() {
    rewire()
        .args(["route", "#/module/stroop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("module stroop (Stroop Test)"));
}

#[test]
fn route_path_under_base() {
    let v = json_stdout(rewire().args([
        "route",
        "/reWire/module/digit-span",
        "--base",
        "/reWire/",
        "--output",
        "json",
    ]));
    assert_eq!(v["page"], "module");
    assert_eq!(v["moduleId"], "digit-span");
    assert_eq!(v["path"], "/reWire/module/digit-span");
    assert_eq!(v["fragment"], "#/module/digit-span");
}

#[test]
fn route_unknown_path_is_home() {
    rewire()
        .args(["route", "/somewhere/else"])
        .assert()
        .success()
        .stdout(predicate::str::contains("home"));
}

#[test]
fn route_unknown_module_exits_1() {
    rewire()
        .args(["route", "#/module/chess"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("module not found: chess"));
}

#[test]
fn json_error_escapes_quotes_and_backslashes() {
    let path = r#"no "such" \attempt\.json"#;
    let v = json_stderr(rewire().args(["check", path, "--output", "json"]));
    let msg = v["error"].as_str().unwrap();
    assert!(msg.contains(path));
}

#[test]
fn route_unknown_module_json_error() {
    rewire()
        .args(["route", "#/module/chess", "--output", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("{\"error\":"));
}

// ──────────────────────────────────────────────
// 3. Generators
// ──────────────────────────────────────────────

#[test]
fn sequence_json_shape_and_no_repeats() {
    let v = json_stdout(rewire().args([
        "sequence",
        "--difficulty",
        "hard",
        "--count",
        "30",
        "--seed",
        "7",
        "--output",
        "json",
    ]));
    let seqs = v.as_array().unwrap();
    assert_eq!(seqs.len(), 30);
    for s in seqs {
        assert!(s["numbers"].as_array().unwrap().len() >= 4);
        assert!(s["answer"].is_i64());
    }
    for pair in seqs.windows(2) {
        assert_ne!(pair[0]["type"], pair[1]["type"]);
    }
}

#[test]
fn sequence_seed_is_reproducible() {
    let args = ["sequence", "--count", "5", "--seed", "42", "--output", "json"];
    let a = json_stdout(rewire().args(args));
    let b = json_stdout(rewire().args(args));
    assert_eq!(a, b);
}

#[test]
fn sequence_rejects_unknown_difficulty() {
    rewire()
        .args(["sequence", "--difficulty", "brutal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn grid_divide_json_with_solution() {
    let v = json_stdout(rewire().args([
        "grid", "--rows", "3", "--cols", "5", "--op", "/", "--solve", "--seed", "3", "--output",
        "json",
    ]));
    assert_eq!(v["operation"], "÷");
    let rows = v["rowHeaders"].as_array().unwrap();
    let cols = v["colHeaders"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(cols.len(), 5);
    assert!(cols.iter().all(|c| c.as_i64().unwrap() >= 2));
    let solution = v["solution"].as_array().unwrap();
    assert_eq!(solution.len(), 3);
    let r0 = rows[0].as_i64().unwrap();
    let c0 = cols[0].as_i64().unwrap();
    assert_eq!(solution[0][0].as_i64().unwrap(), r0.div_euclid(c0));
}

#[test]
fn grid_text_shows_headers() {
    rewire()
        .args(["grid", "--rows", "2", "--cols", "2", "--op", "×", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("×"))
        .stdout(predicate::str::contains("_"));
}

#[test]
fn maze_json_walks_within_step_count() {
    let v = json_stdout(rewire().args([
        "maze",
        "--grid-size",
        "5",
        "--steps",
        "6",
        "--rounds",
        "3",
        "--seed",
        "11",
        "--output",
        "json",
    ]));
    let walks = v.as_array().unwrap();
    assert_eq!(walks.len(), 3);
    for w in walks {
        assert!(w["directions"].as_array().unwrap().len() <= 6);
        for coord in w["end"].as_array().unwrap() {
            let c = coord.as_i64().unwrap();
            assert!((0..5).contains(&c));
        }
    }
}

#[test]
fn maze_text_has_rounds() {
    rewire()
        .args(["maze", "--rounds", "2", "--seed", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Round 1:"))
        .stdout(predicate::str::contains("Round 2:"));
}

#[test]
fn maze_rejects_tiny_grid() {
    rewire()
        .args(["maze", "--grid-size", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("grid_size must be between 2 and 20"));
}

#[test]
fn maze_rejects_huge_step_count() {
    let v = json_stderr(rewire().args([
        "maze",
        "--steps",
        "18446744073709551615",
        "--output",
        "json",
    ]));
    assert!(v["error"].as_str().unwrap().contains("step_count"));
}

#[test]
fn spell_over_request_returns_whole_table() {
    let v = json_stdout(rewire().args(["spell", "--count", "500", "--seed", "2", "--output", "json"]));
    let trials = v.as_array().unwrap();
    assert_eq!(trials.len(), 105);
    for t in trials {
        if t["isCorrect"].as_bool().unwrap() {
            assert_eq!(t["word"], t["sourceWord"]);
        } else {
            assert_ne!(t["word"], t["sourceWord"]);
        }
    }
}

#[test]
fn stroop_congruent_matches_ink() {
    let v = json_stdout(rewire().args([
        "stroop", "--count", "12", "--mode", "congruent", "--seed", "9", "--output", "json",
    ]));
    let trials = v.as_array().unwrap();
    assert_eq!(trials.len(), 12);
    assert!(trials.iter().all(|t| t["word"] == t["inkColor"]));
}

#[test]
fn digits_length() {
    let v = json_stdout(rewire().args(["digits", "--length", "7", "--seed", "4", "--output", "json"]));
    let digits = v["digits"].as_array().unwrap();
    assert_eq!(digits.len(), 7);
    assert!(digits.iter().all(|d| d.as_u64().unwrap() <= 9));
}

#[test]
fn generate_uses_module_defaults() {
    let v = json_stdout(rewire().args(["generate", "mental-map", "--seed", "1", "--output", "json"]));
    assert_eq!(v["settings"]["module"], "mental-map");
    assert_eq!(v["sizeLabel"], "5×5");
    assert_eq!(v["session"]["module"], "mental-map");
    assert_eq!(v["session"]["puzzle"].as_array().unwrap().len(), 3);
}

#[test]
fn generate_unknown_module_exits_1() {
    rewire()
        .args(["generate", "chess"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown module 'chess'"));
}

// ──────────────────────────────────────────────
// 4. Grid checking
// ──────────────────────────────────────────────

#[test]
fn check_scores_partial_grid() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("attempt.json");
    fs::write(
        &path,
        r#"{"rowHeaders":[2,3],"colHeaders":[4,5],"operation":"×","answers":[[8,10],[12,null]]}"#,
    )
    .unwrap();

    let v = json_stdout(rewire().args(["check", path.to_str().unwrap(), "--output", "json"]));
    assert_eq!(v["correctCount"], 3);
    assert_eq!(v["totalCells"], 4);
    assert_eq!(v["accuracy"], 75);
    assert_eq!(v["complete"], false);
    assert_eq!(v["validation"][1][1], false);
}

#[test]
fn check_wrong_shape_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("attempt.json");
    fs::write(
        &path,
        r#"{"rowHeaders":[2,3],"colHeaders":[4,5],"operation":"+","answers":[[6,7]]}"#,
    )
    .unwrap();

    rewire()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("answers must be 2 rows of 2 cells"));
}

fn write_attempt(tmp: &TempDir, doc: &str) -> String {
    let path = tmp.path().join("attempt.json");
    fs::write(&path, doc).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn check_zero_divisor_header_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = write_attempt(
        &tmp,
        r#"{"rowHeaders":[20],"colHeaders":[0],"operation":"/","answers":[[1]]}"#,
    );

    let v = json_stderr(rewire().args(["check", &path, "--output", "json"]));
    assert!(v["error"]
        .as_str()
        .unwrap()
        .contains("column header 0 is outside 2..=9"));
}

#[test]
fn check_overflowing_header_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = write_attempt(
        &tmp,
        r#"{"rowHeaders":[9223372036854775807],"colHeaders":[2],"operation":"×","answers":[[null]]}"#,
    );

    rewire()
        .args(["check", &path])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("row header 9223372036854775807"));
}

#[test]
fn check_missing_file_exits_1() {
    rewire()
        .args(["check", "no_such_attempt.json"])
        .assert()
        .failure()
        .code(1);
}

// ──────────────────────────────────────────────
// 5. History
// ──────────────────────────────────────────────

fn record(dir: &TempDir, module: &str, correct: &str) {
    rewire()
        .args([
            "history",
            "record",
            "--module",
            module,
            "--size",
            "10 items",
            "--total",
            "10",
            "--correct",
            correct,
            "--time-ms",
            "65400",
            "--data-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success();
}

#[test]
fn history_empty_when_nothing_recorded() {
    let tmp = TempDir::new().unwrap();
    rewire()
        .args(["history", "show", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions recorded."));
}

#[test]
fn history_record_then_show() {
    let tmp = TempDir::new().unwrap();
    record(&tmp, "stroop", "7");
    record(&tmp, "spell-check", "9");

    let v = json_stdout(rewire().args([
        "history",
        "show",
        "--output",
        "json",
        "--data-dir",
        tmp.path().to_str().unwrap(),
    ]));
    let sessions = v.as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["moduleId"], "spell-check");
    assert_eq!(sessions[0]["accuracy"], 90);
    assert_eq!(sessions[1]["moduleId"], "stroop");

    rewire()
        .args(["history", "show", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spell Check"))
        .stdout(predicate::str::contains("1:05.4"));

    assert!(tmp.path().join("rewire-stats.json").exists());
}

#[test]
fn history_prunes_to_cap_keeping_each_module() {
    let tmp = TempDir::new().unwrap();
    record(&tmp, "digit-span", "5");
    for _ in 0..12 {
        record(&tmp, "arithmetic-grid", "8");
    }

    let v = json_stdout(rewire().args([
        "history",
        "show",
        "--limit",
        "50",
        "--output",
        "json",
        "--data-dir",
        tmp.path().to_str().unwrap(),
    ]));
    let sessions = v.as_array().unwrap();
    assert_eq!(sessions.len(), 10);
    assert!(sessions.iter().any(|s| s["moduleId"] == "digit-span"));
}

#[test]
fn history_clear() {
    let tmp = TempDir::new().unwrap();
    record(&tmp, "mental-map", "3");
    rewire()
        .args(["history", "clear", "--data-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared."));

    let v = json_stdout(rewire().args([
        "history",
        "show",
        "--output",
        "json",
        "--data-dir",
        tmp.path().to_str().unwrap(),
    ]));
    assert!(v.as_array().unwrap().is_empty());
}

#[test]
fn history_malformed_file_reads_empty() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("rewire-stats.json"), "not json at all").unwrap();
    let v = json_stdout(rewire().args([
        "history",
        "show",
        "--output",
        "json",
        "--data-dir",
        tmp.path().to_str().unwrap(),
    ]));
    assert!(v.as_array().unwrap().is_empty());
}

#[test]
fn history_data_dir_from_env() {
    let tmp = TempDir::new().unwrap();
    rewire()
        .env("REWIRE_DATA_DIR", tmp.path())
        .args([
            "history", "record", "--module", "stroop", "--size", "20 trials", "--total", "20",
            "--correct", "20",
        ])
        .assert()
        .success();
    assert!(tmp.path().join("rewire-stats.json").exists());
}

#[test]
fn history_custom_key() {
    let tmp = TempDir::new().unwrap();
    rewire()
        .args([
            "history",
            "--key",
            "practice",
            "record",
            "--module",
            "digit-span",
            "--size",
            "6 span",
            "--total",
            "6",
            "--correct",
            "5",
            "--direction",
            "backward",
            "--data-dir",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .success();
    let raw = fs::read_to_string(tmp.path().join("practice.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["sessions"][0]["direction"], "backward");
}

#[test]
fn history_record_rejects_unknown_module() {
    let tmp = TempDir::new().unwrap();
    rewire()
        .args([
            "history",
            "record",
            "--module",
            "chess",
            "--size",
            "x",
            "--total",
            "1",
            "--correct",
            "1",
            "--data-dir",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn history_record_rejects_correct_over_total() {
    let tmp = TempDir::new().unwrap();
    rewire()
        .args([
            "history",
            "record",
            "--module",
            "stroop",
            "--size",
            "x",
            "--total",
            "2",
            "--correct",
            "3",
            "--data-dir",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));
}
