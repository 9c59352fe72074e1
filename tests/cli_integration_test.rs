//! End-to-end tests of the `riskmap` binary.

use assert_cmd::Command;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const KOREAN_CONFIG: &str = indoc! {r#"
    [[risk_ranges]]
    min = 1
    max = 4
    label = "허용 가능"

    [[risk_ranges]]
    min = 5
    max = 8
    label = "관리 필요"

    [[risk_ranges]]
    min = 9
    max = 16
    label = "즉시 개선"
"#};

fn riskmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("riskmap").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RISKMAP_CONFIG")
        .env_remove("RISKMAP_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn relabel_prints_scenario_labels_as_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("riskmap.toml"), KOREAN_CONFIG).unwrap();
    fs::write(
        dir.path().join("rows.json"),
        r#"[{"score": 12, "label": ""}, {"score": 3, "label": ""}]"#,
    )
    .unwrap();

    let stdout = stdout_of(riskmap(&dir).args(["relabel", "rows.json", "--format", "json"]));

    let rows: Value = serde_json::from_str(&stdout).unwrap();
    let labels: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["즉시 개선", "허용 가능"]);
}

#[test]
fn init_then_validate_succeeds() {
    let dir = TempDir::new().unwrap();

    let created = stdout_of(riskmap(&dir).arg("init"));
    assert!(created.contains("riskmap.toml"));
    assert!(dir.path().join("riskmap.toml").exists());

    let report = stdout_of(riskmap(&dir).args(["validate", "--plain"]));
    assert!(report.starts_with("[OK] Configuration is valid"), "{report}");

    riskmap(&dir).arg("init").assert().failure();
}

#[test]
fn validate_fails_and_lists_every_issue() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("broken.toml"),
        indoc! {r#"
            [severity]
            min = 3
            max = 1

            [[risk_ranges]]
            min = 8
            max = 2
            label = "reversed"
        "#},
    )
    .unwrap();

    let output = riskmap(&dir)
        .args(["validate", "--plain", "--config", "broken.toml"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "[FAIL] severity min 3 is greater than max 1",
            "[FAIL] risk_ranges[0] min 8 is greater than max 2",
        ]
    );
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("configuration has 2 issue(s)"));
}

#[test]
fn classify_from_factors_uses_discovered_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("riskmap.toml"), KOREAN_CONFIG).unwrap();
    let nested = dir.path().join("site");
    fs::create_dir(&nested).unwrap();

    let output = riskmap(&dir)
        .current_dir(&nested)
        .args(["classify", "--frequency", "2", "--severity", "3", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let classification: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(classification["score"], 6.0);
    assert_eq!(classification["label"], "관리 필요");
    assert_eq!(classification["range"], 2);
}

#[test]
fn classify_unresolved_score_in_plain_terminal_output() {
    let dir = TempDir::new().unwrap();

    let stdout = stdout_of(riskmap(&dir).args(["classify", "20", "--plain"]));

    assert_eq!(
        stdout,
        "[WARN] Score 20 -> no enabled range contains this score\n"
    );
}

#[test]
fn classify_rejects_values_off_the_scale() {
    let dir = TempDir::new().unwrap();
    riskmap(&dir)
        .args(["classify", "--frequency", "7", "--severity", "1"])
        .assert()
        .failure();
}

#[test]
fn scales_json_includes_diagnostics() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("riskmap.toml"),
        indoc! {r#"
            [[risk_ranges]]
            min = 1
            max = 10
            label = "A"

            [[risk_ranges]]
            min = 2
            max = 5
            label = "B"
        "#},
    )
    .unwrap();

    let stdout = stdout_of(riskmap(&dir).args(["scales", "--format", "json"]));

    let overview: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(overview["config"]["frequency"]["points"].as_array().unwrap().len(), 4);
    let kinds: Vec<&str> = overview["diagnostics"]["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"shadowed"), "{kinds:?}");
    assert!(kinds.contains(&"uncovered"), "{kinds:?}");
}

#[test]
fn relabel_writes_output_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rows.json"),
        r#"[{"label": "", "frequency": 4, "severity": 4}]"#,
    )
    .unwrap();

    riskmap(&dir)
        .args(["relabel", "rows.json", "--output", "out/rows.json", "--format", "json"])
        .assert()
        .success();

    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/rows.json")).unwrap())
            .unwrap();
    assert_eq!(written[0]["score"], 16.0);
    assert_eq!(written[0]["label"], "Immediate improvement");
    assert_eq!(written[0]["frequency"], 4);
}
