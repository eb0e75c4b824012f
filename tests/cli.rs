use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// The binary, isolated from any user config by pointing it at `config_dir`.
fn attrquery(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("attrquery").unwrap();
    cmd.env("NO_COLOR", "1").arg("--config-dir").arg(config_dir);
    cmd
}

#[test]
fn test_kinds_lists_builtins() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("Instrument"))
        .stdout(predicate::str::contains("Wavelength"))
        .stdout(predicate::str::contains("Instrument which recorded the data."));
}

#[test]
fn test_values_renders_table() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["values", "instrument"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Attribute Name | Full Name | Description",
        ))
        .stdout(predicate::str::contains("lasco          | LASCO"))
        .stdout(predicate::str::contains(
            "Large Angle and Spectrometric Coronagraph",
        ));
}

#[test]
fn test_values_for_kind_without_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["values", "Wavelength"])
        .assert()
        .success()
        .stdout("Attribute Name | Full Name | Description\n---------------+-----------+------------\n");
}

#[test]
fn test_values_unknown_kind_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["values", "Colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown attribute kind: Colour"));
}

#[test]
fn test_resolve_prints_leaf() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["resolve", "Instrument", "aia"])
        .assert()
        .success()
        .stdout("Instrument(\"AIA\")\n");

    attrquery(temp_dir.path())
        .args(["resolve", "source", "STEREO_A"])
        .assert()
        .success()
        .stdout("Source(\"STEREO_A\")\n");
}

#[test]
fn test_resolve_unknown_name_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["resolve", "Instrument", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Instrument has no attribute 'nope'",
        ));
}

#[test]
fn test_query_groups_terms() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["query", "Instrument=aia", "Instrument=hmi", "Source=sdo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "((Instrument(\"AIA\") & Source(\"SDO\")) | (Instrument(\"HMI\") & Source(\"SDO\")))",
        ))
        .stdout(predicate::str::contains("2 block(s) to submit"));
}

#[test]
fn test_query_json_blocks() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = attrquery(temp_dir.path())
        .args(["query", "--json", "Instrument=aia", "Level=1.5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let blocks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(blocks.as_array().unwrap().len(), 1);
    assert_eq!(blocks[0]["Instrument"], "AIA");
    assert_eq!(blocks[0]["Level"], "1.5");
}

#[test]
fn test_query_rejects_bad_term() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["query", "aia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KIND=NAME"));
}

#[test]
fn test_time_normalizes_input() {
    let temp_dir = tempfile::tempdir().unwrap();

    attrquery(temp_dir.path())
        .args(["time", "2012:124:21:08:12"])
        .assert()
        .success()
        .stdout("2012-05-03T21:08:12.000\n");

    attrquery(temp_dir.path())
        .args(["time", "garbage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to parse time: garbage"));
}

#[test]
fn test_values_file_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    let values_file = temp_dir.path().join("detectors.json");
    std::fs::write(
        &values_file,
        r#"{"Detector": [["EUVI-A", "EUVI on the Ahead spacecraft"]]}"#,
    )
    .unwrap();

    attrquery(temp_dir.path())
        .arg("--values")
        .arg(&values_file)
        .args(["resolve", "Detector", "euvia"])
        .assert()
        .success()
        .stdout("Detector(\"EUVI-A\")\n");
}

#[test]
fn test_config_disables_builtins() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"preload_builtins": false}"#,
    )
    .unwrap();

    attrquery(temp_dir.path())
        .arg("values")
        .assert()
        .success()
        .stdout(predicate::str::contains("No values registered."));
}

#[test]
fn test_project_config_dir() {
    let temp_dir = tempfile::tempdir().unwrap();
    let project_dir = temp_dir.path().join(".attrquery");
    std::fs::create_dir_all(&project_dir).unwrap();
    std::fs::write(
        project_dir.join("config.json"),
        r#"{"preload_builtins": false, "values_files": ["mine.json"]}"#,
    )
    .unwrap();
    std::fs::write(
        project_dir.join("mine.json"),
        r#"{"Provider": [["VSO", "Virtual Solar Observatory"]]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("attrquery").unwrap();
    cmd.env("NO_COLOR", "1")
        .current_dir(temp_dir.path())
        .args(["values", "Provider"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vso            | VSO"));
}
