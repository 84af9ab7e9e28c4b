use assert_cmd::Command;
use protexpress_test_data::{TestArtifacts, TestFile, SAMPLE_SEQUENCE};
use serde_json::Value;

fn run(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("protexpress").unwrap();
    cmd.env_remove("PROTEXPRESS_ARTIFACTS").args(args);
    cmd.assert()
}

#[test]
fn test_cli_sequence_argument() {
    let dir = TestArtifacts::default()
        .method("His-tag IMAC", 0.9)
        .method("Ion exchange", 0.4)
        .buffer_ph(7.5)
        .create_temp()
        .unwrap();
    let artifacts = dir.path().to_str().unwrap();

    let assert = run(&["--artifacts", artifacts, SAMPLE_SEQUENCE]).success();
    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(json["recommended_tag_n"], "His6");
    assert_eq!(json["recommended_tag_c"], Value::Null);
    assert_eq!(json["purification_methods_ranked"][0][0], "His-tag IMAC");
    assert_eq!(json["suggested_protocol"]["expression"], "Predicted success: 82%.");
    assert_eq!(json["suggested_protocol"]["buffer"]["pH"], 7.5);
    assert_eq!(json["buffer_ph"], 7.5);
    assert_eq!(json["suggested_protocol"]["buffer"]["salt_mM"], Value::Null);
    assert!(json.get("salt_mm").is_none());
}

#[test]
fn test_cli_fasta_file() {
    let dir = TestArtifacts::default().create_temp().unwrap();
    let (fasta, _temp) = TestFile::fasta_01().create_temp().unwrap();

    let assert = run(&[
        "--artifacts",
        dir.path().to_str().unwrap(),
        "--compact",
        &fasta,
    ])
    .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["suggested_protocol"]["tagging"]["N_term"], "His6");
}

#[test]
fn test_cli_artifacts_from_env() {
    let dir = TestArtifacts::default().create_temp().unwrap();
    let mut cmd = Command::cargo_bin("protexpress").unwrap();
    cmd.env("PROTEXPRESS_ARTIFACTS", dir.path())
        .arg(SAMPLE_SEQUENCE)
        .assert()
        .success();
}

#[test]
fn test_cli_missing_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let assert = run(&["--artifacts", dir.path().to_str().unwrap(), SAMPLE_SEQUENCE]).failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("clf_expr"));
}

#[test]
fn test_cli_empty_sequence() {
    let dir = TestArtifacts::default().create_temp().unwrap();
    run(&["--artifacts", dir.path().to_str().unwrap(), "1234"]).failure();
}

#[test]
fn test_cli_directory_input_is_an_error() {
    let dir = TestArtifacts::default().create_temp().unwrap();
    let input = tempfile::tempdir().unwrap();
    let assert = run(&[
        "--artifacts",
        dir.path().to_str().unwrap(),
        input.path().to_str().unwrap(),
    ])
    .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("failed to read"));
}
