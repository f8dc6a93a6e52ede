use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Build a minimal valid TOML config for a 100 x 200 cm tank
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[tank]
diameter_cm = 100.0
length_cm = 200.0

[pricing]
price_per_litre = 0.5
currency = "GBP"

[sensor]
# short intervals so watch runs stay quick in tests
poll_interval_secs = 1
read_timeout_ms = 100
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["level", "--depth-cm", "25"], 0, "% full", "stdout")]
#[case(&["level"], 2, "required", "stderr")]
#[case(&["track", "--input", "no-such-file.csv"], 1, "observation log", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();

    // Always include a valid config to avoid relying on default path
    cmd.arg("--config").arg(&cfg);

    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn cli_reports_invalid_config() {
    // Negative diameter trips validation, not TOML parsing
    let dir = tempdir().unwrap();
    let toml = "[tank]\ndiameter_cm = -5.0\nlength_cm = 200.0\n";
    let path = dir.path().join("bad.toml");
    fs::write(&path, toml).unwrap();

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();
    cmd.arg("--config")
        .arg(&path)
        .arg("level")
        .arg("--depth-cm")
        .arg("25");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("tank.diameter_cm"));
}

#[rstest]
fn cli_reports_bad_observation_header() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    // Write a bad-header CSV
    let bad_csv = dir.path().join("obs.csv");
    let mut f = fs::File::create(&bad_csv).unwrap();
    writeln!(f, "time,cm").unwrap();
    writeln!(f, "2026-01-05T08:00:00,25.0").unwrap();

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("track")
        .arg("--input")
        .arg(&bad_csv);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid headers"));
}

#[rstest]
fn track_reports_usage_from_a_log() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let csv = dir.path().join("obs.csv");
    fs::write(
        &csv,
        "timestamp,depth_cm\n\
         2026-01-05T08:00:00,25.0\n\
         2026-01-05T12:00:00,30.0\n\
         2026-01-05T18:00:00,28.0\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("track")
        .arg("--input")
        .arg(&csv);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("used today"));
}

#[rstest]
fn out_of_order_rows_exit_with_code_3() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let csv = dir.path().join("obs.csv");
    fs::write(
        &csv,
        "timestamp,depth_cm\n\
         2026-01-05T12:00:00,30.0\n\
         2026-01-05T08:00:00,25.0\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("track")
        .arg("--input")
        .arg(&csv);

    cmd.assert()
        .code(3)
        .stderr(predicate::str::contains("earlier than"));
}

#[rstest]
fn non_finite_depth_exits_with_code_5() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let csv = dir.path().join("obs.csv");
    fs::write(
        &csv,
        "timestamp,depth_cm\n2026-01-05T08:00:00,NaN\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("track")
        .arg("--input")
        .arg(&csv);

    cmd.assert()
        .code(5)
        .stderr(predicate::str::contains("finite"));
}

#[rstest]
fn watch_streams_the_requested_number_of_samples() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("tankgauge_cli").unwrap();
    cmd.env("TANKGAUGE_SIM_START_CM", "40")
        .env("TANKGAUGE_SIM_STEP_CM", "0.5")
        .arg("--config")
        .arg(&cfg)
        .arg("watch")
        .arg("--interval-secs")
        .arg("1")
        .arg("--samples")
        .arg("2");

    let out = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&out);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2, "expected one line per sample: {stdout}");
    assert!(stdout.contains("used today"));
}
