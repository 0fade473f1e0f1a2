//! Integration tests for the planarity CLI

mod common;

use common::{planarity, setup_workspace, write_points, BED, FLAT_REFERENCE, TILTED_45};
use predicates::prelude::*;

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = setup_workspace();
    planarity(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fit"))
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    let tmp = setup_workspace();
    planarity(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("planarity"));
}

#[test]
fn test_fit_help_lists_flags() {
    let tmp = setup_workspace();
    planarity(&tmp)
        .args(["fit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--data"))
        .stdout(predicate::str::contains("--reference"))
        .stdout(predicate::str::contains("--remove-z-offset"))
        .stdout(predicate::str::contains("--scale"));
}

#[test]
fn test_fit_requires_data() {
    let tmp = setup_workspace();
    planarity(&tmp).arg("fit").assert().failure();
}

// ============================================================================
// Fit Command Tests
// ============================================================================

#[test]
fn test_fit_tilted_plane_report() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);

    planarity(&tmp)
        .args(["fit", "-d", "tilted.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitted 4 point(s)"))
        .stdout(predicate::str::contains("Plane rotation:"))
        .stdout(predicate::str::contains("  X: -45.000°, -1000.000 µm/mm"))
        .stdout(predicate::str::contains("  Y: +0.000°, +0.000 µm/mm"))
        .stdout(predicate::str::contains("  Direction: -90.000°"))
        .stdout(predicate::str::contains("       Tilt: +45.000°"))
        .stdout(predicate::str::contains("  Max: +0.000 mm"));
}

#[test]
fn test_fit_bed_slopes() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);

    planarity(&tmp)
        .args(["fit", "-d", "bed.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitted 9 point(s), absolute"))
        .stdout(predicate::str::contains("  X: -0.057°"))
        .stdout(predicate::str::contains("  Y: +0.029°"));
}

#[test]
fn test_fit_precision_flag() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);

    planarity(&tmp)
        .args(["fit", "-d", "tilted.txt", "--precision", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("       Tilt: +45.0°"));
}

#[test]
fn test_fit_relative_mode_header() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);
    write_points(&tmp, "ref.txt", FLAT_REFERENCE);

    planarity(&tmp)
        .args(["fit", "-d", "bed.txt", "-r", "ref.txt", "-R"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relative to reference plane"));
}

#[test]
fn test_fit_offset_note() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);

    planarity(&tmp)
        .args(["fit", "-d", "bed.txt", "-z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Z offsets removed"));
}

#[test]
fn test_fit_json_output() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);

    let output = planarity(&tmp)
        .args(["-f", "json", "fit", "-d", "tilted.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tilt = json["data"]["orientation"]["tilt"].as_f64().unwrap();
    let direction = json["data"]["orientation"]["direction"].as_f64().unwrap();
    assert!((tilt - 45.0).abs() < 1e-9);
    assert!((direction + 90.0).abs() < 1e-9);
    assert_eq!(json["residuals"]["deviations"].as_array().unwrap().len(), 4);
    assert!(json["relative"].is_null());
}

#[test]
fn test_fit_yaml_output() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);

    planarity(&tmp)
        .args(["-f", "yaml", "fit", "-d", "tilted.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orientation:"))
        .stdout(predicate::str::contains("tilt:"));
}

#[test]
fn test_fit_plot() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);

    planarity(&tmp)
        .args(["fit", "-d", "bed.txt", "--plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plot (data):"));
}

#[test]
fn test_fit_bad_scale_rejected() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);

    planarity(&tmp)
        .args(["fit", "-d", "bed.txt", "--scale", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3"));
}

// ============================================================================
// Dev Command Tests
// ============================================================================

#[test]
fn test_dev_tsv_by_default() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);

    planarity(&tmp)
        .args(["dev", "-d", "tilted.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("x\ty\tdz\n"))
        .stdout(predicate::str::contains("0.000000"));
}

#[test]
fn test_dev_csv_row_count() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);

    let output = planarity(&tmp)
        .args(["-f", "csv", "dev", "-d", "bed.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "x,y,dz");
    assert_eq!(lines.len(), 10);
}

#[test]
fn test_dev_against_reference() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);
    write_points(&tmp, "ref.txt", FLAT_REFERENCE);

    let output = planarity(&tmp)
        .args(["-f", "csv", "dev", "-d", "tilted.txt", "-r", "ref.txt", "-a"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // Against a level reference the deviations are the raw heights
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("1,0,1.000000"));
    assert!(stdout.contains("1,1,1.000000"));
}

#[test]
fn test_dev_text_table() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);

    planarity(&tmp)
        .args(["-f", "text", "dev", "-d", "tilted.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DZ"))
        .stdout(predicate::str::contains("RMS"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_parse_error_names_line() {
    let tmp = setup_workspace();
    write_points(&tmp, "broken.txt", "0 0 0\n1 0 oops\n0 1 0\n");

    planarity(&tmp)
        .args(["fit", "-d", "broken.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_missing_data_file() {
    let tmp = setup_workspace();

    planarity(&tmp)
        .args(["fit", "-d", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn test_too_few_points() {
    let tmp = setup_workspace();
    write_points(&tmp, "two.txt", "0 0 0\n1 1 1\n");

    planarity(&tmp)
        .args(["fit", "-d", "two.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least 3 points"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_shows_defaults() {
    let tmp = setup_workspace();

    planarity(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("precision: 3"))
        .stdout(predicate::str::contains("remove_z_offset: false"));
}

#[test]
fn test_config_path() {
    let tmp = setup_workspace();

    planarity(&tmp)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_precision_applies() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);
    std::fs::write(tmp.path().join("custom.yaml"), "precision: 2\n").unwrap();

    planarity(&tmp)
        .args(["--config", "custom.yaml", "fit", "-d", "tilted.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("       Tilt: +45.00°"));
}

#[test]
fn test_config_reference_applies() {
    let tmp = setup_workspace();
    write_points(&tmp, "tilted.txt", TILTED_45);
    write_points(&tmp, "short.txt", "0 0 0\n1 0 0\n");
    std::fs::write(tmp.path().join("custom.yaml"), "reference: short.txt\n").unwrap();

    // The configured reference is loaded, and it is too short to fit
    planarity(&tmp)
        .args(["--config", "custom.yaml", "fit", "-d", "tilted.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least 3 points"));
}

#[test]
fn test_config_flag_overrides_file() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);
    std::fs::write(tmp.path().join("custom.yaml"), "remove_z_offset: true\n").unwrap();

    planarity(&tmp)
        .args(["--config", "custom.yaml", "fit", "-d", "bed.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Z offsets removed"));

    planarity(&tmp)
        .args([
            "--config",
            "custom.yaml",
            "fit",
            "-d",
            "bed.txt",
            "--no-remove-z-offset",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Z offsets removed").not());
}

#[test]
fn test_config_unknown_key_rejected() {
    let tmp = setup_workspace();
    write_points(&tmp, "bed.txt", BED);
    std::fs::write(tmp.path().join("custom.yaml"), "bogus: 1\n").unwrap();

    planarity(&tmp)
        .args(["--config", "custom.yaml", "fit", "-d", "bed.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
}
