//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use planarity::core::{Point3D, PointSet};
use tempfile::TempDir;

/// A level reference surface
pub const FLAT_REFERENCE: &str = "0 0 0\n1 0 0\n1 1 0\n";

/// Plane tilted 45° about the Y axis (z = x)
pub const TILTED_45: &str = "0 0 0\n1 0 1\n0 1 0\n1 1 1\n";

/// A 100 mm bed sloping 0.1 mm along X and -0.05 mm along Y, centre 0.02 high
pub const BED: &str = "\
# bed probe, 3x3 grid
0   0   10.000
50  0   10.050
100 0   10.100
0   50  9.975
50  50  10.045
100 50  10.075
0   100 9.950
50  100 10.000
100 100 10.050
";

/// Helper to get a planarity command isolated from any user config
pub fn planarity(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("planarity"));
    cmd.current_dir(tmp.path())
        .env("PLANARITY_CONFIG", tmp.path().join("config.yaml"))
        .env_remove("PLANARITY_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temp directory with an empty config file
pub fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.yaml"), "").unwrap();
    tmp
}

/// Helper to write a points file into the workspace
pub fn write_points(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Build a point set from coordinate triples
pub fn points(coords: &[[f64; 3]]) -> PointSet {
    coords.iter().copied().map(Point3D::from).collect()
}

/// Points sampled on z = a·x + b·y + c over a grid
pub fn plane_grid(a: f64, b: f64, c: f64, n: usize, step: f64) -> PointSet {
    let mut out = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let x = i as f64 * step;
            let y = j as f64 * step;
            out.push(Point3D::new(x, y, a * x + b * y + c));
        }
    }
    PointSet::new(out)
}
