//! Shared helper functions for CLI commands
//!
//! Loading point sources and formatting numbers the way every report
//! prints them.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use tracing::debug;

use crate::core::error::{InputError, PlanarityError};
use crate::core::points::{PointSet, DEFAULT_REFERENCE};

/// Path that selects stdin as a point source
pub const STDIN_PATH: &str = "-";

/// Read a whole point source into memory
///
/// `-` reads stdin. The text is read completely before anything is parsed,
/// so a failed read never yields a partial point set.
pub fn read_source(path: &Path) -> Result<String, InputError> {
    let result = if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        io::stdin().lock().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };

    result.map_err(|source| InputError {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a point source
pub fn load_points(path: &Path) -> Result<PointSet, PlanarityError> {
    let text = read_source(path)?;
    let name = if path.as_os_str() == STDIN_PATH {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    };
    let points = PointSet::parse_named(&text, &name)?;
    debug!(source = %name, points = points.len(), "Loaded points");
    Ok(points)
}

/// Reference points from `path`, or the default reference plane
pub fn load_reference(path: Option<&Path>) -> Result<PointSet, PlanarityError> {
    match path {
        Some(path) => load_points(path),
        None => Ok(PointSet::parse_named(DEFAULT_REFERENCE, "<default reference>")?),
    }
}

/// Check if stdin has piped input available
pub fn stdin_has_data() -> bool {
    !io::stdin().is_terminal()
}

/// Format a value with an explicit sign, e.g. `+0.250` / `-1.000`
pub fn signed(value: f64, precision: usize) -> String {
    // Avoid printing "-0.000"
    let rounded = format!("{:+.*}", precision, value);
    if rounded.starts_with('-') && rounded[1..].chars().all(|c| c == '0' || c == '.') {
        format!("+{}", &rounded[1..])
    } else {
        rounded
    }
}
