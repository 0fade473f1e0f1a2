//! Planarity: best-fit planes for leveling
//!
//! Fits a plane to measured 3D points by orthogonal regression and reports
//! how far, and in which direction, it is tilted, together with how much the
//! points deviate from it. A reference surface can be fitted first so that
//! only the tilt relative to it is reported.
//!
//! ```
//! use planarity::core::{compute, FitOptions, PointSet, DEFAULT_REFERENCE};
//!
//! let reference = PointSet::parse(DEFAULT_REFERENCE).unwrap();
//! let data = PointSet::parse("0 0 0\n1 0 1\n0 1 0\n1 1 1\n").unwrap();
//! let result = compute(&reference, &data, &FitOptions::default()).unwrap();
//! assert!((result.data.orientation.tilt - 45.0).abs() < 1e-6);
//! ```

pub mod cli;
pub mod core;
