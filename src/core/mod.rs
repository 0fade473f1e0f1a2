//! Core module - point sets, plane fitting and deviation analysis

pub mod config;
pub mod deviation;
pub mod error;
pub mod fit;
pub mod orientation;
pub mod points;
pub mod workflow;

pub use config::Config;
pub use deviation::{deviations, Deviation, DeviationReport, DeviationStats};
pub use error::{ConfigError, FitError, InputError, ParseError, PlanarityError};
pub use fit::{fit_plane, FitResult, Plane, PlaneFitter, Span};
pub use orientation::{decompose, Orientation};
pub use points::{Point3D, PointSet, DEFAULT_REFERENCE};
pub use workflow::{compute, FitOptions, PlotSelection, WorkflowResult};
