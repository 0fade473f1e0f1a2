//! Error types for point parsing, plane fitting and configuration

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A non-comment line that does not hold exactly three numbers
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid point on line {line}: {message}")]
#[diagnostic(
    code(planarity::parse),
    help("Each point is one line of three whitespace-separated numbers: x y z (lines starting with '#' are comments)")
)]
pub struct ParseError {
    /// 1-based line number in the source text
    pub line: usize,

    /// What was wrong with the line
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,
}

/// Errors raised by the fitting operations
#[derive(Debug, Error, Diagnostic)]
pub enum FitError {
    #[error("At least 3 points are required to fit a plane, got {count}")]
    #[diagnostic(
        code(planarity::insufficient_data),
        help("Add more measurement points to the data or reference set")
    )]
    InsufficientData { count: usize },

    #[error("Invalid scale factor {value} for {axis} axis (must be finite and non-zero)")]
    #[diagnostic(code(planarity::scale))]
    InvalidScale { axis: char, value: f64 },
}

/// Failure to read a point source
#[derive(Debug, Error, Diagnostic)]
#[error("Failed to read points from {}", .path.display())]
#[diagnostic(code(planarity::io))]
pub struct InputError {
    pub path: PathBuf,

    #[source]
    pub source: std::io::Error,
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {}", .path.display())]
    #[diagnostic(code(planarity::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    #[diagnostic(
        code(planarity::config::yaml),
        help("Run 'planarity config' to see the accepted keys")
    )]
    Yaml { path: PathBuf, message: String },
}

/// Any error produced by the planarity library
#[derive(Debug, Error, Diagnostic)]
pub enum PlanarityError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
