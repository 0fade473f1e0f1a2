//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::cli::commands::config::ConfigArgs;
use crate::cli::commands::dev::DevArgs;
use crate::cli::commands::fit::FitArgs;
use crate::core::{Config, FitOptions};

/// Planarity - fit a plane to measured points and report how to level it
#[derive(Parser, Debug)]
#[command(name = "planarity", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Configuration file (default: config.yaml in the user config directory)
    #[arg(long, global = true, env = "PLANARITY_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the data plane and report rotation, orientation and deviation
    Fit(FitArgs),

    /// List every data point's deviation from the fitted plane
    Dev(DevArgs),

    /// Show the configuration file location and effective values
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Text for reports, TSV for point lists
    Auto,
    /// Human-readable report
    Text,
    Json,
    Yaml,
    Csv,
    Tsv,
}

/// Point sources and fitting options shared by `fit` and `dev`
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Data points file (x y z per line, '-' for stdin)
    #[arg(long, short = 'd')]
    pub data: PathBuf,

    /// Reference points file (default: config 'reference', else the XY plane)
    #[arg(long, short = 'r')]
    pub reference: Option<PathBuf>,

    /// Zero each point set at its first point before fitting
    #[arg(long, short = 'z', overrides_with = "no_remove_z_offset")]
    pub remove_z_offset: bool,

    /// Keep the measured Z values even if the config removes offsets
    #[arg(long)]
    pub no_remove_z_offset: bool,

    /// Fit the data relative to the reference plane
    #[arg(long, short = 'R', overrides_with = "no_use_reference")]
    pub use_reference: bool,

    /// Fit the data directly even if the config uses the reference plane
    #[arg(long)]
    pub no_use_reference: bool,

    /// Per-axis scale factors applied to both point sets, e.g. 25.4,25.4,25.4
    #[arg(long, value_parser = parse_scale, value_name = "X,Y,Z")]
    pub scale: Option<[f64; 3]>,
}

impl InputArgs {
    /// Merge these flags over the configured options
    pub fn fit_options(&self, config: &Config) -> FitOptions {
        let mut options = config.fit_options();
        options.remove_z_offset = flag(
            self.remove_z_offset,
            self.no_remove_z_offset,
            options.remove_z_offset,
        );
        options.use_reference_plane = flag(
            self.use_reference,
            self.no_use_reference,
            options.use_reference_plane,
        );
        if let Some(scale) = self.scale {
            options.scale = scale;
        }
        options
    }
}

/// Parse `X,Y,Z` scale factors
fn parse_scale(s: &str) -> Result<[f64; 3], String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|_| format!("'{}' is not a number", v)))
        .collect::<Result<Vec<_>, _>>()?;
    match values[..] {
        [x, y, z] => Ok([x, y, z]),
        _ => Err(format!("expected 3 comma-separated values, got {}", values.len())),
    }
}

/// Resolve an on/off flag pair against a default
pub fn flag(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}
