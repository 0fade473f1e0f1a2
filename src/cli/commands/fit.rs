//! `planarity fit` command - fit the data plane and report how to level it

use console::style;
use miette::{IntoDiagnostic, Result};
use tracing::warn;

use crate::cli::args::{flag, InputArgs};
use crate::cli::helpers::{load_points, load_reference, stdin_has_data, STDIN_PATH};
use crate::cli::output::{effective_format, render_report, render_rows};
use crate::cli::viz;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::workflow::{self, FitOptions, WorkflowResult};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Plot the residual (diff) plane instead of the data plane
    #[arg(long, short = 'D')]
    pub show_diff_plane: bool,

    /// Overlay the reference plane on the plot
    #[arg(long, short = 'S')]
    pub show_ref_plane: bool,

    /// Render a terminal plot after the report
    #[arg(long, short = 'p', overrides_with = "no_plot")]
    pub plot: bool,

    /// Don't plot even if the config enables it
    #[arg(long)]
    pub no_plot: bool,

    /// Decimal places in the report (default: config 'precision', 3)
    #[arg(long)]
    pub precision: Option<usize>,
}

impl FitArgs {
    fn fit_options(&self, config: &Config) -> FitOptions {
        let mut options = self.input.fit_options(config);
        options.show_diff_plane |= self.show_diff_plane;
        options.show_ref_plane |= self.show_ref_plane;
        options
    }
}

/// Load both point sets and run the workflow
pub fn run_workflow(
    input: &InputArgs,
    options: &FitOptions,
    config: &Config,
) -> Result<WorkflowResult> {
    if input.data.as_os_str() == STDIN_PATH && !stdin_has_data() {
        warn!("Reading data points from the terminal, finish with Ctrl-D");
    }

    let reference_path = input.reference.as_deref().or(config.reference.as_deref());
    if input.data.as_os_str() == STDIN_PATH
        && reference_path.is_some_and(|p| p.as_os_str() == STDIN_PATH)
    {
        return Err(miette::miette!(
            code = "planarity::stdin",
            help = "Read one of the two point sets from a file",
            "Data and reference points cannot both come from stdin"
        ));
    }
    let reference = load_reference(reference_path)?;
    let data = load_points(&input.data)?;

    Ok(workflow::compute(&reference, &data, options)?)
}

pub fn run(args: FitArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref())?;
    let options = args.fit_options(&config);
    let result = run_workflow(&args.input, &options, &config)?;

    match effective_format(global.format, false) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&result).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => print!("{}", render_rows(&result.residuals, ',')),
        OutputFormat::Tsv => print!("{}", render_rows(&result.residuals, '\t')),
        OutputFormat::Text | OutputFormat::Auto => {
            let precision = args.precision.unwrap_or(config.precision);
            print_text(&result, precision, flag(args.plot, args.no_plot, config.plot));
        }
    }

    Ok(())
}

fn print_text(result: &WorkflowResult, precision: usize, plot: bool) {
    let mode = if result.options.use_reference_plane {
        "relative to reference plane"
    } else {
        "absolute"
    };
    println!(
        "{} Fitted {} point(s), {}",
        style("✓").green(),
        result.data.points.len(),
        style(mode).cyan()
    );
    if result.options.remove_z_offset {
        println!("  (Z offsets removed at first point)");
    }
    println!();
    print!("{}", render_report(result, precision));

    if plot {
        let (primary, overlay) = result.plot_targets();
        println!();
        println!("{} ({}):", style("Plot").bold(), result.plot);
        println!("{}", viz::render_plot(primary, overlay));
    }
}
