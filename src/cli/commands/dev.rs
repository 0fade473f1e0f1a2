//! `planarity dev` command - per-point deviations from the fitted plane

use miette::{IntoDiagnostic, Result};

use crate::cli::args::InputArgs;
use crate::cli::commands::fit::run_workflow;
use crate::cli::output::{effective_format, render_rows, render_table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Deviations from the reference plane instead of the data plane
    /// (implies --use-reference)
    #[arg(long, short = 'a')]
    pub against_reference: bool,

    /// Decimal places in text output (default: config 'precision', 3)
    #[arg(long)]
    pub precision: Option<usize>,
}

pub fn run(args: DevArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load(global.config.as_deref())?;
    let mut options = args.input.fit_options(&config);
    options.use_reference_plane |= args.against_reference;

    let result = run_workflow(&args.input, &options, &config)?;
    let report = match (&result.relative, args.against_reference) {
        (Some(relative), true) => relative,
        _ => &result.residuals,
    };

    match effective_format(global.format, true) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(report).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => print!("{}", render_rows(report, ',')),
        OutputFormat::Tsv | OutputFormat::Auto => print!("{}", render_rows(report, '\t')),
        OutputFormat::Text => {
            let precision = args.precision.unwrap_or(config.precision);
            print!("{}", render_table(report, precision));
        }
    }

    Ok(())
}
