//! `planarity config` command - show the effective configuration

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Only print the configuration file path
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, global: &GlobalOpts) -> Result<()> {
    let path = global.config.clone().or_else(Config::default_path);

    if args.path {
        match &path {
            Some(p) => println!("{}", p.display()),
            None => return Err(miette::miette!("No config directory available on this system")),
        }
        return Ok(());
    }

    let config = Config::load(global.config.as_deref())?;

    if global.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&config).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    if matches!(global.format, OutputFormat::Auto | OutputFormat::Text) {
        let location = match &path {
            Some(p) if p.is_file() => p.display().to_string(),
            Some(p) => format!("{} (not present, using defaults)", p.display()),
            None => "(none)".to_string(),
        };
        println!("# {} {}", style("config:").bold(), location);
    }
    let yaml = serde_yml::to_string(&config).into_diagnostic()?;
    print!("{}", yaml);
    Ok(())
}
