use clap::Parser;
use miette::Result;
use planarity::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    planarity::cli::init_logging(cli.global.verbose, cli.global.quiet);

    match cli.command {
        Commands::Fit(args) => planarity::cli::commands::fit::run(args, &cli.global),
        Commands::Dev(args) => planarity::cli::commands::dev::run(args, &cli.global),
        Commands::Config(args) => planarity::cli::commands::config::run(args, &cli.global),
    }
}
