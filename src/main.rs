use clap::Parser;
use tracing_subscriber::EnvFilter;

use align_probe::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("align_probe=debug,info")
    } else {
        EnvFilter::new("align_probe=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Header(args) => cli::header::run(args, cli.format, cli.verbose)?,
        cli::Commands::Identify(args) => cli::identify::run(args, cli.format, cli.verbose)?,
        cli::Commands::Stats(args) => cli::stats::run(args, cli.format, cli.verbose)?,
        cli::Commands::Nruns(args) => cli::nruns::run(args, cli.format, cli.verbose)?,
        cli::Commands::Names(args) => cli::names::run(args, cli.format)?,
        cli::Commands::Catalog(args) => cli::catalog::run(args, cli.format, cli.verbose)?,
    }

    Ok(())
}
