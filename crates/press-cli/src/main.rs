use clap::Parser;

mod bootstrap;
mod cli;
mod clipboard;
mod commands;
mod config_warnings;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("press error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = bootstrap::load_config()?;
    config_warnings::warn_unconfigured(&config);

    match cli.command {
        cli::Commands::Clean(args) => commands::clean::handle(&args, &config, &flags),
        cli::Commands::Trends => commands::trends::handle(&config, &flags).await,
        cli::Commands::Ideas { action } => commands::ideas::handle(&action, &config, &flags).await,
        cli::Commands::Articles { action } => {
            commands::articles::handle(&action, &config, &flags).await
        }
        cli::Commands::Session => commands::session::handle(&config, &flags).await,
        cli::Commands::Schema(_) => unreachable!("schema is handled before config loading"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PRESS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
