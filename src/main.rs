use clap::Parser;
use liquidity_monitor::cli::{Cli, Commands, RunArgs};
use liquidity_monitor::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    liquidity_monitor::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            tracing::info!("Starting daily liquidity check");
            args.execute(config).await?;
        }
        Commands::Check(args) => {
            tracing::info!("Starting dry-run check");
            args.execute(config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
