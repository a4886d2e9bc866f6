//! cep - classify work items, resolve evidence and extract records.

use cep_cli::commands;
use cep_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("CEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> cep_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.layout.root = root;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Classify(args) => commands::execute_classify(args, &config, &formatter),
        Command::Match(args) => commands::execute_match(args, &config, &formatter),
        Command::Resolve(args) => commands::execute_resolve(args, &config, &formatter),
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await,
        Command::PickImage(args) => commands::execute_pick_image(args, &config, &formatter),
        Command::Health(args) => commands::execute_health(args, &config, &formatter),
        Command::Plan(args) => commands::execute_plan(args, &config, &formatter).await,
    }
}
