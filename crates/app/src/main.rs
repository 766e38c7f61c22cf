mod cli;
mod terminal;

use services::{AppServices, Clock, EngineConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, is_usage_error, prepare_sqlite_file, print_usage};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(
        std::env::args().skip(1),
        std::env::var("MATHSPRINT_DB_URL").ok(),
    )?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_tracing(args.verbose);

    let mut config = EngineConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let services = match &args.db_url {
        Some(db_url) => {
            prepare_sqlite_file(db_url)?;
            tracing::debug!(db_url = %db_url, "opening progress database");
            AppServices::new_sqlite(db_url, Clock::default(), config).await?
        }
        None => AppServices::in_memory(Clock::default(), config).await,
    };

    match args.command {
        Command::Play => terminal::play(&services, args.mode, args.topic).await,
        Command::Study => terminal::study(&services).await,
        Command::Stats => terminal::stats(&services).await,
        Command::Help => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        if is_usage_error(err.as_ref()) {
            print_usage();
        }
        std::process::exit(2);
    }
}
