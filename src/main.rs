use clap::Parser;
use pokemon_catalog::logging::init_tracing;
use pokemon_catalog::mcp_interface::{handle_command, help_text, refresh_results};
use pokemon_catalog::{CatalogConfig, CatalogSession, FilterSelection, PokeApiClient};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Browse the Pokemon catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "pokemon-catalog", version)]
struct Args {
    /// RON configuration file
    #[arg(long, env = "POKEMON_CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Number of catalog entries to load
    #[arg(long)]
    limit: Option<usize>,

    /// Entries shown per batch
    #[arg(long)]
    batch_size: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing("warn");
    let args = Args::parse();

    let mut config = match CatalogConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(limit) = args.limit {
        config.catalog_limit = limit;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let client = match PokeApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Loading the Pokedex...");
    let session = match CatalogSession::initialize(Arc::new(client), &config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Check your connection and try again.");
            return ExitCode::FAILURE;
        }
    };

    println!("Loaded {} Pokemon.\n", session.catalog().len());
    println!("{}\n", help_text());

    let mut selection = FilterSelection::cleared();
    print!("{}", refresh_results(&session, &selection).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        if let Err(e) = std::io::stdout().flush() {
            eprintln!("Error writing prompt: {}", e);
        }
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_command(&session, &mut selection, &line).await;
        println!("{}", response.text.trim_end());
        if response.quit {
            break;
        }
    }

    ExitCode::SUCCESS
}
