//! YaTV query tool.
//!
//! Runs one of fifteen numbered commands against the YaTV streaming
//! database: five that write (register, subscribe, add to list, update a
//! version, add an episode) and ten read-only reports. Parameters are asked
//! for interactively.
//!
//! # Security Guarantees
//! - Passwords are hashed before they reach the database and never logged
//! - Database URLs are redacted in logs and error messages
//! - All values are bound as statement parameters

use anyhow::Context;
use clap::{Args, Parser};
use tracing::{debug, error, info};
use yatv_core::{
    Command, Console, DEFAULT_DATABASE_URL, ExecutionContext, connect_store, init_logging,
    redact_database_url, run_command, usage_text,
};

/// Program name shown in the usage text
const PROGRAM: &str = "yatv";

#[derive(Parser)]
#[command(name = "yatv")]
#[command(about = "YaTV streaming database query tool")]
#[command(version)]
#[command(long_about = "
YaTV - Interactive queries against the YaTV streaming database

Pick a command by number; its parameters are prompted for on standard input.

COMMANDS:
   1-5   register a user, subscribe, add to My List, update a version,
         add the latest episode of a show
   6-10  base reports
  11-15  REPORT 1-5

Run without a query number to list every command.

EXAMPLES:
  yatv 6
  yatv --database-url mysql://root@db.internal:3306/Project 11
  yatv --test-connection
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Query number (1-15)
    #[arg(value_name = "QUERY_NUMBER", allow_negative_numbers = true)]
    selector: Option<String>,

    /// Reserved; accepted and ignored
    #[arg(value_name = "PARAMETERS", allow_negative_numbers = true)]
    parameters: Vec<String>,

    /// Database connection URL
    #[arg(
        long,
        default_value = DEFAULT_DATABASE_URL,
        help = "Database connection string (mysql:// or sqlite:; credentials are redacted in logs)"
    )]
    database_url: String,

    /// Only check that the database is reachable
    #[arg(long, help = "Check the database connection and exit")]
    test_connection: bool,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all log output except errors")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    if cli.test_connection {
        check_connection(&cli.database_url).await;
        return Ok(());
    }

    let Some(command) = cli.selector.as_deref().and_then(Command::parse_selector) else {
        print!("{}", usage_text(PROGRAM));
        return Ok(());
    };

    if !cli.parameters.is_empty() {
        debug!("Ignoring {} extra parameter(s)", cli.parameters.len());
    }

    if let Err(e) = run(command, &cli.database_url).await {
        error!("{e:#}");
        println!("{e:#}");
    }

    Ok(())
}

/// Connects, runs one command, and closes the store on every path.
async fn run(command: Command, database_url: &str) -> anyhow::Result<()> {
    info!("Target: {}", redact_database_url(database_url));
    let store = connect_store(database_url).await?;
    info!("Connected to {} store", store.kind());

    let mut console = Console::stdio();
    let ctx = ExecutionContext::now();
    let result = run_command(command, store.as_ref(), &mut console, &ctx)
        .await
        .with_context(|| format!("{command} failed"));

    store.close().await;
    result
}

/// Prints whether the database can be reached.
async fn check_connection(database_url: &str) {
    info!("Testing database connection...");

    let result = async {
        let store = connect_store(database_url).await?;
        let outcome = store.test_connection().await;
        store.close().await;
        outcome
    }
    .await;

    match result {
        Ok(()) => {
            info!("Connection test successful");
            println!("Database is connected !");
        }
        Err(e) => {
            error!("Connection test failed: {}", e);
            println!("Do not connect to DB - Error:{e}");
        }
    }
}
