mod cli;
mod client;
mod commands;
mod config;
mod error;
mod form;
mod list;
mod output;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::EmployeeClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Quiet unless asked: failures already surface as the `Error:` line.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,ems=debug"
    } else {
        "error"
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ems", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that talk to the employee service
        command => {
            let config = Config::load()?;
            let base = config.api_url(cli.api_url.as_deref())?;
            tracing::debug!(url = %base, "using employee service");
            let client = EmployeeClient::new(base);

            match command {
                Commands::List => {
                    commands::employees::list(&client).await?;
                }
                Commands::Show { id } => {
                    commands::employees::show(&client, id).await?;
                }
                Commands::Add(args) => {
                    commands::employees::add(&client, args).await?;
                }
                Commands::Update(args) => {
                    commands::employees::update(&client, args).await?;
                }
                Commands::Delete { id, yes } => {
                    commands::employees::delete(&client, id, yes).await?;
                }
                Commands::Open { route } => {
                    commands::employees::open(&client, route).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
