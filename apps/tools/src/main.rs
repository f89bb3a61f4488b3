use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::load_settings;
use shared::format;
use storage::ResponseStore;
use tracing_subscriber::EnvFilter;

/// Operator access to the persisted invitation answer.
#[derive(Parser, Debug)]
struct Cli {
    /// Directory holding the response record; defaults to the configured one.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored answer in readable form.
    Show,
    /// Print the raw persisted record.
    Export,
    /// Delete the stored answer.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Print where the record lives.
    Path,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => load_settings()
            .resolve_data_dir()
            .context("cannot determine the data directory; pass --data-dir")?,
    };
    let store = ResponseStore::open(&data_dir);

    match cli.command {
        Command::Show => match store.load() {
            Some(response) => {
                println!("answer:  {}", format::admin_label(response.answer()));
                println!("date:    {}", format::format_es_local(response.timestamp()));
                println!("message: {}", response.message());
            }
            None => println!("no answer recorded"),
        },
        Command::Export => match store.raw_payload() {
            Some(payload) => println!("{payload}"),
            None => anyhow::bail!("no record at {}", store.path().display()),
        },
        Command::Clear { yes } => {
            if !yes && !confirm(&format!("delete {}?", store.path().display()))? {
                println!("aborted");
                return Ok(());
            }
            store
                .clear()
                .with_context(|| format!("clearing {}", store.path().display()))?;
            println!("cleared");
        }
        Command::Path => println!("{}", store.path().display()),
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "s" | "si" | "sí"))
}
