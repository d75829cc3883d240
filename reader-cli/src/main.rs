//! Story Reader - terminal front end
//!
//! Reads one command per line from stdin, feeds it to a `ReaderSession`,
//! and prints the resulting page.

mod commands;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use reader_engine::{EventOutcome, ReaderSession, SettingsManager};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use story_model::{sample, ContentStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about = "Read and edit a visual novel in the terminal")]
struct Cli {
    /// Story to open (JSON); the bundled demo story is used when omitted
    #[arg(long, value_name = "FILE")]
    story: Option<PathBuf>,

    /// Directory holding settings.json
    #[arg(long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut settings = SettingsManager::new(&cli.data_dir);
    let settings = settings
        .load()
        .with_context(|| format!("loading settings from {}", cli.data_dir.display()))?
        .clone();

    let store = match &cli.story {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ContentStore::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => sample::story(),
    };
    tracing::info!(story = ?cli.story, "Starting story reader");

    let mut session = ReaderSession::new(store, sample::characters(), settings);
    run(&mut session, std::io::stdin().lock(), std::io::stdout().lock())
}

fn run(session: &mut ReaderSession, input: impl BufRead, mut out: impl Write) -> Result<()> {
    write!(out, "{}", render::page(session))?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{}", commands::HELP)?,
            Ok(Command::ListBookmarks) => write!(out, "{}", render::bookmarks(session))?,
            Ok(Command::ListCharacters) => write!(out, "{}", render::characters(session))?,
            Ok(Command::Export) => writeln!(out, "{}", session.store().to_json()?)?,
            Ok(Command::Event(event)) => match session.dispatch(event) {
                EventOutcome::Applied => write!(out, "{}", render::page(session))?,
                EventOutcome::Ignored(reason) => writeln!(out, "(ignored: {reason:?})")?,
            },
            Err(e) => writeln!(out, "error: {e:#}")?,
        }
    }
    Ok(())
}
