//! Wisp - terminal front-end
//!
//! `wisp dump <input>` prints the fragments of one page.
//! `wisp shell` (the default) drives a full session from stdin.

mod command;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use wisp_core::{layout, Action, Browser, Config, Session, WebFetcher};

use crate::command::{ShellCommand, HELP};

/// Lines of page content printed per redraw
const PAGE_LINES: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "wisp", version, about = "Minimal text browsing shell")]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page and print its fragments
    Dump {
        /// Address bar input, or a query with --search
        input: String,
        /// Treat the input as a search query
        #[arg(long)]
        search: bool,
        /// Print fragments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session reading commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wisp_core::init_logging();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "Configuration resolved");

    match cli.command.unwrap_or(Command::Shell) {
        Command::Dump {
            input,
            search,
            json,
        } => dump(&config, &input, search, json).await,
        Command::Shell => shell(&config).await,
    }
}

async fn dump(config: &Config, input: &str, search: bool, json: bool) -> anyhow::Result<()> {
    let fetcher = WebFetcher::new(&config.fetch_options())?;
    let mut session = Session::new(config.load_start_page().await, config.resolver())?;

    if search {
        session.submit_search(input, &fetcher).await?;
    } else {
        session.navigate(input, &fetcher).await?;
    }

    let fragments = &session.current_tab().fragments;
    if json {
        println!("{}", serde_json::to_string_pretty(fragments)?);
    } else {
        for (i, fragment) in fragments.iter().enumerate() {
            println!("{}", render::render_fragment(i, fragment));
        }
    }

    Ok(())
}

async fn shell(config: &Config) -> anyhow::Result<()> {
    let browser = Browser::new(config).await?;
    let handle = browser.handle();
    let event_loop = tokio::spawn(browser.run());

    println!("{}", render::render(&handle.snapshot(), PAGE_LINES));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = ShellCommand::parse(&line) else {
            println!("unknown command, :help for a list");
            continue;
        };

        match command {
            ShellCommand::Action(kind) => handle.send(kind.into_action(config.scroll_step))?,
            ShellCommand::Submit(text) => {
                for c in text.chars() {
                    handle.send(Action::TextChar(c))?;
                }
                handle.send(Action::Submit)?;
            }
            ShellCommand::ClickAt { x, y } => {
                match layout::resolve_click(&handle.snapshot(), x, y) {
                    Some(action) => handle.send(action)?,
                    None => println!("nothing there"),
                }
            }
            ShellCommand::Show => {}
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => {
                tracing::debug!("Quit from shell");
                break;
            }
        }

        let snapshot = handle.settle().await?;
        println!("{}", render::render(&snapshot, PAGE_LINES));
    }

    handle.send(Action::Quit)?;
    event_loop.await.context("browser event loop panicked")?;

    Ok(())
}
