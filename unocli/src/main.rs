mod commands;
mod render;

use std::{env::var, sync::Arc};

use color_eyre::Result;
use commands::{Command, Line};
use render::{BellAudio, TerminalPresenter};
use runo::{config::Config, uno::Uno};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const BELL_VAR: &str = "RUNO_BELL";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(?config, "starting");
    let bell = var(BELL_VAR).map_or(false, |value| value == "1");

    let uno = Uno::new(
        config,
        Arc::new(TerminalPresenter),
        Box::new(BellAudio::new(bell)),
    );
    let (_game_logic, handle) = uno.spawn()?;

    println!("Commands:\n{}", Command::help());

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match line.parse::<Line>() {
            Ok(Line::Event(event)) => event,
            Ok(Line::Help) => {
                println!("{}", Command::help());
                continue;
            }
            Ok(Line::Quit) => break,
            Err(error) => {
                println!("! {error}");
                continue;
            }
        };

        let handle = handle.clone();
        // Refusals are already shown by the presenter.
        if let Err(error) = tokio::task::spawn_blocking(move || handle.handle(event)).await? {
            debug!(%error, "input refused");
        }
    }

    // The game-logic thread never finishes on its own, so leave without joining it.
    Ok(())
}
