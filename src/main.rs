use std::io;

use anyhow::{Context, Result};
use chess_rules::{logging, Cli, Session};
use clap::Parser;
use rules_engine::GameState;
use tracing::info;

fn main() -> Result<()> {
    // .env before parsing so CHESS_RULES_FEN and RUST_LOG can come from it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    let game = match &cli.fen {
        Some(fen) => GameState::from_fen(fen).context("failed to load start position")?,
        None => GameState::new(),
    };
    info!(fen = %game.to_fen(), json = cli.json, "starting session");

    let mut session = Session::new(game, io::stdout().lock(), cli.json);
    match &cli.moves {
        Some(moves) => session.play_moves(moves)?,
        None => session.run(io::stdin().lock())?,
    }

    Ok(())
}
