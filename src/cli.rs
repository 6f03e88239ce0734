//! Command line flags
//!
//! Every flag can also come from the environment (`.env` included, see
//! `main`), so a start position can be pinned without retyping it.

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about = "Play chess in the terminal under full rules enforcement", long_about = None)]
pub struct Cli {
    /// Start position as a FEN record (default: the standard position)
    #[arg(long, env = "CHESS_RULES_FEN", value_name = "FEN")]
    pub fen: Option<String>,

    /// Print one JSON status object per applied move instead of text
    #[arg(long)]
    pub json: bool,

    /// Apply a whitespace-separated list of coordinate moves and exit
    #[arg(long, value_name = "MOVES")]
    pub moves: Option<String>,

    /// Log filter such as `debug` or `rules_engine=trace`; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}
