//! Terminal session over one game
//!
//! Reads commands line by line, applies them to a [`GameState`] and writes
//! the result. A rejected move or a typo is reported and the prompt comes
//! back; only an invariant violation inside the engine ends the session
//! with an error.
//!
//! ## Commands
//!
//! - `e2e4`, `e7e8n` - apply a coordinate move
//! - `moves e2` - list legal destinations of the piece on a square
//! - `undo` - take back the last move
//! - `board` - print the board
//! - `fen` - print the position as FEN
//! - `help` - list commands
//! - `quit` - leave

use std::io::{BufRead, Write};
use std::str::FromStr;

use rules_engine::{
    parse_square, Color, DrawReason, GameState, GameStatus, RulesError, Square,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

const PROMPT: &str = "> ";

const HELP: &str = "\
commands:
  <move>      coordinate move, e.g. e2e4 or e7e8n
  moves <sq>  legal destinations of the piece on <sq>
  undo        take back the last move
  board       print the board
  fen         print the position as FEN
  help        show this list
  quit        leave";

/// Errors that can end or interrupt a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("unknown command {0:?} (try `help`)")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// `true` for mistakes the user can correct at the prompt
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Rules(err) => err.is_recoverable(),
            SessionError::UnknownCommand(_) => true,
            SessionError::Io(_) | SessionError::Json(_) => false,
        }
    }
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(String),
    Moves(Square),
    Undo,
    Board,
    Fen,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = match (words.next(), words.next(), words.next()) {
            (Some("moves"), Some(square), None) => Command::Moves(parse_square(square)?),
            (Some("undo"), None, None) => Command::Undo,
            (Some("board"), None, None) => Command::Board,
            (Some("fen"), None, None) => Command::Fen,
            (Some("help"), None, None) => Command::Help,
            (Some("quit" | "exit"), None, None) => Command::Quit,
            (Some(mv), None, None) if looks_like_move(mv) => Command::Move(mv.to_string()),
            _ => return Err(SessionError::UnknownCommand(line.trim().to_string())),
        };
        Ok(command)
    }
}

/// Coordinate moves start with a file letter and a rank digit
fn looks_like_move(word: &str) -> bool {
    matches!(word.as_bytes(), [b'a'..=b'z', b'0'..=b'9', ..])
}

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Game summary printed after each move, one JSON object per line with `--json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    #[serde(rename = "move")]
    pub mv: Option<String>,
    pub status: GameStatus,
    pub side_to_move: Color,
    pub check: bool,
    pub winner: Option<Color>,
    pub draw: Option<DrawReason>,
    pub fen: String,
}

impl StatusReport {
    pub fn new(game: &GameState, mv: Option<String>) -> Self {
        StatusReport {
            mv,
            status: game.current_status(),
            side_to_move: game.side_to_move(),
            check: game.is_check(),
            winner: game.winner(),
            draw: game.draw_reason(),
            fen: game.to_fen(),
        }
    }

    fn to_text(&self) -> String {
        let mut line = match (&self.mv, self.winner) {
            (Some(mv), Some(winner)) => format!("{mv}: checkmate, {winner} wins"),
            (Some(mv), None) => format!("{mv}: {}, {} to move", self.status, self.side_to_move),
            (None, _) => format!("{}, {} to move", self.status, self.side_to_move),
        };
        if let Some(draw) = self.draw {
            line.push_str(&format!(" (draw available: {})", draw_text(draw)));
        }
        line
    }
}

fn draw_text(reason: DrawReason) -> &'static str {
    match reason {
        DrawReason::InsufficientMaterial => "insufficient material",
        DrawReason::FiftyMoveRule => "fifty-move rule",
        DrawReason::ThreefoldRepetition => "threefold repetition",
    }
}

/// A game plus where its output goes
pub struct Session<W: Write> {
    game: GameState,
    out: W,
    json: bool,
}

impl<W: Write> Session<W> {
    pub fn new(game: GameState, out: W, json: bool) -> Self {
        Session { game, out, json }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one command
    ///
    /// # Errors
    ///
    /// Whatever the engine rejected; the game is unchanged in that case.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        debug!(?command, "executing");
        match command {
            Command::Move(notation) => {
                self.game.apply_notation(&notation)?;
                let applied = self
                    .game
                    .move_history()
                    .last()
                    .map(|record| record.to_string());
                self.report(applied)?;
            }
            Command::Moves(square) => {
                let moves = self.game.legal_moves_for(square)?;
                let list = if moves.is_empty() {
                    "(none)".to_string()
                } else {
                    moves
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                writeln!(self.out, "{square}: {list}")?;
            }
            Command::Undo => match self.game.undo_move() {
                Some(record) => {
                    writeln!(self.out, "took back {}", record.mv)?;
                    self.report(None)?;
                }
                None => writeln!(self.out, "nothing to undo")?,
            },
            Command::Board => writeln!(self.out, "{}", self.game.board())?,
            Command::Fen => writeln!(self.out, "{}", self.game.to_fen())?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Interactive loop until `quit` or end of input
    ///
    /// # Errors
    ///
    /// I/O failures and engine invariant violations; everything else is
    /// printed and the prompt returns.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), SessionError> {
        if !self.json {
            writeln!(self.out, "{}", self.game.board())?;
            self.report(None)?;
        }

        let mut lines = input.lines();
        loop {
            if !self.json {
                write!(self.out, "{PROMPT}")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse().and_then(|command| self.execute(command)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(err) if err.is_recoverable() => writeln!(self.out, "error: {err}")?,
                Err(err) => {
                    error!(%err, "session aborted");
                    return Err(err);
                }
            }
        }
    }

    /// Apply a whitespace-separated move list, stopping at the first failure
    pub fn play_moves(&mut self, moves: &str) -> Result<(), SessionError> {
        for notation in moves.split_whitespace() {
            self.execute(Command::Move(notation.to_string()))?;
        }
        if !self.json {
            writeln!(self.out, "{}", self.game.board())?;
        }
        Ok(())
    }

    fn report(&mut self, mv: Option<String>) -> Result<(), SessionError> {
        let report = StatusReport::new(&self.game, mv);
        if self.json {
            serde_json::to_writer(&mut self.out, &report)?;
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{}", report.to_text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("e2e4".parse::<Command>().unwrap(), Command::Move("e2e4".into()));
        assert_eq!(
            "moves e2".parse::<Command>().unwrap(),
            Command::Moves(parse_square("e2").unwrap())
        );
        assert_eq!(" undo ".parse::<Command>().unwrap(), Command::Undo);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(SessionError::UnknownCommand(_))
        ));
        assert!(matches!(
            "moves z9".parse::<Command>(),
            Err(SessionError::Rules(RulesError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_run_reports_moves_and_errors() {
        let mut session = Session::new(GameState::new(), Vec::new(), false);
        session
            .run("e2e4\ne2e5\nmoves g8\ndance\nquit\ne7e5\n".as_bytes())
            .unwrap();

        assert_eq!(session.game().move_history().len(), 1, "stops at quit");
        let text = output(session);
        assert!(text.contains("e2e4: in progress, black to move"), "{text}");
        assert!(text.contains("error: Illegal move from e2 to e5"), "{text}");
        assert!(text.contains("g8: f6 h6"), "{text}");
        assert!(text.contains("unknown command \"dance\""), "{text}");
    }

    #[test]
    fn test_json_report_per_move() {
        let mut session = Session::new(GameState::new(), Vec::new(), true);
        session.play_moves("f2f3 e7e5 g2g4 d8h4").unwrap();

        let text = output(session);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);

        let last: serde_json::Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(last["move"], "d8h4#");
        assert_eq!(last["status"], "checkmate");
        assert_eq!(last["winner"], "black");
        assert_eq!(last["check"], true);
    }

    #[test]
    fn test_play_moves_stops_at_illegal_move() {
        let mut session = Session::new(GameState::new(), Vec::new(), false);
        let result = session.play_moves("e2e4 e2e4");
        assert!(matches!(
            result,
            Err(SessionError::Rules(RulesError::IllegalMove { .. }))
        ));
        assert_eq!(session.game().move_history().len(), 1);
    }

    #[test]
    fn test_undo_command() {
        let mut session = Session::new(GameState::new(), Vec::new(), false);
        session.run("e2e4\nundo\nundo\nfen\n".as_bytes()).unwrap();

        assert!(session.game().move_history().is_empty());
        let text = output(session);
        assert!(text.contains("took back e2e4"), "{text}");
        assert!(text.contains("nothing to undo"), "{text}");
        assert!(text.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    }
}
