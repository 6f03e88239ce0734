//! Terminal host for the chess rules engine
//!
//! - `cli` - command line flags
//! - `logging` - tracing subscriber setup
//! - `session` - the command loop over one `GameState`

pub mod cli;
pub mod logging;
pub mod session;

pub use cli::Cli;
pub use session::{Command, Flow, Session, SessionError, StatusReport};
