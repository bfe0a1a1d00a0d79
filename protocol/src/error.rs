use thiserror::Error;
use turnsweep_core::GameError;

/// Fatal protocol desynchronization, the reading side cannot recover from any of these.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Malformed coordinate line: {0:?}")]
    MalformedCoords(String),
    #[error("Row {row} should have {expected} cells: {line:?}")]
    MalformedRow {
        row: usize,
        expected: usize,
        line: String,
    },
    #[error("Unknown symbol {symbol:?} in row {row}")]
    UnknownSymbol { row: usize, symbol: char },
    #[error("Malformed action line: {0:?}")]
    MalformedAction(String),
    #[error("Invalid action kind {0}")]
    InvalidActionKind(i64),
    #[error("Malformed summary: {0:?}")]
    MalformedSummary(String),
    #[error("Agent has no move left on a board still in play")]
    Stalled,
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
