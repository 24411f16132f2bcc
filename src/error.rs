//! Crate-wide error type.
//!
//! Every fallible parsing boundary (FEN, UCI, SAN) and every illegal
//! state-stack operation reports through this single `thiserror`-derived
//! enum, carrying the offending input so callers can report a precise
//! diagnostic without re-deriving it.

use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PositionError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid UCI move `{0}`")]
    InvalidUci(String),

    #[error("illegal SAN move `{0}`")]
    IllegalSan(String),

    #[error("ambiguous SAN move `{0}`: matches more than one legal move")]
    AmbiguousSan(String),

    #[error("unparsable SAN move `{0}`")]
    InvalidSan(String),

    #[error("illegal move {uci} in current position")]
    IllegalMove { uci: String },

    #[error("cannot pop: move/state stack is empty")]
    EmptyStack,
}
