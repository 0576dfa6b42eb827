//! Structured error types returned at the core's external boundaries.
//!
//! Grounded on the lineage's `thiserror`-based error enums (see
//! `trilltino-XFChess`'s `error.rs` in the retrieval pack) rather than the plain
//! `String`/`bool` returns this crate's own teacher used -- the specification calls
//! for structured `InvalidFen`/`IllegalMove` values, not strings.

use thiserror::Error;

use crate::square::Square;

/// Why a position string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenErrorKind {
    #[error("expected 6 space-separated fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("expected 10 '/'-separated rank groups, found {found}")]
    WrongRankCount { found: usize },
    #[error("rank {rank} sums to {sum} squares, expected 9")]
    RankWrongLength { rank: usize, sum: usize },
    #[error("rank {rank} has two adjacent digits; they must be merged into one run")]
    AdjacentDigits { rank: usize },
    #[error("unrecognised piece letter '{0}'")]
    UnknownPieceChar(char),
    #[error("expected exactly one Red general (K), found {found}")]
    WrongRedGeneralCount { found: usize },
    #[error("expected exactly one Black general (k), found {found}")]
    WrongBlackGeneralCount { found: usize },
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    BadSideToMove(String),
    #[error("halfmove clock is not a non-negative integer: '{0}'")]
    BadHalfmoveClock(String),
    #[error("fullmove number is not a non-negative integer: '{0}'")]
    BadFullmoveNumber(String),
}

/// A position string failed to parse into a `Board`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid position string ({reason}): \"{source_string}\"")]
pub struct InvalidFen {
    pub reason: FenErrorKind,
    pub source_string: String,
}

/// `Board::make_move` was asked to play a move that cannot be applied as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no piece at origin square {0}")]
    NoPieceAtOrigin(Square),
}
