//! The seven Xiangqi piece kinds and the two colours.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

pub const PIECE_KIND_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Horse = 1,
    Elephant = 2,
    Rook = 3,
    Advisor = 4,
    General = 5,
    Cannon = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::Pawn,
        PieceKind::Horse,
        PieceKind::Elephant,
        PieceKind::Rook,
        PieceKind::Advisor,
        PieceKind::General,
        PieceKind::Cannon,
    ];

    #[inline]
    pub const fn from_u8(v: u8) -> Self {
        match v {
            0 => PieceKind::Pawn,
            1 => PieceKind::Horse,
            2 => PieceKind::Elephant,
            3 => PieceKind::Rook,
            4 => PieceKind::Advisor,
            5 => PieceKind::General,
            6 => PieceKind::Cannon,
            _ => panic!("invalid piece kind index"),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Glyph used in position notation, lowercase (Black). Uppercase for Red is the
    /// ASCII-uppercased form of this.
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Horse => 'n',
            PieceKind::Elephant => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Advisor => 'a',
            PieceKind::General => 'k',
            PieceKind::Cannon => 'c',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Colour {
    Red = 0,
    Black = 1,
}

impl Colour {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_u8(v: u8) -> Self {
        match v {
            0 => Colour::Red,
            1 => Colour::Black,
            _ => panic!("invalid colour index"),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Colour {
        match self {
            Colour::Red => Colour::Black,
            Colour::Black => Colour::Red,
        }
    }
}

impl Not for Colour {
    type Output = Colour;

    #[inline]
    fn not(self) -> Colour {
        self.opposite()
    }
}
