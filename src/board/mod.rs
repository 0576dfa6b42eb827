//! The live position: piece/colour bitboards, the mailbox, and the incrementally
//! maintained [`State`] (Zobrist keys, half-move clock, full-move number).
//!
//! Grounded on the teacher's `board/mod.rs` (a bitboard-backed `Board` with a mailbox
//! kept in lockstep and a `compute_zobrist_full` cross-check), generalised from the
//! 64-square/12-piece chess board to the 90-square/7-kind Xiangqi one, and with
//! castling rights, en-passant, and the repetition-count helpers dropped -- they are
//! non-goals here (see DESIGN.md).

pub mod fen;

use crate::bitboard::Bitboard;
use crate::error::InvalidFen;
use crate::hash::zobrist_keys;
use crate::moves::types::{Move, MoveFlag};
use crate::piece::{Colour, PieceKind, PIECE_KIND_COUNT};
use crate::square::{Square, SQUARE_COUNT};

/// Per-ply snapshot. Cheap to clone (plain `Copy` data); `unmake_move` restores it
/// wholesale rather than re-deriving it field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub key: u64,
    pub pawn_key: u64,
    pub non_pawn_keys: [u64; 2],
    pub moved: Option<PieceKind>,
    pub captured: Option<PieceKind>,
    pub half_move_clock: u32,
    pub full_move_number: u32,
}

impl Default for State {
    fn default() -> Self {
        State {
            key: 0,
            pawn_key: 0,
            non_pawn_keys: [0, 0],
            moved: None,
            captured: None,
            half_move_clock: 0,
            full_move_number: 1,
        }
    }
}

/// Construction-time configuration. The core has no I/O of its own -- a collaborator
/// that reads a config file or UCI `setoption` translates into this typed value before
/// handing it to [`Board::from_position_string_with_options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardOptions {
    /// Run the debug-only key/mailbox full-audit even in a release build.
    pub force_full_audit: bool,
}

/// The live position. Construct via [`Board::start_position`] or
/// [`Board::from_position_string`]; thereafter mutate only through
/// [`Board::make_move`]/[`Board::unmake_move`] (or the null-move pair).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) piece_bb: [Bitboard; PIECE_KIND_COUNT],
    pub(crate) colour_bb: [Bitboard; 2],
    pub(crate) mailbox: [Option<PieceKind>; SQUARE_COUNT as usize],
    pub(crate) side_to_move: Colour,
    pub(crate) state: State,
    pub(crate) history: Vec<(Move, State)>,
    pub(crate) ply: usize,
    pub(crate) options: BoardOptions,
}

impl Board {
    /// The standard Xiangqi starting position.
    pub const START_POSITION: &'static str =
        "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

    /// Construct the board from scratch, i.e. not through `make_move`. Used by the FEN
    /// parser; every field (bitboards, mailbox, all three Zobrist keys) is derived from
    /// the given placement.
    pub(crate) fn from_raw(
        piece_bb: [Bitboard; PIECE_KIND_COUNT],
        colour_bb: [Bitboard; 2],
        mailbox: [Option<PieceKind>; SQUARE_COUNT as usize],
        side_to_move: Colour,
        half_move_clock: u32,
        full_move_number: u32,
        options: BoardOptions,
    ) -> Board {
        let mut board = Board {
            piece_bb,
            colour_bb,
            mailbox,
            side_to_move,
            state: State { half_move_clock, full_move_number, ..State::default() },
            history: Vec::new(),
            ply: 0,
            options,
        };
        let (key, pawn_key, non_pawn_keys) = board.recompute_keys();
        board.state.key = key;
        board.state.pawn_key = pawn_key;
        board.state.non_pawn_keys = non_pawn_keys;
        board
    }

    /// Parse the standard start position. Never fails (the string is a compile-time
    /// constant); panics only if `Board::START_POSITION` itself is malformed, which
    /// would be a bug in this crate.
    pub fn start_position() -> Board {
        Board::from_position_string(Board::START_POSITION).expect("start position is well-formed")
    }

    pub fn from_position_string(s: &str) -> Result<Board, InvalidFen> {
        Board::from_position_string_with_options(s, BoardOptions::default())
    }

    pub fn from_position_string_with_options(
        s: &str,
        options: BoardOptions,
    ) -> Result<Board, InvalidFen> {
        fen::parse(s, options)
    }

    pub fn to_position_string(&self) -> String {
        fen::emit(self)
    }

    pub fn options(&self) -> BoardOptions {
        self.options
    }

    pub fn piece_at(&self, sq: Square) -> Option<PieceKind> {
        self.mailbox[sq.index() as usize]
    }

    pub fn colour_at(&self, sq: Square) -> Option<Colour> {
        if self.colour_bb[Colour::Red.index()].contains(sq) {
            Some(Colour::Red)
        } else if self.colour_bb[Colour::Black.index()].contains(sq) {
            Some(Colour::Black)
        } else {
            None
        }
    }

    pub fn pieces_of(&self, kind: PieceKind, colour: Colour) -> Bitboard {
        self.piece_bb[kind.index()].intersection(self.colour_bb[colour.index()])
    }

    pub fn occupancy(&self, colour: Colour) -> Bitboard {
        self.colour_bb[colour.index()]
    }

    pub fn all_occupancy(&self) -> Bitboard {
        self.colour_bb[Colour::Red.index()].union(self.colour_bb[Colour::Black.index()])
    }

    /// Panics if `colour` has no general on the board -- an invariant violation for any
    /// position reachable through this crate's parser and make/unmake.
    pub fn king_square(&self, colour: Colour) -> Square {
        self.pieces_of(PieceKind::General, colour).lowest_set_square()
    }

    pub fn is_capture(&self, m: Move) -> bool {
        m.flag() == MoveFlag::Capture
    }

    pub fn is_quiet(&self, m: Move) -> bool {
        m.flag() == MoveFlag::Quiet
    }

    /// Noisy == capture, since this position encoding has no promotions.
    pub fn is_noisy(&self, m: Move) -> bool {
        self.is_capture(m)
    }

    pub fn key(&self) -> u64 {
        self.state.key
    }

    pub fn pawn_key(&self) -> u64 {
        self.state.pawn_key
    }

    pub fn non_pawn_keys(&self) -> [u64; 2] {
        self.state.non_pawn_keys
    }

    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Duplicates bitboards, mailbox, current state, and the undo history (already
    /// truncated at the current ply, since nothing beyond it is ever stored) -- for a
    /// search collaborator that wants one `Board` per worker thread.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// From-scratch recompute of `(key, pawn_key, non_pawn_keys)`, used at construction
    /// and by the debug full-audit. Must always agree with the incrementally maintained
    /// `state` fields (§4.3, §7).
    pub(crate) fn recompute_keys(&self) -> (u64, u64, [u64; 2]) {
        let keys = zobrist_keys();
        let mut key = 0u64;
        let mut pawn_key = 0u64;
        let mut non_pawn_keys = [0u64; 2];

        for colour in [Colour::Red, Colour::Black] {
            for kind in PieceKind::ALL {
                for sq in self.pieces_of(kind, colour).iter() {
                    let k = keys.piece(sq.index(), colour, kind);
                    key ^= k;
                    if kind == PieceKind::Pawn {
                        pawn_key ^= k;
                    } else {
                        non_pawn_keys[colour.index()] ^= k;
                    }
                }
            }
        }
        if self.side_to_move == Colour::Red {
            key ^= keys.side_to_move;
        }
        (key, pawn_key, non_pawn_keys)
    }

    /// Runs the debug-only consistency audit (§7) when compiled in debug mode or when
    /// `options.force_full_audit` asks for it anyway. A no-op call in an optimised
    /// build with the flag unset, so release builds pay nothing for it.
    pub(crate) fn maybe_audit(&self) {
        if cfg!(debug_assertions) || self.options.force_full_audit {
            self.full_audit();
        }
    }

    fn full_audit(&self) {
        let (key, pawn_key, non_pawn_keys) = self.recompute_keys();
        assert_eq!(key, self.state.key, "zobrist key drifted from a from-scratch recompute");
        assert_eq!(pawn_key, self.state.pawn_key, "pawn key drifted from a from-scratch recompute");
        assert_eq!(
            non_pawn_keys, self.state.non_pawn_keys,
            "non-pawn keys drifted from a from-scratch recompute"
        );

        assert!(
            self.colour_bb[Colour::Red.index()]
                .intersection(self.colour_bb[Colour::Black.index()])
                .is_empty(),
            "red and black occupancy overlap"
        );

        for idx in 0..SQUARE_COUNT {
            let sq = Square::from_index(idx);
            let from_bitboards =
                PieceKind::ALL.into_iter().find(|&k| self.piece_bb[k.index()].contains(sq));
            assert_eq!(
                self.mailbox[idx as usize], from_bitboards,
                "mailbox/bitboard drift at {sq}"
            );
            if let Some(kind) = from_bitboards {
                let red = self.colour_bb[Colour::Red.index()].contains(sq);
                let black = self.colour_bb[Colour::Black.index()].contains(sq);
                assert!(red ^ black, "square {sq} ({kind:?}) claimed by zero or both colours");
            }
        }
    }
}
