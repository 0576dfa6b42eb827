//! Zobrist key tables for incremental position hashing.
//!
//! Grounded on the teacher's `hash/zobrist.rs` (a `OnceCell`-published, `StdRng`-seeded
//! table), generalised from the 12-piece/64-square chess table to the 7-kind/90-square
//! Xiangqi one and stripped of the castling/en-passant contributions this crate has no
//! use for (§4.3 of the spec).

use once_cell::sync::OnceCell;
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::piece::{Colour, PieceKind, PIECE_KIND_COUNT};
use crate::square::SQUARE_COUNT;

/// Fixed seed for the Zobrist random table, chosen so that keys are reproducible
/// across processes (Testable Property 6 requires `parse(p1).key() == parse(p2).key()`
/// for any two strings naming the same position).
pub const ZOBRIST_SEED: u64 = 18_061_995;

/// `piece_sq[square][colour][kind]` plus the single side-to-move key.
pub struct ZobristKeys {
    piece_sq: [[[u64; PIECE_KIND_COUNT]; 2]; SQUARE_COUNT as usize],
    pub side_to_move: u64,
}

impl ZobristKeys {
    #[inline]
    pub fn piece(&self, square_index: u8, colour: Colour, kind: PieceKind) -> u64 {
        self.piece_sq[square_index as usize][colour.index()][kind.index()]
    }
}

fn generate(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(rng: &mut StdRng) -> u64 {
        loop {
            let v = rng.next_u64();
            if v != 0 {
                return v;
            }
        }
    }

    let mut piece_sq = [[[0u64; PIECE_KIND_COUNT]; 2]; SQUARE_COUNT as usize];
    for sq in piece_sq.iter_mut() {
        for colour in sq.iter_mut() {
            for key in colour.iter_mut() {
                *key = non_zero(&mut rng);
            }
        }
    }

    ZobristKeys { piece_sq, side_to_move: non_zero(&mut rng) }
}

/// The process-wide Zobrist table, built once from the fixed seed on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| {
        tracing::debug!(seed = ZOBRIST_SEED, "initialising zobrist key table");
        generate(StdRng::seed_from_u64(ZOBRIST_SEED))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_calls() {
        let a = zobrist_keys();
        let b = zobrist_keys();
        assert_eq!(
            a.piece(0, Colour::Red, PieceKind::Rook),
            b.piece(0, Colour::Red, PieceKind::Rook)
        );
    }

    #[test]
    fn distinct_square_colour_kind_triples_get_distinct_keys() {
        let keys = zobrist_keys();
        let a = keys.piece(0, Colour::Red, PieceKind::Rook);
        let b = keys.piece(0, Colour::Black, PieceKind::Rook);
        let c = keys.piece(1, Colour::Red, PieceKind::Rook);
        let d = keys.piece(0, Colour::Red, PieceKind::Horse);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn no_zero_keys() {
        let keys = zobrist_keys();
        for sq in 0..SQUARE_COUNT {
            for &colour in &[Colour::Red, Colour::Black] {
                for kind in PieceKind::ALL {
                    assert_ne!(keys.piece(sq, colour, kind), 0);
                }
            }
        }
        assert_ne!(keys.side_to_move, 0);
    }
}
