//! Make/unmake (§4.4): the only way a [`Board`] is mutated once constructed.
//!
//! Grounded on the teacher's `make_move_basic`/`undo_move_basic` pair -- push the
//! pre-move `State` onto a history stack, mutate bitboards/mailbox/Zobrist keys in
//! place, flip the side to move -- generalised to a board with no castling rights or
//! en-passant square to track, and with the full state snapshot (rather than a
//! hand-picked subset of fields) pushed each ply so unmake is a single restore instead
//! of a field-by-field reversal.

use crate::board::{Board, State};
use crate::error::IllegalMove;
use crate::hash::zobrist_keys;
use crate::moves::types::{Move, MoveFlag};
use crate::piece::{Colour, PieceKind};
use crate::square::Square;

/// Applies `m` to `board`. Fails if there is no piece at `m.from()`; does not itself
/// verify legality (cannon geometry, flying generals, pseudo-legality) -- callers that
/// need that should generate with [`crate::moves::types::GenFilter::Legal`] or check
/// [`crate::moves::square_control::is_attacked`] after the fact.
pub fn make_move(board: &mut Board, m: Move) -> Result<(), IllegalMove> {
    let from = m.from();
    let to = m.to();
    let Some(moved_kind) = board.mailbox[from.index() as usize] else {
        return Err(IllegalMove::NoPieceAtOrigin(from));
    };
    let mover = board.side_to_move;
    let keys = zobrist_keys();

    let prev_state = board.state;
    board.history.push((m, prev_state));

    let captured_kind = board.mailbox[to.index() as usize];
    debug_assert_eq!(
        captured_kind.is_some(),
        m.flag() == MoveFlag::Capture,
        "move's capture flag disagrees with the destination square's occupant"
    );

    if let Some(captured) = captured_kind {
        let captured_colour = mover.opposite();
        remove_piece(board, captured_colour, captured, to);
        xor_piece_key(board, keys, to, captured_colour, captured);
    }

    remove_piece(board, mover, moved_kind, from);
    xor_piece_key(board, keys, from, mover, moved_kind);
    place_piece(board, mover, moved_kind, to);
    xor_piece_key(board, keys, to, mover, moved_kind);

    let half_move_clock = if captured_kind.is_some() || moved_kind == PieceKind::Pawn {
        0
    } else {
        prev_state.half_move_clock + 1
    };
    let full_move_number = if mover == Colour::Black {
        prev_state.full_move_number + 1
    } else {
        prev_state.full_move_number
    };

    board.state.key ^= keys.side_to_move;
    board.state.moved = Some(moved_kind);
    board.state.captured = captured_kind;
    board.state.half_move_clock = half_move_clock;
    board.state.full_move_number = full_move_number;

    board.side_to_move = mover.opposite();
    board.ply += 1;

    board.maybe_audit();
    Ok(())
}

/// Reverts the most recent [`make_move`]. Panics if called on a board with empty
/// history -- a caller bug, not a data-dependent error.
pub fn unmake_move(board: &mut Board) {
    let (m, prev_state) = board.history.pop().expect("unmake_move called with empty history");
    let mover = prev_state.moved.is_some();
    debug_assert!(mover, "pushed state always records the piece that moved");

    let now_to_move = board.side_to_move;
    let mover_colour = now_to_move.opposite();

    let from = m.from();
    let to = m.to();
    let moved_kind = prev_state.moved.expect("unmake_move: missing moved piece kind");

    remove_piece(board, mover_colour, moved_kind, to);
    place_piece(board, mover_colour, moved_kind, from);

    if let Some(captured) = prev_state.captured {
        place_piece(board, mover_colour.opposite(), captured, to);
    }

    board.side_to_move = mover_colour;
    board.state = prev_state;
    board.ply -= 1;

    board.maybe_audit();
}

/// A pass: flips the side to move without moving a piece. Used by search collaborators
/// for null-move pruning, never produced by [`crate::moves::movegen::generate`].
pub fn make_null_move(board: &mut Board) {
    let keys = zobrist_keys();
    board.history.push((Move::new(Square::from_index(0), Square::from_index(0), MoveFlag::Quiet), board.state));
    board.state.key ^= keys.side_to_move;
    board.state.moved = None;
    board.state.captured = None;
    board.side_to_move = board.side_to_move.opposite();
    board.ply += 1;
    board.maybe_audit();
}

pub fn unmake_null_move(board: &mut Board) {
    let (_, prev_state) = board.history.pop().expect("unmake_null_move called with empty history");
    board.side_to_move = board.side_to_move.opposite();
    board.state = prev_state;
    board.ply -= 1;
    board.maybe_audit();
}

fn remove_piece(board: &mut Board, colour: Colour, kind: PieceKind, sq: Square) {
    board.piece_bb[kind.index()] = board.piece_bb[kind.index()].with_bit_cleared(sq);
    board.colour_bb[colour.index()] = board.colour_bb[colour.index()].with_bit_cleared(sq);
    board.mailbox[sq.index() as usize] = None;
}

fn place_piece(board: &mut Board, colour: Colour, kind: PieceKind, sq: Square) {
    board.piece_bb[kind.index()] = board.piece_bb[kind.index()].with_bit_set(sq);
    board.colour_bb[colour.index()] = board.colour_bb[colour.index()].with_bit_set(sq);
    board.mailbox[sq.index() as usize] = Some(kind);
}

fn xor_piece_key(
    board: &mut Board,
    keys: &'static crate::hash::ZobristKeys,
    sq: Square,
    colour: Colour,
    kind: PieceKind,
) {
    let k = keys.piece(sq.index(), colour, kind);
    board.state.key ^= k;
    if kind == PieceKind::Pawn {
        board.state.pawn_key ^= k;
    } else {
        board.state.non_pawn_keys[colour.index()] ^= k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::types::MoveFlag;

    #[test]
    fn quiet_move_round_trips_to_identical_state() {
        let mut board = Board::start_position();
        let before = board.clone();
        let m = Move::new(Square::new(3, 0), Square::new(4, 0), MoveFlag::Quiet);
        make_move(&mut board, m).unwrap();
        assert_ne!(board, before);
        unmake_move(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    fn capture_restores_captured_piece_on_unmake() {
        let mut board =
            Board::from_position_string("4k4/9/9/9/4p4/4R4/9/9/9/4K4 w - - 0 1").unwrap();
        let before = board.clone();
        let m = Move::new(Square::new(4, 4), Square::new(5, 4), MoveFlag::Capture);
        make_move(&mut board, m).unwrap();
        assert!(board.piece_at(Square::new(5, 4)).is_some());
        assert!(board.piece_at(Square::new(4, 4)).is_none());
        unmake_move(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    fn capture_resets_half_move_clock() {
        let mut board =
            Board::from_position_string("4k4/9/9/9/4p4/4R4/9/9/9/4K4 w - - 12 1").unwrap();
        let m = Move::new(Square::new(4, 4), Square::new(5, 4), MoveFlag::Capture);
        make_move(&mut board, m).unwrap();
        assert_eq!(board.state().half_move_clock, 0);
    }

    #[test]
    fn moving_from_an_empty_square_is_an_error() {
        let mut board = Board::start_position();
        let m = Move::new(Square::new(5, 5), Square::new(5, 6), MoveFlag::Quiet);
        assert!(matches!(make_move(&mut board, m), Err(IllegalMove::NoPieceAtOrigin(_))));
    }

    #[test]
    fn full_move_number_advances_after_black_moves() {
        let mut board = Board::start_position();
        let red_move = Move::new(Square::new(3, 0), Square::new(4, 0), MoveFlag::Quiet);
        make_move(&mut board, red_move).unwrap();
        assert_eq!(board.state().full_move_number, 1);
        let black_move = Move::new(Square::new(6, 0), Square::new(5, 0), MoveFlag::Quiet);
        make_move(&mut board, black_move).unwrap();
        assert_eq!(board.state().full_move_number, 2);
    }
}
