//! Attack queries: "is this square attacked", "is the side to move in check", and the
//! flying-general rule (the two generals may never face each other on an open file).

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::execute;
use crate::moves::magic::attack_tables;
use crate::moves::magic::attacks::{horse_attacker_squares, pawn_attacker_squares};
use crate::moves::types::Move;
use crate::piece::{Colour, PieceKind};
use crate::square::Square;

/// True if any piece belonging to `attacker` attacks `square` on `board`'s current
/// occupancy, including the flying-general rule treating the two generals as attacking
/// each other across an open, shared file.
pub fn is_attacked(board: &Board, square: Square, attacker: Colour) -> bool {
    let tables = attack_tables();
    let occ = board.all_occupancy();

    for kind in PieceKind::ALL {
        if kind == PieceKind::Pawn {
            // Pawn attack geometry is colour-asymmetric (the forward step points a
            // different way for each side), so the defender-side `pawn_attacks` table
            // can't be reused here: probe from the attacker's own geometry instead.
            let reach = pawn_attacker_squares(square, attacker);
            if !(reach & board.pieces_of(PieceKind::Pawn, attacker)).is_empty() {
                return true;
            }
            continue;
        }
        if kind == PieceKind::Horse {
            // A horse's leg sits next to its own square, not the target, so the
            // from-square symmetric trick the other pieces use doesn't hold here either.
            let reach = horse_attacker_squares(square, occ);
            if !(reach & board.pieces_of(PieceKind::Horse, attacker)).is_empty() {
                return true;
            }
            continue;
        }
        let reach = tables.attacks_for(kind, square, occ, attacker);
        if !(reach & board.pieces_of(kind, attacker)).is_empty() {
            return true;
        }
    }

    flying_general_faces(board, square, attacker)
}

/// True if `attacker`'s general faces `square` (standing in for the defender's general)
/// on a shared, entirely empty file.
fn flying_general_faces(board: &Board, square: Square, attacker: Colour) -> bool {
    let attacker_kings = board.pieces_of(PieceKind::General, attacker);
    if attacker_kings.is_empty() {
        return false;
    }
    let attacker_king = attacker_kings.lowest_set_square();
    if attacker_king.file() != square.file() {
        return false;
    }
    (Bitboard::between(attacker_king, square) & board.all_occupancy()).is_empty()
}

/// True if `colour`'s general is currently attacked.
pub fn is_check(board: &Board, colour: Colour) -> bool {
    let king_sq = board.king_square(colour);
    is_attacked(board, king_sq, colour.opposite())
}

/// True if playing `m` would give check to the opponent. Plays the move, checks,
/// unmakes -- cheap enough not to warrant a static shortcut, and correct even for
/// cannon discovered checks through a newly vacated screen square.
pub fn gives_check(board: &mut Board, m: Move) -> bool {
    let mover = board.side_to_move();
    execute::make_move(board, m).expect("gives_check called with a pseudo-legal move");
    let result = is_check(board, mover.opposite());
    execute::unmake_move(board);
    result
}
