//! Pseudo-legal and legal move generation (§4.5).
//!
//! Grounded on the teacher's `generate_pseudo_legal`/`generate_legal` split: enumerate
//! every piece kind's targets against the attack tables, then, for `Legal`/`Evasions`,
//! filter by a make/`is_attacked`/unmake round trip rather than special-casing pins.

use crate::board::Board;
use crate::moves::execute::{make_move, unmake_move};
use crate::moves::magic::attack_tables;
use crate::moves::square_control::is_attacked;
use crate::moves::types::{GenFilter, Move, MoveBuffer, MoveFlag};
use crate::piece::PieceKind;

/// Appends every move matching `filter` to `out`, clearing it first.
pub fn generate(board: &Board, filter: GenFilter, out: &mut impl MoveBuffer) {
    out.clear_moves();
    generate_pseudo_legal(board, out);

    match filter {
        GenFilter::All => {}
        GenFilter::Captures => retain_matching(out, |m| m.is_capture()),
        GenFilter::Quiets => retain_matching(out, |m| m.is_quiet()),
        GenFilter::Legal | GenFilter::Evasions => {
            filter_to_legal(board, out);
        }
    }
}

fn retain_matching(out: &mut impl MoveBuffer, keep: impl Fn(Move) -> bool) {
    let kept: Vec<Move> = out.iter().copied().filter(|&m| keep(m)).collect();
    out.clear_moves();
    for m in kept {
        out.push_move(m);
    }
}

fn filter_to_legal(board: &Board, out: &mut impl MoveBuffer) {
    let candidates: Vec<Move> = out.iter().copied().collect();
    out.clear_moves();
    let mut scratch = board.copy();
    for m in candidates {
        let mover = scratch.side_to_move();
        make_move(&mut scratch, m).expect("pseudo-legal move must have a piece at origin");
        let left_in_check = is_attacked(&scratch, scratch.king_square(mover), mover.opposite());
        unmake_move(&mut scratch);
        if !left_in_check {
            out.push_move(m);
        }
    }
}

/// Every geometrically reachable move for the side to move, ignoring whether it leaves
/// the mover's own general attacked.
fn generate_pseudo_legal(board: &Board, out: &mut impl MoveBuffer) {
    let tables = attack_tables();
    let side = board.side_to_move();
    let occ = board.all_occupancy();
    let own = board.occupancy(side);
    let enemy = board.occupancy(side.opposite());

    for kind in PieceKind::ALL {
        for from in board.pieces_of(kind, side).iter() {
            let reach = tables.attacks_for(kind, from, occ, side);
            let targets = reach & !own;
            for to in targets.iter() {
                let flag = if enemy.contains(to) { MoveFlag::Capture } else { MoveFlag::Quiet };
                out.push_move(Move::new(from, to, flag));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn start_position_has_no_pseudo_legal_captures() {
        let board = Board::start_position();
        let mut moves: Vec<Move> = Vec::new();
        generate(&board, GenFilter::All, &mut moves);
        assert!(moves.iter().all(|m| m.is_quiet()));
        assert!(!moves.is_empty());
    }

    #[test]
    fn start_position_legal_move_count_is_nonzero_and_symmetric_by_filter() {
        let board = Board::start_position();
        let mut all = Vec::new();
        generate(&board, GenFilter::All, &mut all);
        let mut legal = Vec::new();
        generate(&board, GenFilter::Legal, &mut legal);
        // No pins or checks from the start position, so legal == all here.
        assert_eq!(all.len(), legal.len());
    }

    #[test]
    fn legal_filter_excludes_moves_that_leave_own_general_exposed() {
        // Red's general faces Black's down a shared, otherwise empty file, with only
        // Red's own rook interposed. Moving that rook off the file would expose Red's
        // general to the flying-general rule, so `Legal` must drop those moves even
        // though `All` offers them.
        let board = Board::from_position_string("4k4/9/9/9/9/4R4/9/9/9/4K4 w - - 0 1").unwrap();
        let pinned = crate::square::Square::new(4, 4);

        let mut legal = Vec::new();
        generate(&board, GenFilter::Legal, &mut legal);
        assert!(legal.iter().all(|m| m.from() != pinned || m.to().file() == 4));

        let mut all = Vec::new();
        generate(&board, GenFilter::All, &mut all);
        assert!(all.iter().any(|m| m.from() == pinned && m.to().file() != 4));
    }

    #[test]
    fn captures_filter_only_returns_capture_moves() {
        let board =
            Board::from_position_string("4k4/9/9/9/4p4/4R4/9/9/9/4K4 w - - 0 1").unwrap();
        let mut captures = Vec::new();
        generate(&board, GenFilter::Captures, &mut captures);
        assert!(!captures.is_empty());
        assert!(captures.iter().all(|m| m.is_capture()));
    }
}
