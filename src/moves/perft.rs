//! Node-counting test tooling (§10), used only by this crate's own test suite.
//!
//! Grounded on the teacher's `perft`/`perft_divide` pair; dropped the per-category
//! breakdown counters (captures/castles/promotions/ep) since this position encoding
//! has nothing to count beyond captures and checks, and those aren't load-bearing for
//! the node-count identities the tests check.

use tracing::debug;

use crate::board::Board;
use crate::moves::execute::{make_move, unmake_move};
use crate::moves::movegen::generate;
use crate::moves::square_control::is_check;
use crate::moves::types::{GenFilter, Move};

const MAX_LOG_DEPTH: u32 = 2;

/// Counts leaf positions reachable in exactly `depth` plies of legal play.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves: Vec<Move> = Vec::new();
    generate(board, GenFilter::Legal, &mut moves);

    let mut nodes = 0u64;
    for m in moves {
        make_move(board, m).expect("legal move always has a piece at origin");
        nodes += perft(board, depth - 1);
        unmake_move(board);
    }
    nodes
}

/// Per-root-move leaf counts, for diffing against a reference perft when a node count
/// disagrees -- narrows the search to a single offending root move.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    let mut moves: Vec<Move> = Vec::new();
    generate(board, GenFilter::Legal, &mut moves);

    let mut out = Vec::with_capacity(moves.len());
    for m in moves {
        make_move(board, m).expect("legal move always has a piece at origin");
        let count = if depth == 0 { 1 } else { perft(board, depth - 1) };
        unmake_move(board);
        if depth <= MAX_LOG_DEPTH {
            debug!(%m, nodes = count, "divide: root child total");
        }
        out.push((m, count));
    }
    out
}

/// True if `board`'s side to move has no legal moves while in check -- i.e. checkmate.
pub fn is_checkmate(board: &Board) -> bool {
    if !is_check(board, board.side_to_move()) {
        return false;
    }
    let mut moves = Vec::new();
    generate(board, GenFilter::Legal, &mut moves);
    moves.is_empty()
}
