//! Position-string parsing and emission (§4.6).
//!
//! Same shape as orthodox FEN -- placement, side to move, two reserved fields, halfmove
//! clock, fullmove number -- but the placement section is 10 ranks of 9 files and the
//! two reserved fields carry no castling/en-passant meaning here; they are always `-`.

use crate::bitboard::Bitboard;
use crate::board::{Board, BoardOptions};
use crate::error::{FenErrorKind, InvalidFen};
use crate::piece::{Colour, PieceKind, PIECE_KIND_COUNT};
use crate::square::{Square, FILES, RANKS, SQUARE_COUNT};

fn char_to_kind(c: char) -> Option<PieceKind> {
    match c.to_ascii_lowercase() {
        'p' => Some(PieceKind::Pawn),
        'n' => Some(PieceKind::Horse),
        'b' | 'e' => Some(PieceKind::Elephant),
        'r' => Some(PieceKind::Rook),
        'a' => Some(PieceKind::Advisor),
        'k' => Some(PieceKind::General),
        'c' => Some(PieceKind::Cannon),
        _ => None,
    }
}

fn err(source_string: &str, reason: FenErrorKind) -> InvalidFen {
    InvalidFen { reason, source_string: source_string.to_string() }
}

pub fn parse(s: &str, options: BoardOptions) -> Result<Board, InvalidFen> {
    let fields: Vec<&str> = s.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(err(s, FenErrorKind::WrongFieldCount { found: fields.len() }));
    }
    let [placement, side, _reserved_a, _reserved_b, half_move, full_move] = fields[..] else {
        unreachable!("checked length above")
    };

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != RANKS as usize {
        return Err(err(s, FenErrorKind::WrongRankCount { found: ranks.len() }));
    }

    let mut piece_bb = [Bitboard::empty(); PIECE_KIND_COUNT];
    let mut colour_bb = [Bitboard::empty(); 2];
    let mut mailbox: [Option<PieceKind>; SQUARE_COUNT as usize] = [None; SQUARE_COUNT as usize];
    let mut red_kings = 0usize;
    let mut black_kings = 0usize;

    // Rank strings list rank 9 (Black's home rank) first, down to rank 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = RANKS as usize - 1 - row;
        let mut file = 0u8;
        let mut prev_was_digit = false;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if prev_was_digit {
                    return Err(err(s, FenErrorKind::AdjacentDigits { rank }));
                }
                prev_was_digit = true;
                file += digit as u8;
                if file > FILES {
                    return Err(err(
                        s,
                        FenErrorKind::RankWrongLength { rank, sum: file as usize },
                    ));
                }
                continue;
            }
            prev_was_digit = false;
            if file >= FILES {
                return Err(err(s, FenErrorKind::RankWrongLength { rank, sum: file as usize + 1 }));
            }
            let Some(kind) = char_to_kind(c) else {
                return Err(err(s, FenErrorKind::UnknownPieceChar(c)));
            };
            let colour = if c.is_ascii_uppercase() { Colour::Red } else { Colour::Black };
            let sq = Square::new(rank as u8, file);
            piece_bb[kind.index()] = piece_bb[kind.index()].with_bit_set(sq);
            colour_bb[colour.index()] = colour_bb[colour.index()].with_bit_set(sq);
            mailbox[sq.index() as usize] = Some(kind);
            if kind == PieceKind::General {
                match colour {
                    Colour::Red => red_kings += 1,
                    Colour::Black => black_kings += 1,
                }
            }
            file += 1;
        }
        if file as usize != FILES as usize {
            return Err(err(s, FenErrorKind::RankWrongLength { rank, sum: file as usize }));
        }
    }

    if red_kings != 1 {
        return Err(err(s, FenErrorKind::WrongRedGeneralCount { found: red_kings }));
    }
    if black_kings != 1 {
        return Err(err(s, FenErrorKind::WrongBlackGeneralCount { found: black_kings }));
    }

    let side_to_move = match side {
        "w" => Colour::Red,
        "b" => Colour::Black,
        other => return Err(err(s, FenErrorKind::BadSideToMove(other.to_string()))),
    };

    let half_move_clock: u32 =
        half_move.parse().map_err(|_| err(s, FenErrorKind::BadHalfmoveClock(half_move.to_string())))?;
    let full_move_number: u32 =
        full_move.parse().map_err(|_| err(s, FenErrorKind::BadFullmoveNumber(full_move.to_string())))?;

    Ok(Board::from_raw(
        piece_bb,
        colour_bb,
        mailbox,
        side_to_move,
        half_move_clock,
        full_move_number,
        options,
    ))
}

pub fn emit(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(RANKS as usize);
    for rank in (0..RANKS).rev() {
        let mut row = String::new();
        let mut empty_run = 0u32;
        for file in 0..FILES {
            let sq = Square::new(rank, file);
            match board.piece_at(sq) {
                None => empty_run += 1,
                Some(kind) => {
                    if empty_run > 0 {
                        row.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    let glyph = kind.fen_char();
                    let glyph = match board.colour_at(sq) {
                        Some(Colour::Red) => glyph.to_ascii_uppercase(),
                        _ => glyph,
                    };
                    row.push(glyph);
                }
            }
        }
        if empty_run > 0 {
            row.push_str(&empty_run.to_string());
        }
        ranks.push(row);
    }

    let placement = ranks.join("/");
    let side = match board.side_to_move() {
        Colour::Red => "w",
        Colour::Black => "b",
    };
    format!(
        "{placement} {side} - - {} {}",
        board.state().half_move_clock,
        board.state().full_move_number
    )
}
