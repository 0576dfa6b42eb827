//! Pure per-piece-kind attack geometry, parameterised by full board occupancy.
//! `tables` memoises these into per-square lookup tables built once at init; nothing
//! here is itself cached, so these are also the ground truth the table-building code
//! (and tests) check against.

use crate::bitboard::Bitboard;
use crate::piece::Colour;
use crate::square::Square;

/// Rook/cannon attacks confined to `square`'s rank.
pub fn slide_rank(square: Square, occ: Bitboard) -> Bitboard {
    scan_direction(square, occ, false, 0, 1).union(scan_direction(square, occ, false, 0, -1))
}

/// Rook/cannon attacks confined to `square`'s file.
pub fn slide_file(square: Square, occ: Bitboard) -> Bitboard {
    scan_direction(square, occ, false, 1, 0).union(scan_direction(square, occ, false, -1, 0))
}

/// Cannon attacks confined to `square`'s rank (screen-and-capture semantics).
pub fn cannon_slide_rank(square: Square, occ: Bitboard) -> Bitboard {
    scan_direction(square, occ, true, 0, 1).union(scan_direction(square, occ, true, 0, -1))
}

/// Cannon attacks confined to `square`'s file (screen-and-capture semantics).
pub fn cannon_slide_file(square: Square, occ: Bitboard) -> Bitboard {
    scan_direction(square, occ, true, 1, 0).union(scan_direction(square, occ, true, -1, 0))
}

/// Scans one ray from `square` in direction `(dr, df)`. For a plain slider, stops at
/// and includes the first occupied square. For a cannon: every empty square before the
/// first occupied one (the screen) is a quiet target; the screen itself is never a
/// target; the next occupied square beyond the screen (if any) is the sole capture
/// target, and empty squares between the screen and that square are not targets.
fn scan_direction(square: Square, occ: Bitboard, cannon: bool, dr: i8, df: i8) -> Bitboard {
    let mut result = Bitboard::empty();
    let mut cur = square;
    let mut screened = false;
    while let Some(next) = cur.offset(dr, df) {
        cur = next;
        let occupied = occ.contains(cur);
        if !cannon {
            result = result.with_bit_set(cur);
            if occupied {
                break;
            }
        } else if !screened {
            if occupied {
                screened = true;
            } else {
                result = result.with_bit_set(cur);
            }
        } else if occupied {
            result = result.with_bit_set(cur);
            break;
        }
    }
    result
}

const HORSE_LEGS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const HORSE_OFFSETS: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
];

pub fn horse_legs() -> &'static [(i8, i8); 4] {
    &HORSE_LEGS
}

/// The horse's eight target squares, each gated on its leg (the orthogonal square one
/// step toward the target) being empty.
pub fn horse_attacks(square: Square, occ: Bitboard) -> Bitboard {
    let mut result = Bitboard::empty();
    for &((tr, tf), (lr, lf)) in &HORSE_OFFSETS {
        let leg_blocked = match square.offset(lr, lf) {
            Some(leg) => occ.contains(leg),
            None => true,
        };
        if leg_blocked {
            continue;
        }
        if let Some(target) = square.offset(tr, tf) {
            result = result.with_bit_set(target);
        }
    }
    result
}

/// The squares a horse could stand on to attack `square`. Unlike the rook/cannon rays
/// and the elephant's eye (whose midpoint is the same square viewed from either end),
/// a horse's leg sits next to the *source* square, not the target, so this cannot be
/// computed by calling `horse_attacks` from `square` outward -- that would gate each
/// candidate on the leg adjacent to `square` instead of the leg adjacent to the
/// candidate. Walk the same eight `(target, leg)` offsets in reverse instead: for each,
/// the candidate source is `square` shifted by the negated target offset, and its leg
/// is that source shifted by the (un-negated) leg offset.
pub fn horse_attacker_squares(square: Square, occ: Bitboard) -> Bitboard {
    let mut result = Bitboard::empty();
    for &((tr, tf), (lr, lf)) in &HORSE_OFFSETS {
        let Some(source) = square.offset(-tr, -tf) else { continue };
        let leg_blocked = match source.offset(lr, lf) {
            Some(leg) => occ.contains(leg),
            None => true,
        };
        if !leg_blocked {
            result = result.with_bit_set(source);
        }
    }
    result
}

const ELEPHANT_EYES: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ELEPHANT_OFFSETS: [((i8, i8), (i8, i8)); 4] =
    [((2, 2), (1, 1)), ((2, -2), (1, -1)), ((-2, 2), (-1, 1)), ((-2, -2), (-1, -1))];

pub fn elephant_eyes() -> &'static [(i8, i8); 4] {
    &ELEPHANT_EYES
}

/// The elephant's four target squares, each gated on its diagonal eye being empty and
/// on staying on the elephant's own side of the river.
pub fn elephant_attacks(square: Square, occ: Bitboard) -> Bitboard {
    let mut result = Bitboard::empty();
    let red_side = square.is_red_side();
    for &((tr, tf), (er, ef)) in &ELEPHANT_OFFSETS {
        let eye_blocked = match square.offset(er, ef) {
            Some(eye) => occ.contains(eye),
            None => true,
        };
        if eye_blocked {
            continue;
        }
        if let Some(target) = square.offset(tr, tf) {
            if target.is_red_side() == red_side {
                result = result.with_bit_set(target);
            }
        }
    }
    result
}

const ADVISOR_OFFSETS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The advisor's four diagonal neighbours, confined to the palace. Static: no blocker.
pub fn advisor_attacks(square: Square) -> Bitboard {
    let mut result = Bitboard::empty();
    for &(dr, df) in &ADVISOR_OFFSETS {
        if let Some(target) = square.offset(dr, df) {
            if target.in_palace() {
                result = result.with_bit_set(target);
            }
        }
    }
    result
}

const GENERAL_OFFSETS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The general's four orthogonal neighbours, confined to the palace. Static; the
/// flying-general constraint is handled by the move generator, not here.
pub fn general_attacks(square: Square) -> Bitboard {
    let mut result = Bitboard::empty();
    for &(dr, df) in &GENERAL_OFFSETS {
        if let Some(target) = square.offset(dr, df) {
            if target.in_palace() {
                result = result.with_bit_set(target);
            }
        }
    }
    result
}

/// Forward one step always; after crossing the river, also sideways one step. Static,
/// keyed by the pawn's colour.
pub fn pawn_attacks(square: Square, colour: Colour) -> Bitboard {
    let mut result = Bitboard::empty();
    let forward: i8 = match colour {
        Colour::Red => 1,
        Colour::Black => -1,
    };
    if let Some(target) = square.offset(forward, 0) {
        result = result.with_bit_set(target);
    }
    let crossed_river = match colour {
        Colour::Red => square.rank() >= 5,
        Colour::Black => square.rank() <= 4,
    };
    if crossed_river {
        for df in [-1i8, 1i8] {
            if let Some(target) = square.offset(0, df) {
                result = result.with_bit_set(target);
            }
        }
    }
    result
}

/// The squares a `colour` pawn could stand on to attack `square`. Not the same
/// geometry as `pawn_attacks(square, colour)` run backwards: a pawn's forward step is
/// direction-asymmetric, so the source one step behind `square` is the negated
/// forward offset, and the sideways sources (on `square`'s own rank) are gated on
/// whether a pawn standing on *that rank* has crossed the river -- which, since they
/// share a rank with `square`, is the same test as `square.rank()` itself.
pub fn pawn_attacker_squares(square: Square, colour: Colour) -> Bitboard {
    let mut result = Bitboard::empty();
    let forward: i8 = match colour {
        Colour::Red => 1,
        Colour::Black => -1,
    };
    if let Some(source) = square.offset(-forward, 0) {
        result = result.with_bit_set(source);
    }
    let crossed_river = match colour {
        Colour::Red => square.rank() >= 5,
        Colour::Black => square.rank() <= 4,
    };
    if crossed_river {
        for df in [-1i8, 1i8] {
            if let Some(source) = square.offset(0, df) {
                result = result.with_bit_set(source);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn rook_stops_at_first_blocker_each_direction() {
        let sq = Square::new(4, 4);
        let occ = Bitboard::empty().with_bit_set(Square::new(4, 6));
        let attacks = slide_rank(sq, occ);
        assert!(attacks.contains(Square::new(4, 5)));
        assert!(attacks.contains(Square::new(4, 6)));
        assert!(!attacks.contains(Square::new(4, 7)));
        // unobstructed west direction still runs to the edge
        assert!(attacks.contains(Square::new(4, 0)));
    }

    #[test]
    fn cannon_needs_a_screen_to_capture() {
        let sq = Square::new(4, 0);
        let screen = Square::new(4, 3);
        let target = Square::new(4, 6);
        let occ_no_target = Bitboard::empty().with_bit_set(screen);
        let attacks = cannon_slide_rank(sq, occ_no_target);
        assert!(!attacks.contains(screen), "screen square is never a target");
        assert!(attacks.contains(Square::new(4, 1)));
        assert!(attacks.contains(Square::new(4, 2)));
        assert!(!attacks.contains(target), "no piece beyond the screen, no target");

        let occ_with_target = occ_no_target.with_bit_set(target);
        let attacks = cannon_slide_rank(sq, occ_with_target);
        assert!(attacks.contains(target), "first piece beyond the screen is a target");
        assert!(!attacks.contains(Square::new(4, 4)));
        assert!(!attacks.contains(Square::new(4, 5)));
    }

    #[test]
    fn horse_leg_blocks_both_of_its_targets() {
        let sq = Square::new(0, 1); // b0
        let leg = Square::new(1, 1); // b1
        let occ = Bitboard::empty().with_bit_set(leg);
        let attacks = horse_attacks(sq, occ);
        assert!(!attacks.contains(Square::new(2, 0)));
        assert!(!attacks.contains(Square::new(2, 2)));

        let attacks_clear = horse_attacks(sq, Bitboard::empty());
        assert!(attacks_clear.contains(Square::new(2, 0)));
        assert!(attacks_clear.contains(Square::new(2, 2)));
    }

    #[test]
    fn elephant_eye_blocks_and_river_confines() {
        let sq = Square::new(0, 2); // c0
        let eye = Square::new(1, 1); // b1
        let occ = Bitboard::empty().with_bit_set(eye);
        let attacks = elephant_attacks(sq, occ);
        assert!(!attacks.contains(Square::new(2, 0)));

        let attacks_clear = elephant_attacks(sq, Bitboard::empty());
        assert!(!attacks_clear.contains(Square::new(5, 2)), "elephant never crosses the river");
    }

    #[test]
    fn pawn_gains_sideways_motion_after_crossing_river() {
        let before = pawn_attacks(Square::new(4, 4), Colour::Red);
        assert_eq!(before.pop_count(), 1);
        let after = pawn_attacks(Square::new(5, 4), Colour::Red);
        assert_eq!(after.pop_count(), 3);
    }
}
