//! Per-square lookup tables built once from the pure geometry in `attacks`.
//!
//! A rook/cannon's relevant occupancy splits into an 8-bit rank mask and a 9-bit file
//! mask (§4.2, §9): occupancy on the rank never affects file-direction attacks and
//! vice versa, so each axis gets its own small (256- or 512-entry) per-square table
//! instead of one combined 2^17-entry table. The index into each table is a direct
//! bit-extraction over the mask squares ("software PEXT") -- already a perfect hash by
//! construction, needing no offline magic-constant search.

use once_cell::sync::OnceCell;

use super::attacks;
use crate::bitboard::Bitboard;
use crate::piece::{Colour, PieceKind};
use crate::square::{Square, FILES, RANKS, SQUARE_COUNT};

const RANK_SUBSETS: usize = 1 << (FILES as u32 - 1); // 256
const FILE_SUBSETS: usize = 1 << (RANKS as u32 - 1); // 512
const LEG_SUBSETS: usize = 16;

pub struct AttackTables {
    rook_rank: Vec<[Bitboard; RANK_SUBSETS]>,
    rook_file: Vec<[Bitboard; FILE_SUBSETS]>,
    cannon_rank: Vec<[Bitboard; RANK_SUBSETS]>,
    cannon_file: Vec<[Bitboard; FILE_SUBSETS]>,
    horse: Vec<[Bitboard; LEG_SUBSETS]>,
    elephant: Vec<[Bitboard; LEG_SUBSETS]>,
    advisor: Vec<Bitboard>,
    general: Vec<Bitboard>,
    pawn: Vec<[Bitboard; 2]>,
}

fn rank_subset_occ(rank: u8, skip_file: u8, idx: usize) -> Bitboard {
    let mut occ = Bitboard::empty();
    let mut bit = 0u32;
    for file in 0..FILES {
        if file == skip_file {
            continue;
        }
        if idx & (1 << bit) != 0 {
            occ = occ.with_bit_set(Square::new(rank, file));
        }
        bit += 1;
    }
    occ
}

fn file_subset_occ(file: u8, skip_rank: u8, idx: usize) -> Bitboard {
    let mut occ = Bitboard::empty();
    let mut bit = 0u32;
    for rank in 0..RANKS {
        if rank == skip_rank {
            continue;
        }
        if idx & (1 << bit) != 0 {
            occ = occ.with_bit_set(Square::new(rank, file));
        }
        bit += 1;
    }
    occ
}

fn rank_occ_index(occ: Bitboard, rank: u8, skip_file: u8) -> usize {
    let mut idx = 0usize;
    let mut bit = 0u32;
    for file in 0..FILES {
        if file == skip_file {
            continue;
        }
        if occ.contains(Square::new(rank, file)) {
            idx |= 1 << bit;
        }
        bit += 1;
    }
    idx
}

fn file_occ_index(occ: Bitboard, file: u8, skip_rank: u8) -> usize {
    let mut idx = 0usize;
    let mut bit = 0u32;
    for rank in 0..RANKS {
        if rank == skip_rank {
            continue;
        }
        if occ.contains(Square::new(rank, file)) {
            idx |= 1 << bit;
        }
        bit += 1;
    }
    idx
}

fn leg_subset_occ(square: Square, legs: &[(i8, i8); 4], idx: usize) -> Bitboard {
    let mut occ = Bitboard::empty();
    for (bit, &(dr, df)) in legs.iter().enumerate() {
        if idx & (1 << bit) != 0 {
            if let Some(sq) = square.offset(dr, df) {
                occ = occ.with_bit_set(sq);
            }
        }
    }
    occ
}

fn leg_index(square: Square, legs: &[(i8, i8); 4], occ: Bitboard) -> usize {
    let mut idx = 0usize;
    for (bit, &(dr, df)) in legs.iter().enumerate() {
        if let Some(sq) = square.offset(dr, df) {
            if occ.contains(sq) {
                idx |= 1 << bit;
            }
        }
    }
    idx
}

fn build_rank_table(sq: Square, cannon: bool) -> [Bitboard; RANK_SUBSETS] {
    let mut table = [Bitboard::empty(); RANK_SUBSETS];
    for (idx, slot) in table.iter_mut().enumerate() {
        let occ = rank_subset_occ(sq.rank(), sq.file(), idx);
        *slot = if cannon { attacks::cannon_slide_rank(sq, occ) } else { attacks::slide_rank(sq, occ) };
    }
    table
}

fn build_file_table(sq: Square, cannon: bool) -> [Bitboard; FILE_SUBSETS] {
    let mut table = [Bitboard::empty(); FILE_SUBSETS];
    for (idx, slot) in table.iter_mut().enumerate() {
        let occ = file_subset_occ(sq.file(), sq.rank(), idx);
        *slot = if cannon { attacks::cannon_slide_file(sq, occ) } else { attacks::slide_file(sq, occ) };
    }
    table
}

fn build_leg_table(
    sq: Square,
    legs: &[(i8, i8); 4],
    f: fn(Square, Bitboard) -> Bitboard,
) -> [Bitboard; LEG_SUBSETS] {
    let mut table = [Bitboard::empty(); LEG_SUBSETS];
    for (idx, slot) in table.iter_mut().enumerate() {
        let occ = leg_subset_occ(sq, legs, idx);
        *slot = f(sq, occ);
    }
    table
}

impl AttackTables {
    fn build() -> AttackTables {
        let n = SQUARE_COUNT as usize;
        let mut rook_rank = Vec::with_capacity(n);
        let mut rook_file = Vec::with_capacity(n);
        let mut cannon_rank = Vec::with_capacity(n);
        let mut cannon_file = Vec::with_capacity(n);
        let mut horse = Vec::with_capacity(n);
        let mut elephant = Vec::with_capacity(n);
        let mut advisor = Vec::with_capacity(n);
        let mut general = Vec::with_capacity(n);
        let mut pawn = Vec::with_capacity(n);

        for idx in 0..SQUARE_COUNT {
            let sq = Square::from_index(idx);
            rook_rank.push(build_rank_table(sq, false));
            rook_file.push(build_file_table(sq, false));
            cannon_rank.push(build_rank_table(sq, true));
            cannon_file.push(build_file_table(sq, true));
            horse.push(build_leg_table(sq, attacks::horse_legs(), attacks::horse_attacks));
            elephant.push(build_leg_table(sq, attacks::elephant_eyes(), attacks::elephant_attacks));
            advisor.push(attacks::advisor_attacks(sq));
            general.push(attacks::general_attacks(sq));
            pawn.push([attacks::pawn_attacks(sq, Colour::Red), attacks::pawn_attacks(sq, Colour::Black)]);
        }

        AttackTables {
            rook_rank,
            rook_file,
            cannon_rank,
            cannon_file,
            horse,
            elephant,
            advisor,
            general,
            pawn,
        }
    }

    #[inline]
    pub fn rook_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        let r = rank_occ_index(occ, sq.rank(), sq.file());
        let f = file_occ_index(occ, sq.file(), sq.rank());
        self.rook_rank[sq.index() as usize][r].union(self.rook_file[sq.index() as usize][f])
    }

    #[inline]
    pub fn cannon_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        let r = rank_occ_index(occ, sq.rank(), sq.file());
        let f = file_occ_index(occ, sq.file(), sq.rank());
        self.cannon_rank[sq.index() as usize][r].union(self.cannon_file[sq.index() as usize][f])
    }

    #[inline]
    pub fn horse_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        let idx = leg_index(sq, attacks::horse_legs(), occ);
        self.horse[sq.index() as usize][idx]
    }

    #[inline]
    pub fn elephant_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        let idx = leg_index(sq, attacks::elephant_eyes(), occ);
        self.elephant[sq.index() as usize][idx]
    }

    #[inline]
    pub fn advisor_attacks(&self, sq: Square) -> Bitboard {
        self.advisor[sq.index() as usize]
    }

    #[inline]
    pub fn general_attacks(&self, sq: Square) -> Bitboard {
        self.general[sq.index() as usize]
    }

    #[inline]
    pub fn pawn_attacks(&self, sq: Square, colour: Colour) -> Bitboard {
        self.pawn[sq.index() as usize][colour.index()]
    }

    /// Dispatch by piece kind: attacks *from* `sq` as if a piece of `kind` (and, for
    /// pawns, `colour`) sat there, given the full board occupancy. Used directly by
    /// move generation and by `is_attacked`'s "attacks from square" trick.
    pub fn attacks_for(&self, kind: PieceKind, sq: Square, occ: Bitboard, colour: Colour) -> Bitboard {
        match kind {
            PieceKind::Rook => self.rook_attacks(sq, occ),
            PieceKind::Cannon => self.cannon_attacks(sq, occ),
            PieceKind::Horse => self.horse_attacks(sq, occ),
            PieceKind::Elephant => self.elephant_attacks(sq, occ),
            PieceKind::Advisor => self.advisor_attacks(sq),
            PieceKind::General => self.general_attacks(sq),
            PieceKind::Pawn => self.pawn_attacks(sq, colour),
        }
    }
}

/// The process-wide attack-table store, built once on first use and shared
/// read-only by every `Board` thereafter (§5).
pub fn attack_tables() -> &'static AttackTables {
    static TABLES: OnceCell<AttackTables> = OnceCell::new();
    TABLES.get_or_init(|| {
        tracing::debug!("initialising xiangqi attack tables");
        AttackTables::build()
    })
}
