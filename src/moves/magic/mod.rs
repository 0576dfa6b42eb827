//! Precomputed per-square attack generators (§4.2).
//!
//! Replaces the teacher's multiplicative-magic rook/bishop tables with direct
//! mask-extracted ("software PEXT") indices, per the spec's explicit fallback and
//! DESIGN.md's resolution of the magic-index question: a rook/cannon's attack set
//! decomposes into an independent rank-axis and file-axis lookup, each a perfect hash
//! of that axis's occupancy by construction, so no offline magic search is needed.

pub mod attacks;
pub mod tables;

pub use tables::{attack_tables, AttackTables};
