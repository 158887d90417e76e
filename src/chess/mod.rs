//! Chess rules for king and rook against king on a bounded board.

pub mod movegen;
pub mod rules;
pub mod symmetry;
