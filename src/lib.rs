//! Retrograde analysis of the king and rook versus king endgame on rectangular boards,
//! together with a verifier for a hand-written mating strategy.
//!
//! The table holds one record per packed position key. [`solve::optimal`] computes the
//! exact distance to mate for every legal white-to-move position; [`solve::verify`] runs
//! the same backward induction with white restricted to the moves picked by a
//! [`strategy::Strategy`] and reports where that strategy fails to force mate.

pub mod chess;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod solve;
pub mod strategy;
pub mod table;

pub use config::SolverConfig;
pub use error::KrkError;
