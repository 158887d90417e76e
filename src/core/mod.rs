//! Board geometry, positions and the key codec.
//!
//! - [`coord`]: integer coordinates, distances and the king step set.
//! - [`board`]: board extents and the bit widths derived from them.
//! - [`position`]: a KRK placement plus side to move.
//! - [`key`]: bijection between representable positions and table indices.

pub mod board;
pub mod coord;
pub mod key;
pub mod position;
