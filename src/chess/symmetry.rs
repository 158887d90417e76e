//! The dihedral group of the board and the canonical orientation used for pattern matching.

use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::position::Position;

/// One of the eight board symmetries.
///
/// The transposing elements only map the board onto itself when it is square; on a
/// rectangular board they map into the transposed board, which is still useful for
/// patterns that only look at squares near a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    MirrorFiles,
    MirrorRanks,
    Rotate180,
    Transpose,
    Rotate90,
    Rotate270,
    AntiTranspose,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::MirrorFiles,
        Symmetry::MirrorRanks,
        Symmetry::Rotate180,
        Symmetry::Transpose,
        Symmetry::Rotate90,
        Symmetry::Rotate270,
        Symmetry::AntiTranspose,
    ];

    /// Symmetries that map `board` onto itself.
    pub fn automorphisms(board: &Board) -> &'static [Symmetry] {
        if board.is_square() {
            &Self::ALL
        } else {
            &Self::ALL[..4]
        }
    }

    #[inline]
    pub fn is_transposing(self) -> bool {
        matches!(
            self,
            Symmetry::Transpose
                | Symmetry::Rotate90
                | Symmetry::Rotate270
                | Symmetry::AntiTranspose
        )
    }

    /// The board the image of `board` lives on.
    pub fn image_board(self, board: &Board) -> Board {
        if self.is_transposing() {
            board.transposed()
        } else {
            *board
        }
    }

    pub fn apply_coord(self, board: &Board, c: Coord) -> Coord {
        let fx = board.last_file() - c.x;
        let ry = board.last_rank() - c.y;
        match self {
            Symmetry::Identity => c,
            Symmetry::MirrorFiles => Coord::new(fx, c.y),
            Symmetry::MirrorRanks => Coord::new(c.x, ry),
            Symmetry::Rotate180 => Coord::new(fx, ry),
            Symmetry::Transpose => Coord::new(c.y, c.x),
            Symmetry::Rotate90 => Coord::new(ry, c.x),
            Symmetry::Rotate270 => Coord::new(c.y, fx),
            Symmetry::AntiTranspose => Coord::new(ry, fx),
        }
    }

    pub fn apply(self, board: &Board, p: &Position) -> Position {
        p.map_coords(|c| self.apply_coord(board, c))
    }
}

/// Per-axis keys of a position: black king, white king, then rook if present.
fn axis_tuple(p: &Position, axis: impl Fn(Coord) -> i32) -> Vec<i32> {
    let mut v = vec![axis(p.black_king), axis(p.white_king)];
    if !p.rook_captured {
        v.push(axis(p.rook));
    }
    v
}

/// The piece tuple already lies in the low half of the files (ties broken lexicographically).
pub fn canonical_files(board: &Board, p: &Position) -> bool {
    let doubled = axis_tuple(p, |c| 2 * c.x + 1);
    let centre = vec![board.files(); doubled.len()];
    doubled <= centre
}

pub fn canonical_ranks(board: &Board, p: &Position) -> bool {
    let doubled = axis_tuple(p, |c| 2 * c.y + 1);
    let centre = vec![board.ranks(); doubled.len()];
    doubled <= centre
}

/// The file tuple does not exceed the rank tuple.
pub fn canonical_diagonal(p: &Position) -> bool {
    axis_tuple(p, |c| c.x) <= axis_tuple(p, |c| c.y)
}

/// Reflect files, then ranks, then transpose, each only when the position is not already
/// canonical on that axis.
///
/// The result lives on `board` or, after a transpose, on `board.transposed()`.
pub fn canonicalize(board: &Board, p: &Position) -> Position {
    let mut q = *p;
    if !canonical_files(board, &q) {
        q = Symmetry::MirrorFiles.apply(board, &q);
    }
    if !canonical_ranks(board, &q) {
        q = Symmetry::MirrorRanks.apply(board, &q);
    }
    if !canonical_diagonal(&q) {
        q = Symmetry::Transpose.apply(board, &q);
    }
    q
}
