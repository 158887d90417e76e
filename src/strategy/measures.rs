//! Geometric measures the heuristic rules are phrased in.
//!
//! All of these assume the rook is on the board.

use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::position::Position;

/// Size of the box the rook confines the black king to, as files + ranks.
///
/// A black king on the rook's file or rank is not confined at all and gets the maximum.
pub fn room(board: &Board, p: &Position) -> i32 {
    let (bk, wr) = (p.black_king, p.rook);
    if wr.x == bk.x || wr.y == bk.y {
        return board.files() + board.ranks() - 1;
    }
    let files = if bk.x < wr.x { wr.x } else { board.last_file() - wr.x };
    let ranks = if bk.y < wr.y { wr.y } else { board.last_rank() - wr.y };
    files + ranks
}

/// The box corner adjacent to the rook, on the black king's side of it.
pub fn critical_square(p: &Position) -> Coord {
    let (bk, wr) = (p.black_king, p.rook);
    let step = |b: i32, r: i32| match b.cmp(&r) {
        std::cmp::Ordering::Equal => r,
        std::cmp::Ordering::Less => r - 1,
        std::cmp::Ordering::Greater => r + 1,
    };
    Coord::new(step(bk.x, wr.x), step(bk.y, wr.y))
}

/// The white king is at least as close to the rook as the black king is.
pub fn rook_guarded(p: &Position) -> bool {
    p.white_king.chebyshev(p.rook) <= p.black_king.chebyshev(p.rook)
}

/// The rook is strictly between the kings on the file axis or the rank axis.
pub fn rook_divides(p: &Position) -> bool {
    let between = |w: i32, r: i32, b: i32| (w > r && r > b) || (w < r && r < b);
    between(p.white_king.x, p.rook.x, p.black_king.x)
        || between(p.white_king.y, p.rook.y, p.black_king.y)
}

pub fn black_king_next_to_rook(p: &Position) -> bool {
    p.black_king.chebyshev(p.rook) <= 1
}

pub fn white_king_next_to_rook(p: &Position) -> bool {
    p.white_king.chebyshev(p.rook) <= 1
}

/// Manhattan distance from the white king to the critical square.
pub fn critical_distance(p: &Position) -> i32 {
    p.white_king.manhattan(critical_square(p))
}

/// The white king got closer to the critical square (each measured in its own position).
pub fn approaches_critical_square(before: &Position, after: &Position) -> bool {
    critical_distance(before) > critical_distance(after)
}

/// Kings in opposition two apart with the rook beside the white king, shielding it.
pub fn l_pattern(p: &Position) -> bool {
    let (wk, bk, wr) = (p.white_king, p.black_king, p.rook);
    (wk.y == bk.y && (wk.x - bk.x).abs() == 2 && wr.x == wk.x && (wr.y - wk.y).abs() == 1)
        || (wk.x == bk.x && (wk.y - bk.y).abs() == 2 && wr.y == wk.y && (wr.x - wk.x).abs() == 1)
}

pub fn kings_on_same_edge(board: &Board, p: &Position) -> bool {
    let (wk, bk) = (p.white_king, p.black_king);
    (wk.x == 0 && bk.x == 0)
        || (wk.y == 0 && bk.y == 0)
        || (wk.x == board.last_file() && bk.x == board.last_file())
        || (wk.y == board.last_rank() && bk.y == board.last_rank())
}

/// The white king retreats while the black king is pinned to an edge by the rook one line in.
pub fn back_move(board: &Board, before: &Position, after: &Position) -> bool {
    let (bk, wr, wk) = (before.black_king, before.rook, before.white_king);
    let to = after.white_king;
    (bk.x == 0 && wr.x == 1 && to.x < wk.x)
        || (bk.x == board.last_file() && wr.x == board.last_file() - 1 && to.x > wk.x)
        || (bk.y == 0 && wr.y == 1 && to.y < wk.y)
        || (bk.y == board.last_rank() && wr.y == board.last_rank() - 1 && to.y > wk.y)
}

/// Progress measure: six times the room plus the critical distance.
pub fn progress(board: &Board, p: &Position) -> i32 {
    6 * room(board, p) + critical_distance(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn room_counts_confining_box() {
        let board = Board::square(8).unwrap();
        let p = Position::white_to_move(c(5, 5), c(1, 1), c(3, 4));
        assert_eq!(room(&board, &p), 3 + 4);
        let p = Position::white_to_move(c(1, 1), c(6, 6), c(3, 4));
        assert_eq!(room(&board, &p), 4 + 3);
        let p = Position::white_to_move(c(5, 5), c(1, 4), c(3, 4));
        assert_eq!(room(&board, &p), 15);
    }

    #[test]
    fn critical_square_sits_next_to_rook() {
        let p = Position::white_to_move(c(5, 5), c(1, 1), c(3, 4));
        assert_eq!(critical_square(&p), c(2, 3));
        let p = Position::white_to_move(c(5, 5), c(3, 7), c(3, 4));
        assert_eq!(critical_square(&p), c(3, 5));
    }

    #[test]
    fn divides_and_guards() {
        let p = Position::white_to_move(c(5, 0), c(1, 6), c(3, 3));
        assert!(rook_divides(&p));
        assert!(!rook_guarded(&Position::white_to_move(c(7, 7), c(2, 3), c(3, 3))));
        assert!(rook_guarded(&Position::white_to_move(c(4, 4), c(1, 3), c(3, 3))));
    }

    #[test]
    fn l_pattern_both_orientations() {
        assert!(l_pattern(&Position::white_to_move(c(2, 3), c(0, 3), c(2, 2))));
        assert!(l_pattern(&Position::white_to_move(c(3, 2), c(3, 0), c(4, 2))));
        assert!(!l_pattern(&Position::white_to_move(c(2, 3), c(0, 3), c(2, 1))));
    }

    #[test]
    fn back_move_detects_retreat() {
        let board = Board::square(6).unwrap();
        let before = Position::white_to_move(c(3, 2), c(0, 2), c(1, 4));
        let after = Position::black_to_move(c(2, 2), c(0, 2), c(1, 4));
        assert!(back_move(&board, &before, &after));
        let after = Position::black_to_move(c(4, 2), c(0, 2), c(1, 4));
        assert!(!back_move(&board, &before, &after));
    }
}
