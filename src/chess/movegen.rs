//! Move generation and move validation.
//!
//! Candidates are produced in a fixed order that the strategy relies on for tie-breaking:
//! the eight king steps (in [`KING_STEPS`] order), then rook destinations along the rank
//! by ascending file, then along the file by ascending rank. Candidates that are not legal
//! moves are filtered by the validators.

use crate::chess::rules::{line_is_open, Rules};
use crate::core::coord::{Coord, KING_STEPS};
use crate::core::position::{Position, Side};

impl Rules {
    /// Raw white candidates, legal or not. Empty unless white is to move.
    pub fn white_candidates<'a>(&'a self, p: &'a Position) -> impl Iterator<Item = Position> + 'a {
        let active = p.to_move == Side::White;
        let rook_moves = active && !p.rook_captured;
        let king = KING_STEPS.iter().filter(move |_| active).map(move |&d| Position {
            to_move: Side::Black,
            white_king: p.white_king + d,
            ..*p
        });
        let along_rank = (0..self.board.files()).filter(move |_| rook_moves).map(move |x| Position {
            to_move: Side::Black,
            rook: Coord::new(x, p.rook.y),
            ..*p
        });
        let along_file = (0..self.board.ranks()).filter(move |_| rook_moves).map(move |y| Position {
            to_move: Side::Black,
            rook: Coord::new(p.rook.x, y),
            ..*p
        });
        king.chain(along_rank).chain(along_file)
    }

    /// Raw black king steps; stepping onto the rook captures it.
    pub fn black_candidates<'a>(&'a self, p: &'a Position) -> impl Iterator<Item = Position> + 'a {
        let active = p.to_move == Side::Black;
        KING_STEPS.iter().filter(move |_| active).map(move |&d| {
            let black_king = p.black_king + d;
            Position {
                to_move: Side::White,
                black_king,
                rook_captured: p.rook_captured || black_king == p.rook,
                ..*p
            }
        })
    }

    /// `to` is reachable from `from` by one legal white move.
    pub fn is_legal_white_move(&self, from: &Position, to: &Position) -> bool {
        if from.to_move != Side::White
            || to.to_move != Side::Black
            || from.rook_captured
            || to.rook_captured
            || from.black_king != to.black_king
        {
            return false;
        }
        let king_move = from.rook == to.rook && from.white_king.chebyshev(to.white_king) == 1;
        let rook_move = from.white_king == to.white_king
            && line_is_open(from.rook, to.rook, &[from.white_king, from.black_king]);
        (king_move || rook_move) && self.is_legal_black_to_move(to)
    }

    /// `to` is reachable from `from` by one legal black move.
    pub fn is_legal_black_move(&self, from: &Position, to: &Position) -> bool {
        if from.to_move != Side::Black
            || to.to_move != Side::White
            || from.white_king != to.white_king
            || from.rook != to.rook
            || from.black_king.chebyshev(to.black_king) != 1
        {
            return false;
        }
        let captures = !from.rook_captured && to.black_king == from.rook;
        to.rook_captured == (from.rook_captured || captures) && self.is_legal_white_to_move(to)
    }

    /// Legal white moves in candidate order.
    pub fn white_moves(&self, p: &Position) -> Vec<Position> {
        self.white_candidates(p)
            .filter(|q| self.is_legal_white_move(p, q))
            .collect()
    }

    /// Legal black moves in candidate order.
    pub fn black_moves(&self, p: &Position) -> Vec<Position> {
        self.black_candidates(p)
            .filter(|q| self.is_legal_black_move(p, q))
            .collect()
    }

    pub fn black_has_move(&self, p: &Position) -> bool {
        self.black_candidates(p).any(|q| self.is_legal_black_move(p, &q))
    }
}

#[cfg(test)]
mod tests {
    use crate::chess::rules::Rules;
    use crate::core::board::Board;
    use crate::core::coord::Coord;
    use crate::core::position::Position;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn rook_cannot_jump_or_stand_still() {
        let rules = Rules::new(Board::square(8).unwrap());
        let p = Position::white_to_move(c(3, 0), c(7, 7), c(0, 0));
        let moves = rules.white_moves(&p);
        assert!(moves.iter().all(|q| q.rook != c(0, 0) || q.white_king != c(3, 0)));
        assert!(moves.iter().any(|q| q.rook == c(2, 0)));
        assert!(!moves.iter().any(|q| q.rook == c(4, 0)));
        // Two along the rank, seven along the file.
        let rook_moves = moves.iter().filter(|q| q.white_king == c(3, 0)).count();
        assert_eq!(rook_moves, 9);
    }

    #[test]
    fn candidate_order_is_king_then_rank_then_file() {
        let rules = Rules::new(Board::square(4).unwrap());
        let p = Position::white_to_move(c(0, 3), c(3, 0), c(1, 1));
        let moves = rules.white_moves(&p);
        let first_rook = moves.iter().position(|q| q.rook != p.rook).unwrap();
        assert!(moves[..first_rook].iter().all(|q| q.rook == p.rook));
        let rook_targets: Vec<Coord> = moves[first_rook..].iter().map(|q| q.rook).collect();
        assert_eq!(rook_targets, vec![c(0, 1), c(2, 1), c(3, 1), c(1, 0), c(1, 2), c(1, 3)]);
    }

    #[test]
    fn black_captures_unprotected_rook_only() {
        let rules = Rules::new(Board::square(6).unwrap());
        let hanging = Position::black_to_move(c(5, 5), c(2, 2), c(3, 3));
        assert!(rules.black_moves(&hanging).iter().any(|q| q.rook_captured));
        let guarded = Position::black_to_move(c(4, 4), c(2, 2), c(3, 3));
        assert!(!rules.black_moves(&guarded).iter().any(|q| q.rook_captured));
    }

    #[test]
    fn black_cannot_step_along_rook_line() {
        let rules = Rules::new(Board::square(6).unwrap());
        let p = Position::black_to_move(c(5, 0), c(2, 2), c(0, 3));
        let moves = rules.black_moves(&p);
        assert!(moves.iter().all(|q| q.black_king.y != 3));
        assert_eq!(moves.len(), 5);
    }
}
