//! Depth-bounded game-tree search, independent of the table machinery.
//!
//! Slow and only meant for small boards, where it serves as an oracle for the fixed
//! points.

use rustc_hash::FxHashMap;

use crate::chess::rules::Rules;
use crate::core::board::Board;
use crate::core::position::Position;

/// Memoised "can white force mate within n plies" search.
#[derive(Debug, Clone)]
pub struct MinimaxOracle {
    rules: Rules,
    memo: FxHashMap<(Position, u16), bool>,
}

impl MinimaxOracle {
    pub fn new(board: Board) -> Self {
        Self {
            rules: Rules::new(board),
            memo: FxHashMap::default(),
        }
    }

    /// Number of memoised (position, horizon) entries.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// White to move in `p` forces mate in at most `plies` plies.
    pub fn white_wins_within(&mut self, p: &Position, plies: u16) -> bool {
        if plies == 0 || p.rook_captured {
            return false;
        }
        if let Some(&hit) = self.memo.get(&(*p, plies)) {
            return hit;
        }
        let rules = self.rules;
        let mut wins = false;
        for after in rules.white_moves(p) {
            if self.black_loses_within(&after, plies - 1) {
                wins = true;
                break;
            }
        }
        self.memo.insert((*p, plies), wins);
        wins
    }

    /// Black to move in `p` is mated now or cannot avoid mate within `plies` more plies.
    fn black_loses_within(&mut self, p: &Position, plies: u16) -> bool {
        let rules = self.rules;
        let replies = rules.black_moves(p);
        if replies.is_empty() {
            return rules.rook_attacks_king(p);
        }
        if plies == 0 {
            return false;
        }
        replies
            .iter()
            .all(|r| self.white_wins_within(r, plies - 1))
    }

    /// Shortest forced mate from `p` (white to move), searching up to `max_plies`.
    pub fn distance(&mut self, p: &Position, max_plies: u16) -> Option<u16> {
        (1..=max_plies)
            .step_by(2)
            .find(|&n| self.white_wins_within(p, n))
    }
}

/// One-shot helper: shortest forced mate from `p` on `board`, if within `max_plies`.
pub fn brute_force_distance(board: Board, p: &Position, max_plies: u16) -> Option<u16> {
    MinimaxOracle::new(board).distance(p, max_plies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;

    #[test]
    fn finds_mate_in_one() {
        let board = Board::square(4).unwrap();
        let p = Position::white_to_move(Coord::new(2, 1), Coord::new(0, 0), Coord::new(3, 3));
        assert_eq!(brute_force_distance(board, &p, 9), Some(1));
    }

    #[test]
    fn captured_rook_never_wins() {
        let board = Board::square(4).unwrap();
        let p = Position {
            rook_captured: true,
            ..Position::white_to_move(Coord::new(3, 3), Coord::new(0, 0), Coord::new(0, 0))
        };
        let mut oracle = MinimaxOracle::new(board);
        assert_eq!(oracle.distance(&p, 15), None);
        assert_eq!(oracle.memo_len(), 0);
    }
}
