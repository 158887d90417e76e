use crate::chess::symmetry::Symmetry;
use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::position::{Position, Side};

/// Rules for king and rook against a lone king on a bounded rectangular board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub board: Board,
}

impl Rules {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// Every coordinate is on the board, including a captured rook's last square.
    #[inline]
    pub fn in_bounds(&self, p: &Position) -> bool {
        self.board.contains(p.white_king)
            && self.board.contains(p.black_king)
            && self.board.contains(p.rook)
    }

    #[inline]
    pub fn kings_adjacent(&self, p: &Position) -> bool {
        p.white_king.touches(p.black_king)
    }

    /// The rook (if present) shares a square with a king.
    #[inline]
    pub fn pieces_collide(&self, p: &Position) -> bool {
        !p.rook_captured && (p.rook == p.white_king || p.rook == p.black_king)
    }

    /// The rook gives check: same file or rank as the black king with the white king not
    /// strictly between them.
    pub fn rook_attacks_king(&self, p: &Position) -> bool {
        !p.rook_captured && line_is_open(p.rook, p.black_king, &[p.white_king])
    }

    /// True iff the position respects basic legality constraints:
    /// - all pieces on the board
    /// - kings not adjacent
    /// - the rook does not share a king's square
    fn is_legal_placement(&self, p: &Position) -> bool {
        self.in_bounds(p) && !self.kings_adjacent(p) && !self.pieces_collide(p)
    }

    /// Legal with white to move: black must not be in check.
    pub fn is_legal_white_to_move(&self, p: &Position) -> bool {
        p.to_move == Side::White && self.is_legal_placement(p) && !self.rook_attacks_king(p)
    }

    pub fn is_legal_black_to_move(&self, p: &Position) -> bool {
        p.to_move == Side::Black && self.is_legal_placement(p)
    }

    /// Black to move, in check, with no legal reply.
    pub fn is_mate(&self, p: &Position) -> bool {
        self.is_legal_black_to_move(p) && self.rook_attacks_king(p) && !self.black_has_move(p)
    }

    /// Stalemate as recognised by the pattern whitelist: black to move with the rook on the
    /// board, matching an entry of [`STALEMATE_PATTERNS`] in one of the eight corner frames.
    pub fn is_stalemate(&self, p: &Position) -> bool {
        if p.rook_captured || p.to_move != Side::Black {
            return false;
        }
        Symmetry::ALL.iter().any(|s| {
            let frame = s.image_board(&self.board);
            let q = s.apply(&self.board, p);
            STALEMATE_PATTERNS.iter().any(|pat| pat.applies(&frame, &q))
        })
    }

    /// Stalemate derived from the move rules: legal, black to move, not in check, no reply.
    pub fn is_stalemate_by_rules(&self, p: &Position) -> bool {
        self.is_legal_black_to_move(p)
            && !p.rook_captured
            && !self.rook_attacks_king(p)
            && !self.black_has_move(p)
    }

    /// Every legal black-to-move position on which the whitelist and the move rules disagree.
    pub fn whitelist_discrepancies(&self) -> Vec<Position> {
        let mut out = Vec::new();
        for wk in self.board.squares() {
            for bk in self.board.squares() {
                for rook in self.board.squares() {
                    let p = Position::black_to_move(wk, bk, rook);
                    if !self.is_legal_black_to_move(&p) {
                        continue;
                    }
                    if self.is_stalemate(&p) != self.is_stalemate_by_rules(&p) {
                        out.push(p);
                    }
                }
            }
        }
        out
    }
}

/// `from` and `to` are distinct, share a file or rank, and no blocker sits strictly between.
pub(crate) fn line_is_open(from: Coord, to: Coord, blockers: &[Coord]) -> bool {
    if from == to || (from.x != to.x && from.y != to.y) {
        return false;
    }
    let dist = from.chebyshev(to);
    let dir = Coord::new((to.x - from.x).signum(), (to.y - from.y).signum());
    blockers.iter().all(|&b| {
        let w = b - from;
        let aligned = if dir.x == 0 { w.x == 0 } else { w.y == 0 };
        let along = w.x * dir.x + w.y * dir.y;
        !(aligned && along > 0 && along < dist)
    })
}

/// A stalemate shape in a corner frame where the black king sits on the origin corner.
pub struct StalematePattern {
    /// Smallest frame the shape fits in, as (files, ranks).
    pub min_extent: (i32, i32),
    matches: fn(&Position) -> bool,
}

impl StalematePattern {
    fn applies(&self, frame: &Board, p: &Position) -> bool {
        frame.files() >= self.min_extent.0 && frame.ranks() >= self.min_extent.1 && (self.matches)(p)
    }
}

pub const STALEMATE_PATTERNS: [StalematePattern; 2] = [
    // King a knight's jump away guards b1 and a2 is covered by the rook on b2.
    StalematePattern {
        min_extent: (3, 2),
        matches: rook_diagonal,
    },
    // Rook holds the second rank, white king opposes on c1.
    StalematePattern {
        min_extent: (3, 2),
        matches: rook_second_rank,
    },
];

fn rook_diagonal(p: &Position) -> bool {
    p.black_king == Coord::ORIGIN
        && p.rook == Coord::new(1, 1)
        && p.white_king.x == 2
        && p.white_king.y < 3
}

fn rook_second_rank(p: &Position) -> bool {
    p.black_king == Coord::ORIGIN && p.rook.x > 0 && p.rook.y == 1 && p.white_king == Coord::new(2, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn rook_check_is_blocked_by_white_king() {
        let rules = Rules::new(Board::square(8).unwrap());
        let p = Position::white_to_move(c(0, 3), c(0, 0), c(0, 7));
        assert!(!rules.rook_attacks_king(&p));
        assert!(rules.is_legal_white_to_move(&p));
        let p = Position::white_to_move(c(1, 3), c(0, 0), c(0, 7));
        assert!(rules.rook_attacks_king(&p));
        assert!(!rules.is_legal_white_to_move(&p));
        assert!(rules.is_legal_black_to_move(&Position { to_move: Side::Black, ..p }));
    }

    #[test]
    fn placement_constraints() {
        let rules = Rules::new(Board::square(4).unwrap());
        assert!(!rules.is_legal_black_to_move(&Position::black_to_move(c(1, 1), c(0, 0), c(3, 3))));
        assert!(!rules.is_legal_black_to_move(&Position::black_to_move(c(2, 2), c(0, 0), c(2, 2))));
        assert!(!rules.is_legal_black_to_move(&Position::black_to_move(c(2, 2), c(0, 0), c(4, 2))));
        let captured = Position {
            rook_captured: true,
            ..Position::white_to_move(c(3, 3), c(0, 0), c(0, 0))
        };
        assert!(rules.is_legal_white_to_move(&captured));
    }

    #[test]
    fn corner_stalemate_is_recognised() {
        let rules = Rules::new(Board::square(4).unwrap());
        let p = Position::black_to_move(c(2, 0), c(0, 0), c(1, 1));
        assert!(rules.is_stalemate(&p));
        assert!(rules.is_stalemate_by_rules(&p));
        assert!(!rules.is_mate(&p));
        let mirrored = Position::black_to_move(c(3, 1), c(3, 3), c(2, 2));
        assert!(rules.is_stalemate(&mirrored));
    }

    #[test]
    fn back_rank_mate() {
        let rules = Rules::new(Board::square(4).unwrap());
        let p = Position::black_to_move(c(2, 1), c(0, 0), c(0, 3));
        assert!(rules.is_mate(&p));
        assert!(!rules.is_stalemate(&p));
    }

    #[test]
    fn whitelist_agrees_with_move_rules() {
        for (f, r) in [(3, 3), (4, 4), (3, 4), (4, 5)] {
            let rules = Rules::new(Board::new(f, r).unwrap());
            assert!(rules.whitelist_discrepancies().is_empty(), "{f}x{r}");
        }
    }
}
