use std::fmt::Write as _;

use crate::core::board::Board;
use crate::core::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Side to move.
pub enum Side {
    White,
    Black,
}

/// A KRK position: white king, white rook, black king.
///
/// When `rook_captured` is set the rook coordinate is meaningless (it keeps the square the
/// rook was taken on) and is ignored by every rule except the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub to_move: Side,
    pub rook_captured: bool,
    pub white_king: Coord,
    pub black_king: Coord,
    pub rook: Coord,
}

impl Position {
    /// A rook-present position.
    pub fn new(to_move: Side, white_king: Coord, black_king: Coord, rook: Coord) -> Self {
        Self {
            to_move,
            rook_captured: false,
            white_king,
            black_king,
            rook,
        }
    }

    #[inline]
    pub fn white_to_move(white_king: Coord, black_king: Coord, rook: Coord) -> Self {
        Self::new(Side::White, white_king, black_king, rook)
    }

    #[inline]
    pub fn black_to_move(white_king: Coord, black_king: Coord, rook: Coord) -> Self {
        Self::new(Side::Black, white_king, black_king, rook)
    }

    #[inline]
    pub fn is_white_to_move(&self) -> bool {
        self.to_move == Side::White
    }

    /// Apply `f` to every piece coordinate.
    pub fn map_coords(self, f: impl Fn(Coord) -> Coord) -> Position {
        Position {
            white_king: f(self.white_king),
            black_king: f(self.black_king),
            rook: f(self.rook),
            ..self
        }
    }

    /// The eight integers of the flat export format:
    /// side, captured, BKx, BKy, WKx, WKy, WRx, WRy.
    pub fn export_fields(&self) -> [i32; 8] {
        [
            self.is_white_to_move() as i32,
            self.rook_captured as i32,
            self.black_king.x,
            self.black_king.y,
            self.white_king.x,
            self.white_king.y,
            self.rook.x,
            self.rook.y,
        ]
    }

    /// Text diagram, top rank first.
    pub fn render(&self, board: &Board) -> String {
        let mut out = String::new();
        if self.rook_captured {
            out.push_str("Rook captured, ");
        }
        out.push_str(match self.to_move {
            Side::White => "White on turn\n",
            Side::Black => "Black on turn\n",
        });
        for y in (0..board.ranks()).rev() {
            for x in 0..board.files() {
                let c = Coord::new(x, y);
                let glyph = if c == self.white_king {
                    'K'
                } else if c == self.black_king {
                    'k'
                } else if !self.rook_captured && c == self.rook {
                    'R'
                } else {
                    ' '
                };
                let _ = write!(out, "|{glyph}");
            }
            out.push_str("|\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_pieces() {
        let board = Board::square(3).unwrap();
        let p = Position::white_to_move(Coord::new(2, 0), Coord::new(0, 2), Coord::new(1, 1));
        let text = p.render(&board);
        assert_eq!(text, "White on turn\n|k| | |\n| |R| |\n| | |K|\n");
    }

    #[test]
    fn export_field_order() {
        let p = Position::black_to_move(Coord::new(4, 5), Coord::new(2, 3), Coord::new(6, 7));
        assert_eq!(p.export_fields(), [0, 0, 2, 3, 4, 5, 6, 7]);
    }
}
