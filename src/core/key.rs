use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::position::{Position, Side};

pub type PositionKey = u32;

/// Packs/unpacks a position into a compact [`PositionKey`].
///
/// Encoding, least significant field first:
/// - white king x, y
/// - black king x, y
/// - rook x, y
/// - rook-captured bit
/// - white-to-move bit
///
/// x fields use the board's file width, y fields its rank width. Every key below
/// [`KeyCodec::key_space`] decodes to a representable (not necessarily legal) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCodec {
    file_bits: u32,
    rank_bits: u32,
    file_mask: u32,
    rank_mask: u32,
}

impl KeyCodec {
    pub fn new(board: &Board) -> Self {
        let file_bits = board.file_bits();
        let rank_bits = board.rank_bits();
        Self {
            file_bits,
            rank_bits,
            file_mask: (1u32 << file_bits) - 1,
            rank_mask: (1u32 << rank_bits) - 1,
        }
    }

    /// Number of distinct keys: `4 * (2^fb)^3 * (2^rb)^3`.
    #[inline]
    pub fn key_space(&self) -> u64 {
        4u64 << (3 * (self.file_bits + self.rank_bits))
    }

    /// True iff every coordinate fits its bit field.
    pub fn is_representable(&self, p: &Position) -> bool {
        let fits = |c: Coord| {
            c.x >= 0 && c.y >= 0 && c.x as u32 <= self.file_mask && c.y as u32 <= self.rank_mask
        };
        fits(p.white_king) && fits(p.black_king) && fits(p.rook)
    }

    pub fn encode(&self, p: &Position) -> PositionKey {
        debug_assert!(self.is_representable(p), "unrepresentable position {p:?}");
        let mut k: u64 = p.is_white_to_move() as u64;
        k = (k << 1) | p.rook_captured as u64;
        for c in [p.rook, p.black_king, p.white_king] {
            k = (k << self.rank_bits) | (c.y as u64 & self.rank_mask as u64);
            k = (k << self.file_bits) | (c.x as u64 & self.file_mask as u64);
        }
        k as PositionKey
    }

    pub fn decode(&self, key: PositionKey) -> Position {
        let (fb, rb) = (self.file_bits, self.rank_bits);
        let mut k = key as u64;
        let mut field = |bits: u32| {
            let v = (k & ((1u64 << bits) - 1)) as i32;
            k >>= bits;
            v
        };
        let white_king = Coord::new(field(fb), field(rb));
        let black_king = Coord::new(field(fb), field(rb));
        let rook = Coord::new(field(fb), field(rb));
        let rook_captured = field(1) == 1;
        let to_move = if field(1) == 1 {
            Side::White
        } else {
            Side::Black
        };
        Position {
            to_move,
            rook_captured,
            white_king,
            black_king,
            rook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_space_matches_bit_widths() {
        let codec = KeyCodec::new(&Board::square(4).unwrap());
        assert_eq!(codec.key_space(), 4 * 4u64.pow(6));
        let codec = KeyCodec::new(&Board::new(4, 5).unwrap());
        assert_eq!(codec.key_space(), 4 * 4u64.pow(3) * 8u64.pow(3));
        let codec = KeyCodec::new(&Board::square(32).unwrap());
        assert_eq!(codec.key_space(), 1u64 << 32);
    }

    #[test]
    fn field_layout() {
        let codec = KeyCodec::new(&Board::square(4).unwrap());
        let p = Position::white_to_move(Coord::new(1, 0), Coord::ORIGIN, Coord::ORIGIN);
        assert_eq!(codec.encode(&p), 1 | (1 << 13));
        let p = Position::black_to_move(Coord::ORIGIN, Coord::ORIGIN, Coord::new(0, 3));
        assert_eq!(codec.encode(&p), 3 << 10);
    }

    #[test]
    fn widest_board_uses_all_32_bits() {
        let board = Board::square(32).unwrap();
        let codec = KeyCodec::new(&board);
        let p = Position::white_to_move(Coord::new(31, 31), Coord::new(31, 0), Coord::new(0, 31));
        let key = codec.encode(&p);
        assert!(key >= 1 << 31);
        assert_eq!(codec.decode(key), p);
    }
}
