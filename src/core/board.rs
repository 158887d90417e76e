use crate::core::coord::Coord;
use crate::core::key::KeyCodec;
use crate::error::{Axis, KrkError};

/// Largest supported extent on either axis.
///
/// Bounded by the widest bit-width bucket (5 bits) used by the key codec.
pub const MAX_DIMENSION: u32 = 32;

/// A rectangular `files x ranks` board with the key bit widths derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    files: i32,
    ranks: i32,
    file_bits: u32,
    rank_bits: u32,
}

impl Board {
    pub fn new(files: u32, ranks: u32) -> Result<Self, KrkError> {
        let file_bits = bucket_bits(files).ok_or(KrkError::InvalidDimension {
            axis: Axis::Files,
            value: files,
            max: MAX_DIMENSION,
        })?;
        let rank_bits = bucket_bits(ranks).ok_or(KrkError::InvalidDimension {
            axis: Axis::Ranks,
            value: ranks,
            max: MAX_DIMENSION,
        })?;
        Ok(Self {
            files: files as i32,
            ranks: ranks as i32,
            file_bits,
            rank_bits,
        })
    }

    /// Square board shortcut.
    pub fn square(dim: u32) -> Result<Self, KrkError> {
        Self::new(dim, dim)
    }

    #[inline]
    pub fn files(&self) -> i32 {
        self.files
    }

    #[inline]
    pub fn ranks(&self) -> i32 {
        self.ranks
    }

    #[inline]
    pub fn file_bits(&self) -> u32 {
        self.file_bits
    }

    #[inline]
    pub fn rank_bits(&self) -> u32 {
        self.rank_bits
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.files == self.ranks
    }

    #[inline]
    pub fn last_file(&self) -> i32 {
        self.files - 1
    }

    #[inline]
    pub fn last_rank(&self) -> i32 {
        self.ranks - 1
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.files && c.y < self.ranks
    }

    #[inline]
    pub fn codec(&self) -> KeyCodec {
        KeyCodec::new(self)
    }

    /// The same board with files and ranks swapped.
    pub fn transposed(&self) -> Board {
        Board {
            files: self.ranks,
            ranks: self.files,
            file_bits: self.rank_bits,
            rank_bits: self.file_bits,
        }
    }

    /// Iterate every on-board square, file-major.
    pub fn squares(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.files).flat_map(move |x| (0..self.ranks).map(move |y| Coord::new(x, y)))
    }
}

/// Bit bucket for one axis: 2, 3, 4 or 5 bits.
fn bucket_bits(dim: u32) -> Option<u32> {
    match dim {
        1..=4 => Some(2),
        5..=8 => Some(3),
        9..=16 => Some(4),
        17..=32 => Some(5),
        _ => None,
    }
}
