use std::path::PathBuf;

use thiserror::Error;

/// Board axis named in configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Files,
    Ranks,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Files => f.write_str("files"),
            Axis::Ranks => f.write_str("ranks"),
        }
    }
}

/// Errors surfaced by the tablebase library.
///
/// Everything here is reported before or instead of a computation; unresolved positions and
/// strategy defects are results, not errors.
#[derive(Debug, Error)]
pub enum KrkError {
    #[error("invalid board {axis}: {value} (supported range is 1..={max})")]
    InvalidDimension { axis: Axis, value: u32, max: u32 },

    #[error("key space of {keys} positions does not fit in memory addressing on this target")]
    TableTooLarge { keys: u64 },

    #[error("allocation failed for a table of {records} records")]
    AllocationFailed { records: usize },

    #[error("io error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
