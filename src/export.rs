//! Flat text export of a solved table and the JSON run summary.
//!
//! The text format starts with one free-form header line, followed by two lines per open
//! position: the position itself, then the successor white chose. Each line holds eight
//! integers: white-to-move flag, rook-captured flag, BKx, BKy, WKx, WKy, WRx, WRy.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::position::Position;
use crate::solve::stats::{
    compare_with_optimal, rule_usage, StrategyComparison, TerminationReport,
};
use crate::solve::verify::Verdict;
use crate::solve::SolveReport;
use crate::table::{Objective, TableStore};

pub const HEADER: &str = "Ignore this first line. Format: isWhiteTurn, isRookCaptured, BKx, BKy, WKx, WKy, WRx, WRy. One line for 'key', next line for 'value'.";

/// What an export wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportCounts {
    pub written: usize,
    /// Open positions left out because no successor was fixed.
    pub skipped: usize,
}

fn write_fields<W: Write>(w: &mut W, p: &Position) -> io::Result<()> {
    let f = p.export_fields();
    writeln!(
        w,
        "{} {} {} {} {} {} {} {}",
        f[0], f[1], f[2], f[3], f[4], f[5], f[6], f[7]
    )
}

/// Write every open position with its `objective` successor.
pub fn write_table<W: Write>(
    table: &TableStore,
    objective: Objective,
    w: &mut W,
) -> io::Result<ExportCounts> {
    writeln!(w, "{HEADER}")?;
    let mut counts = ExportCounts::default();
    for (p, succ) in table.successor_pairs(objective) {
        let Some(succ) = succ else {
            counts.skipped += 1;
            continue;
        };
        write_fields(w, &p)?;
        write_fields(w, &succ)?;
        counts.written += 1;
    }
    Ok(counts)
}

pub fn export_table(
    table: &TableStore,
    objective: Objective,
    path: &Path,
) -> Result<ExportCounts, crate::error::KrkError> {
    let io_err = |source| crate::error::KrkError::Io {
        path: path.to_path_buf(),
        source,
    };
    let f = fs::File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(f);
    let counts = write_table(table, objective, &mut w).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    if counts.skipped > 0 {
        log::warn!(
            "{}: {} positions without a successor were not exported",
            path.display(),
            counts.skipped
        );
    }
    log::info!("wrote {} positions to {}", counts.written, path.display());
    Ok(counts)
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub correct: bool,
    pub undefined: usize,
    pub unresolved: usize,
    pub rule_usage: BTreeMap<String, usize>,
    pub comparison: Option<StrategyComparison>,
    pub report: SolveReport,
}

/// Everything a run computed, in serialisable form.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub files: i32,
    pub ranks: i32,
    pub keys: usize,
    pub open_positions: usize,
    pub optimal: Option<SolveReport>,
    pub strategy: Option<StrategySummary>,
    pub termination: Option<TerminationReport>,
}

impl RunSummary {
    pub fn collect(
        table: &TableStore,
        optimal: Option<&SolveReport>,
        verdict: Option<&Verdict>,
        termination: Option<&TerminationReport>,
    ) -> Self {
        let strategy = verdict.map(|v| StrategySummary {
            correct: v.is_correct(),
            undefined: v.undefined.len(),
            unresolved: v.unresolved.len(),
            rule_usage: rule_usage(table)
                .into_iter()
                .map(|(rule, n)| (rule.name().to_string(), n))
                .collect(),
            comparison: optimal.map(|_| compare_with_optimal(table)),
            report: v.report.clone(),
        });
        Self {
            files: table.board().files(),
            ranks: table.board().ranks(),
            keys: table.len(),
            open_positions: table.open_keys().count(),
            optimal: optimal.cloned(),
            strategy,
            termination: termination.cloned(),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<(), crate::error::KrkError> {
        let io_err = |source| crate::error::KrkError::Io {
            path: path.to_path_buf(),
            source,
        };
        let f = fs::File::create(path).map_err(io_err)?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self).map_err(|e| io_err(io::Error::from(e)))?;
        w.flush().map_err(io_err)
    }
}
