//! Backward induction over the table.
//!
//! Both fixed points share one relaxation loop: every open white-to-move key looks at a
//! white move, evaluates all black replies from the table, and lowers its own distance
//! when the move proves a shorter forced mate. The loop stops after the first pass with
//! no update.
//!
//! - [`optimal`]: white minimises over all legal moves.
//! - [`verify`]: white plays the single move picked by the strategy.
//! - [`stats`]: histograms and other aggregates read back from the table.
//! - [`minimax`]: explicit game-tree search used to cross-check the table.

pub mod minimax;
pub mod optimal;
pub mod stats;
pub mod verify;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::chess::rules::Rules;
use crate::config::SolverConfig;
use crate::core::key::{KeyCodec, PositionKey};
use crate::core::position::Position;
use crate::error::KrkError;
use crate::table::{Objective, Outcome, TableStore};

/// How a pass reads the distances it depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Relaxation {
    /// In place: later keys in a pass already see earlier updates of the same pass.
    #[default]
    GaussSeidel,
    /// Every pass reads a snapshot taken before it started.
    Jacobi,
}

impl FromStr for Relaxation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gauss-seidel" | "gs" => Ok(Relaxation::GaussSeidel),
            "jacobi" => Ok(Relaxation::Jacobi),
            other => Err(format!(
                "unknown relaxation '{other}' (expected gauss-seidel or jacobi)"
            )),
        }
    }
}

impl std::fmt::Display for Relaxation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relaxation::GaussSeidel => f.write_str("gauss-seidel"),
            Relaxation::Jacobi => f.write_str("jacobi"),
        }
    }
}

/// Black's best defence against one white move, as far as the table currently knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Some reply reaches a draw or a position not yet proven lost.
    Escape,
    /// No reply and in check.
    Mated,
    /// No reply and not in check.
    Stalemated,
    /// Every reply is a proven loss; the longest one.
    Longest(u16),
}

impl Reply {
    /// Distance in plies the white move proves, if any.
    #[inline]
    pub fn proven_distance(self) -> Option<u16> {
        match self {
            Reply::Mated => Some(1),
            Reply::Longest(d) => Some(d.saturating_add(2)),
            Reply::Escape | Reply::Stalemated => None,
        }
    }
}

/// Evaluate every legal black reply in `after` (black to move) through `lookup`.
pub fn evaluate_replies(
    rules: &Rules,
    codec: &KeyCodec,
    after: &Position,
    lookup: &dyn Fn(PositionKey) -> Outcome,
) -> Reply {
    let mut longest: Option<u16> = None;
    for reply in rules.black_candidates(after) {
        if !rules.is_legal_black_move(after, &reply) {
            continue;
        }
        match lookup(codec.encode(&reply)) {
            Outcome::Mate(d) => longest = Some(longest.map_or(d, |m| m.max(d))),
            _ => return Reply::Escape,
        }
    }
    match longest {
        Some(d) => Reply::Longest(d),
        None if rules.rook_attacks_king(after) => Reply::Mated,
        None => Reply::Stalemated,
    }
}

/// A lowered distance found for one key in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Improvement {
    pub distance: u16,
    /// White's move realising it, recorded only for the optimal objective.
    pub successor: Option<PositionKey>,
}

/// Everything a per-key step needs besides the distances.
pub(crate) struct StepContext<'a> {
    pub rules: &'a Rules,
    pub codec: &'a KeyCodec,
    pub table: &'a TableStore,
}

/// Per-pass aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub pass: usize,
    pub updates: usize,
    pub unknown: usize,
    /// Positions per resolved distance.
    pub histogram: BTreeMap<u16, usize>,
}

/// Result of running one fixed point to convergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub objective: Objective,
    pub relaxation: Relaxation,
    pub passes: Vec<PassStats>,
}

impl SolveReport {
    /// Number of passes, including the final one without updates.
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn final_pass(&self) -> Option<&PassStats> {
        self.passes.last()
    }

    pub fn unknown(&self) -> usize {
        self.final_pass().map_or(0, |p| p.unknown)
    }

    pub fn max_distance(&self) -> Option<u16> {
        self.final_pass()
            .and_then(|p| p.histogram.keys().next_back().copied())
    }
}

/// Run `step` over `keys` until a pass makes no update.
///
/// `step` gets the key, its current outcome and a lookup for the outcomes it depends on;
/// it returns an improvement only when the new distance is strictly smaller. `on_pass`
/// sees the table after every pass, the final one included.
pub(crate) fn run_fixed_point<F>(
    table: &mut TableStore,
    objective: Objective,
    relaxation: Relaxation,
    keys: &[PositionKey],
    step: F,
    on_pass: &mut dyn FnMut(&TableStore, &PassStats),
) -> Result<SolveReport, KrkError>
where
    F: Fn(&StepContext<'_>, PositionKey, Outcome, &dyn Fn(PositionKey) -> Outcome) -> Option<Improvement>,
{
    let rules = *table.rules();
    let codec = *table.codec();
    let mut passes = Vec::new();

    loop {
        let pass = passes.len() + 1;
        let snapshot = match relaxation {
            Relaxation::Jacobi => Some(table.snapshot(objective)?),
            Relaxation::GaussSeidel => None,
        };

        let mut updates = 0usize;
        for &key in keys {
            let improvement = {
                let t: &TableStore = table;
                let ctx = StepContext {
                    rules: &rules,
                    codec: &codec,
                    table: t,
                };
                let current = t.get(key).outcome(objective);
                match &snapshot {
                    Some(s) => step(&ctx, key, current, &|k: PositionKey| s[k as usize]),
                    None => step(&ctx, key, current, &|k: PositionKey| t.get(k).outcome(objective)),
                }
            };
            if let Some(imp) = improvement {
                let record = table.get_mut(key);
                record.set_outcome(objective, Outcome::Mate(imp.distance));
                if objective == Objective::Optimal {
                    record.optimal_successor = imp.successor;
                }
                updates += 1;
            }
        }

        let stats = PassStats {
            pass,
            updates,
            unknown: stats::unknown_count(table, objective),
            histogram: stats::histogram(table, objective),
        };
        log::debug!(
            "{:?} pass {}: {} updates, {} unknown",
            objective,
            pass,
            stats.updates,
            stats.unknown
        );
        on_pass(table, &stats);
        passes.push(stats);
        if updates == 0 {
            break;
        }
    }

    Ok(SolveReport {
        objective,
        relaxation,
        passes,
    })
}

/// A table together with whatever fixed points a [`SolverConfig`] asked for.
#[derive(Debug)]
pub struct Run {
    pub table: TableStore,
    pub optimal: Option<SolveReport>,
    pub verdict: Option<verify::Verdict>,
    pub termination: Option<stats::TerminationReport>,
}

/// Build the table for `config.board` and run the requested fixed points.
pub fn run(config: &SolverConfig) -> Result<Run, KrkError> {
    let mut table = TableStore::new(config.board)?;
    let optimal = if config.optimal {
        Some(optimal::solve_optimal(&mut table, config.relaxation)?)
    } else {
        None
    };
    let verdict = if config.verify_strategy {
        Some(verify::verify_strategy(
            &mut table,
            &config.strategy,
            config.relaxation,
        )?)
    } else {
        None
    };
    let termination = config
        .termination
        .then(|| stats::termination_check(&table, &config.strategy));
    Ok(Run {
        table,
        optimal,
        verdict,
        termination,
    })
}

/// Whether `candidate` is strictly better than `current`.
#[inline]
pub(crate) fn improves(candidate: u16, current: Outcome) -> bool {
    match current {
        Outcome::Mate(d) => candidate < d,
        Outcome::Unknown => true,
        Outcome::Illegal | Outcome::Draw => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::core::coord::Coord;

    #[test]
    fn relaxation_parses() {
        assert_eq!("jacobi".parse::<Relaxation>(), Ok(Relaxation::Jacobi));
        assert_eq!("gauss-seidel".parse::<Relaxation>(), Ok(Relaxation::GaussSeidel));
        assert!("sor".parse::<Relaxation>().is_err());
        assert_eq!(Relaxation::default().to_string(), "gauss-seidel");
    }

    #[test]
    fn run_checks_termination_only_on_request() {
        let config = SolverConfig::new(4, 4)
            .unwrap()
            .with_optimal(false)
            .with_strategy(false);
        let plain = run(&config).unwrap();
        assert!(plain.optimal.is_none() && plain.verdict.is_none());
        assert!(plain.termination.is_none());

        let checked = run(&config.with_termination(true)).unwrap();
        let report = checked.termination.unwrap();
        assert_eq!(report.starting_positions, 1312);
        assert!(report.holds());
    }

    #[test]
    fn replies_classify_terminal_positions() {
        let board = Board::square(4).unwrap();
        let rules = Rules::new(board);
        let codec = board.codec();
        let unknown = |_k: PositionKey| Outcome::Unknown;

        let mate = Position::black_to_move(Coord::new(2, 1), Coord::new(0, 0), Coord::new(0, 3));
        assert_eq!(evaluate_replies(&rules, &codec, &mate, &unknown), Reply::Mated);

        let stale = Position::black_to_move(Coord::new(2, 0), Coord::new(0, 0), Coord::new(1, 1));
        assert_eq!(evaluate_replies(&rules, &codec, &stale, &unknown), Reply::Stalemated);

        let open = Position::black_to_move(Coord::new(3, 3), Coord::new(0, 0), Coord::new(2, 2));
        assert_eq!(evaluate_replies(&rules, &codec, &open, &unknown), Reply::Escape);
        let all_lost = |_k: PositionKey| Outcome::Mate(3);
        assert_eq!(
            evaluate_replies(&rules, &codec, &open, &all_lost),
            Reply::Longest(3)
        );
        assert_eq!(Reply::Longest(3).proven_distance(), Some(5));
    }
}
