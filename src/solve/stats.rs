//! Aggregates read back from a solved table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chess::rules::Rules;
use crate::core::key::PositionKey;
use crate::core::position::Position;
use crate::strategy::measures::{progress, room};
use crate::strategy::{Rule, Strategy};
use crate::table::{Objective, Outcome, TableStore};

/// Open positions per resolved distance.
pub fn histogram(table: &TableStore, objective: Objective) -> BTreeMap<u16, usize> {
    let mut out = BTreeMap::new();
    for (_, r) in table.iter() {
        if let Outcome::Mate(d) = r.outcome(objective) {
            *out.entry(d).or_insert(0) += 1;
        }
    }
    out
}

pub fn unknown_count(table: &TableStore, objective: Objective) -> usize {
    table
        .iter()
        .filter(|(_, r)| r.outcome(objective) == Outcome::Unknown)
        .count()
}

pub fn unknown_keys(table: &TableStore, objective: Objective) -> Vec<PositionKey> {
    table
        .iter()
        .filter(|(_, r)| r.outcome(objective) == Outcome::Unknown)
        .map(|(k, _)| k)
        .collect()
}

/// Number of open positions whose strategy move came from each rule.
pub fn rule_usage(table: &TableStore) -> BTreeMap<Rule, usize> {
    let mut out = BTreeMap::new();
    for key in table.open_keys() {
        if let Some(rule) = table.get(key).rule {
            *out.entry(rule).or_insert(0) += 1;
        }
    }
    out
}

/// How the strategy's moves relate to optimal play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrategyComparison {
    /// Open positions with both an optimal and a strategy move.
    pub positions: usize,
    /// The strategy plays the optimal successor.
    pub optimal_choices: usize,
    /// The optimal move shrinks the black king's room.
    pub optimal_room_decreases: usize,
    /// The strategy move shrinks the black king's room.
    pub strategy_room_decreases: usize,
    /// The strategy move lowers the progress measure.
    pub strategy_progress_decreases: usize,
}

pub fn compare_with_optimal(table: &TableStore) -> StrategyComparison {
    let board = *table.board();
    let mut cmp = StrategyComparison::default();
    for key in table.open_keys() {
        let r = table.get(key);
        let (Some(opt), Some(strat)) = (r.optimal_successor, r.strategy_successor) else {
            continue;
        };
        let p = table.position(key);
        let po = table.position(opt);
        let ps = table.position(strat);
        cmp.positions += 1;
        if opt == strat {
            cmp.optimal_choices += 1;
        }
        if room(&board, &p) > room(&board, &po) {
            cmp.optimal_room_decreases += 1;
        }
        if room(&board, &p) > room(&board, &ps) {
            cmp.strategy_room_decreases += 1;
        }
        if progress(&board, &p) > progress(&board, &ps) {
            cmp.strategy_progress_decreases += 1;
        }
    }
    cmp
}

/// Rules allowed to leave the progress measure where it was.
const PROGRESS_EXEMPT: [Rule; 3] = [Rule::ReadyToMate, Rule::RookHome, Rule::RookSafe];

/// Starting positions with a progress measure at or below this are not checked.
pub const PROGRESS_FLOOR: i32 = 24;

/// Strategy moves per checked line.
const LINE_MOVES: u32 = 3;

/// Lines of three strategy moves, each answered by any black reply, along which the
/// progress measure failed to drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TerminationReport {
    pub starting_positions: usize,
    pub stalled_lines: usize,
    /// Starting keys with at least one stalled line, ascending.
    pub stalled_positions: Vec<PositionKey>,
}

impl TerminationReport {
    /// Progress drops along every checked line.
    pub fn holds(&self) -> bool {
        self.stalled_lines == 0
    }
}

/// Follow `strategy` for three moves from every open position and count the lines whose
/// final progress is not below the starting one.
///
/// Lines through a move of [`PROGRESS_EXEMPT`], through an undefined strategy move or
/// through a rook capture are not counted.
pub fn termination_check(table: &TableStore, strategy: &Strategy) -> TerminationReport {
    let rules = *table.rules();
    let mut report = TerminationReport::default();
    for key in table.open_keys() {
        report.starting_positions += 1;
        let start = table.position(key);
        let measure = progress(&rules.board, &start);
        if measure <= PROGRESS_FLOOR {
            continue;
        }
        let stalled = stalled_lines(&rules, strategy, &start, measure, LINE_MOVES);
        if stalled > 0 {
            report.stalled_lines += stalled;
            report.stalled_positions.push(key);
        }
    }
    if report.holds() {
        log::info!(
            "progress drops within {LINE_MOVES} strategy moves from all {} positions",
            report.starting_positions
        );
    } else {
        log::warn!(
            "progress stalls on {} lines from {} starting positions",
            report.stalled_lines,
            report.stalled_positions.len()
        );
    }
    report
}

fn stalled_lines(
    rules: &Rules,
    strategy: &Strategy,
    p: &Position,
    start: i32,
    moves: u32,
) -> usize {
    let Some(m) = strategy.choose(rules, p) else {
        return 0;
    };
    if PROGRESS_EXEMPT.contains(&m.rule) {
        return 0;
    }
    rules
        .black_moves(&m.successor)
        .iter()
        .filter(|reply| !reply.rook_captured)
        .map(|reply| {
            if moves == 1 {
                usize::from(progress(&rules.board, reply) >= start)
            } else {
                stalled_lines(rules, strategy, reply, start, moves - 1)
            }
        })
        .sum()
}
