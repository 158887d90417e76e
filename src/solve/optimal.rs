//! Exact distance-to-mate for every open key.

use crate::core::key::PositionKey;
use crate::error::KrkError;
use crate::solve::{
    evaluate_replies, improves, run_fixed_point, Improvement, PassStats, Relaxation,
    SolveReport, StepContext,
};
use crate::table::{Objective, Outcome, TableStore};

/// Lower `key` to the best distance any legal white move proves under `lookup`.
///
/// Ties keep the earliest move in enumeration order.
fn optimal_step(
    ctx: &StepContext<'_>,
    key: PositionKey,
    current: Outcome,
    lookup: &dyn Fn(PositionKey) -> Outcome,
) -> Option<Improvement> {
    let p = ctx.codec.decode(key);
    let mut best: Option<Improvement> = None;
    let mut bound = current;
    for after in ctx.rules.white_moves(&p) {
        let Some(d) = evaluate_replies(ctx.rules, ctx.codec, &after, lookup).proven_distance()
        else {
            continue;
        };
        if improves(d, bound) {
            bound = Outcome::Mate(d);
            best = Some(Improvement {
                distance: d,
                successor: Some(ctx.codec.encode(&after)),
            });
        }
    }
    best
}

/// Run the optimal fixed point to convergence.
pub fn solve_optimal(
    table: &mut TableStore,
    relaxation: Relaxation,
) -> Result<SolveReport, KrkError> {
    solve_optimal_observed(table, relaxation, |_, _| {})
}

/// [`solve_optimal`], calling `on_pass` with the table after every pass.
pub fn solve_optimal_observed(
    table: &mut TableStore,
    relaxation: Relaxation,
    mut on_pass: impl FnMut(&TableStore, &PassStats),
) -> Result<SolveReport, KrkError> {
    let keys: Vec<PositionKey> = table.open_keys().collect();
    log::info!(
        "solving {} open positions ({relaxation} relaxation)",
        keys.len()
    );
    let report = run_fixed_point(
        table,
        Objective::Optimal,
        relaxation,
        &keys,
        optimal_step,
        &mut on_pass,
    )?;
    log::info!(
        "optimal play converged after {} passes: longest mate {} plies, {} unknown",
        report.pass_count(),
        report.max_distance().unwrap_or(0),
        report.unknown()
    );
    if report.unknown() > 0 {
        log::warn!(
            "{} open positions left unresolved by optimal play",
            report.unknown()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::core::coord::Coord;
    use crate::core::position::Position;

    #[test]
    fn mate_in_one_on_4x4() {
        let mut table = TableStore::new(Board::square(4).unwrap()).unwrap();
        solve_optimal(&mut table, Relaxation::GaussSeidel).unwrap();
        let p = Position::white_to_move(Coord::new(2, 1), Coord::new(0, 0), Coord::new(3, 3));
        let key = table.key(&p);
        let record = table.get(key);
        assert_eq!(record.optimal, Outcome::Mate(1));
        let after = table.position(record.optimal_successor.unwrap());
        assert!(table.rules().is_mate(&after));
    }

    #[test]
    fn every_3x3_position_resolves() {
        let mut table = TableStore::new(Board::square(3).unwrap()).unwrap();
        let report = solve_optimal(&mut table, Relaxation::GaussSeidel).unwrap();
        assert_eq!(report.unknown(), 0);
        let hist = &report.final_pass().unwrap().histogram;
        assert_eq!(hist.values().sum::<usize>(), 108);
        assert_eq!(hist.get(&1), Some(&32));
        assert_eq!(hist.get(&3), Some(&40));
        assert_eq!(hist.get(&5), Some(&36));
    }
}
