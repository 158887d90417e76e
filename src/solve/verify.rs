//! Checks that a strategy forces mate from every open position.

use serde::Serialize;

use crate::core::key::PositionKey;
use crate::error::KrkError;
use crate::solve::{
    evaluate_replies, improves, run_fixed_point, Improvement, PassStats, Relaxation,
    SolveReport, StepContext,
};
use crate::strategy::Strategy;
use crate::table::{Objective, Outcome, TableStore};

/// Outcome of verifying a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Open positions where no rule picked a move.
    pub undefined: Vec<PositionKey>,
    /// Open positions with a strategy move but no proven mate.
    pub unresolved: Vec<PositionKey>,
    pub report: SolveReport,
}

impl Verdict {
    /// The strategy forces mate from every open position.
    pub fn is_correct(&self) -> bool {
        self.undefined.is_empty() && self.unresolved.is_empty()
    }

    pub fn defects(&self) -> usize {
        self.undefined.len() + self.unresolved.len()
    }
}

/// Store the strategy's move and rule for every open key. Returns the keys where the
/// strategy has no move.
pub fn assign_strategy_moves(table: &mut TableStore, strategy: &Strategy) -> Vec<PositionKey> {
    let rules = *table.rules();
    let keys: Vec<PositionKey> = table.open_keys().collect();
    let mut undefined = Vec::new();
    for key in keys {
        let p = table.position(key);
        let chosen = strategy.choose(&rules, &p);
        let successor = chosen.map(|m| table.key(&m.successor));
        let record = table.get_mut(key);
        record.strategy_successor = successor;
        record.rule = chosen.map(|m| m.rule);
        if chosen.is_none() {
            log::warn!(
                "no strategy move defined for key {key}:\n{}",
                p.render(table.board())
            );
            undefined.push(key);
        }
    }
    if !undefined.is_empty() {
        log::warn!("strategy is undefined for {} positions", undefined.len());
    }
    undefined
}

/// Diagram of an unresolved position, the strategy move played from it and its rule.
pub fn describe_unresolved(table: &TableStore, key: PositionKey) -> Option<String> {
    let record = table.get(key);
    let (succ, rule) = (record.strategy_successor?, record.rule?);
    Some(format!(
        "no forced mate for key {key}:\n{}strategy move ({rule}):\n{}",
        table.position(key).render(table.board()),
        table.position(succ).render(table.board())
    ))
}

/// Lower `key` to the distance its strategy move proves under `lookup`.
fn strategy_step(
    ctx: &StepContext<'_>,
    key: PositionKey,
    current: Outcome,
    lookup: &dyn Fn(PositionKey) -> Outcome,
) -> Option<Improvement> {
    let succ = ctx.table.get(key).strategy_successor?;
    let after = ctx.codec.decode(succ);
    let d = evaluate_replies(ctx.rules, ctx.codec, &after, lookup).proven_distance()?;
    improves(d, current).then_some(Improvement {
        distance: d,
        successor: None,
    })
}

/// Assign strategy moves, then run the strategy fixed point to convergence.
pub fn verify_strategy(
    table: &mut TableStore,
    strategy: &Strategy,
    relaxation: Relaxation,
) -> Result<Verdict, KrkError> {
    verify_strategy_observed(table, strategy, relaxation, |_, _| {})
}

/// [`verify_strategy`], calling `on_pass` with the table after every pass.
pub fn verify_strategy_observed(
    table: &mut TableStore,
    strategy: &Strategy,
    relaxation: Relaxation,
    mut on_pass: impl FnMut(&TableStore, &PassStats),
) -> Result<Verdict, KrkError> {
    let undefined = assign_strategy_moves(table, strategy);
    let keys: Vec<PositionKey> = table
        .open_keys()
        .filter(|&k| table.get(k).strategy_successor.is_some())
        .collect();
    let report = run_fixed_point(
        table,
        Objective::Strategy,
        relaxation,
        &keys,
        strategy_step,
        &mut on_pass,
    )?;
    let unresolved: Vec<PositionKey> = keys
        .iter()
        .copied()
        .filter(|&k| table.get(k).strategy == Outcome::Unknown)
        .collect();
    if log::log_enabled!(log::Level::Debug) {
        for text in unresolved.iter().filter_map(|&k| describe_unresolved(table, k)) {
            log::debug!("{text}");
        }
    }

    let verdict = Verdict {
        undefined,
        unresolved,
        report,
    };
    if verdict.is_correct() {
        log::info!(
            "strategy is correct: mates within {} plies after {} passes",
            verdict.report.max_distance().unwrap_or(0),
            verdict.report.pass_count()
        );
    } else {
        log::warn!(
            "strategy is not correct: {} undefined, {} unresolved",
            verdict.undefined.len(),
            verdict.unresolved.len()
        );
    }
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::strategy::Rule;

    #[test]
    fn standard_strategy_holds_on_4x4() {
        let mut table = TableStore::new(Board::square(4).unwrap()).unwrap();
        let verdict =
            verify_strategy(&mut table, &Strategy::standard(), Relaxation::GaussSeidel).unwrap();
        assert!(verdict.is_correct());
        assert_eq!(verdict.report.max_distance(), Some(19));
    }

    #[test]
    fn unresolved_positions_are_described_with_their_move() {
        let mut table = TableStore::new(Board::square(4).unwrap()).unwrap();
        let verdict = verify_strategy(
            &mut table,
            &Strategy::standard().without(Rule::ReadyToMate),
            Relaxation::GaussSeidel,
        )
        .unwrap();
        assert!(!verdict.unresolved.is_empty());
        for &key in &verdict.unresolved {
            let text = describe_unresolved(&table, key).unwrap();
            let rule = table.get(key).rule.unwrap();
            assert!(text.contains(&format!("strategy move ({rule})")), "{text}");
            assert!(text.contains("Black on turn"));
        }
        for &key in &verdict.undefined {
            assert_eq!(describe_unresolved(&table, key), None);
        }
    }

    #[test]
    fn empty_strategy_is_undefined_everywhere() {
        let mut table = TableStore::new(Board::square(3).unwrap()).unwrap();
        let verdict = verify_strategy(
            &mut table,
            &Strategy::with_rules(Vec::<Rule>::new()),
            Relaxation::GaussSeidel,
        )
        .unwrap();
        assert_eq!(verdict.undefined.len(), 108);
        assert!(verdict.unresolved.is_empty());
        assert!(!verdict.is_correct());
    }
}
