//! The outcome table: one record per key of the board's key space.

use std::cmp::Ordering;

use serde::Serialize;

use crate::chess::rules::Rules;
use crate::core::board::Board;
use crate::core::key::{KeyCodec, PositionKey};
use crate::core::position::Position;
use crate::error::KrkError;
use crate::strategy::Rule;

/// Classification of a white-to-move key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Illegal,
    Draw,
    Unknown,
    /// Forced mate in this many plies.
    Mate(u16),
}

impl Outcome {
    #[inline]
    pub fn distance(self) -> Option<u16> {
        match self {
            Outcome::Mate(d) => Some(d),
            _ => None,
        }
    }

    /// Illegal and draw keys never take part in a fixed point.
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Outcome::Unknown | Outcome::Mate(_))
    }
}

/// Only mate distances are ordered; everything else compares equal to itself and is
/// unordered against the rest.
impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Outcome::Mate(a), Outcome::Mate(b)) => Some(a.cmp(b)),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

/// Which of the two fixed points a record field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Objective {
    Optimal,
    Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub optimal: Outcome,
    pub optimal_successor: Option<PositionKey>,
    pub strategy: Outcome,
    pub strategy_successor: Option<PositionKey>,
    /// Rule that picked the strategy successor.
    pub rule: Option<Rule>,
}

impl Record {
    fn classified(outcome: Outcome) -> Self {
        Self {
            optimal: outcome,
            optimal_successor: None,
            strategy: outcome,
            strategy_successor: None,
            rule: None,
        }
    }

    #[inline]
    pub fn outcome(&self, objective: Objective) -> Outcome {
        match objective {
            Objective::Optimal => self.optimal,
            Objective::Strategy => self.strategy,
        }
    }

    #[inline]
    pub fn successor(&self, objective: Objective) -> Option<PositionKey> {
        match objective {
            Objective::Optimal => self.optimal_successor,
            Objective::Strategy => self.strategy_successor,
        }
    }

    #[inline]
    pub(crate) fn set_outcome(&mut self, objective: Objective, outcome: Outcome) {
        match objective {
            Objective::Optimal => self.optimal = outcome,
            Objective::Strategy => self.strategy = outcome,
        }
    }
}

/// Dense table indexed by [`PositionKey`].
#[derive(Debug, Clone)]
pub struct TableStore {
    rules: Rules,
    codec: KeyCodec,
    records: Vec<Record>,
}

impl TableStore {
    /// Allocate the full key space and classify every key (pass 0).
    pub fn new(board: Board) -> Result<Self, KrkError> {
        let rules = Rules::new(board);
        let codec = board.codec();
        let keys = codec.key_space();
        let len = usize::try_from(keys).map_err(|_| KrkError::TableTooLarge { keys })?;

        let mut records = Vec::new();
        records
            .try_reserve_exact(len)
            .map_err(|_| KrkError::AllocationFailed { records: len })?;
        records.extend((0..keys).map(|k| {
            let p = codec.decode(k as PositionKey);
            Record::classified(classify(&rules, &p))
        }));

        let legal = records.iter().filter(|r| r.optimal != Outcome::Illegal).count();
        log::info!(
            "table {}x{}: {} keys, {} legal white-to-move positions",
            board.files(),
            board.ranks(),
            len,
            legal
        );
        Ok(Self {
            rules,
            codec,
            records,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.rules.board
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn codec(&self) -> &KeyCodec {
        &self.codec
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, key: PositionKey) -> &Record {
        &self.records[key as usize]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: PositionKey) -> &mut Record {
        &mut self.records[key as usize]
    }

    #[inline]
    pub fn key(&self, p: &Position) -> PositionKey {
        self.codec.encode(p)
    }

    #[inline]
    pub fn position(&self, key: PositionKey) -> Position {
        self.codec.decode(key)
    }

    /// Outcome of `p` under `objective`; unrepresentable positions read as illegal.
    pub fn outcome_of(&self, p: &Position, objective: Objective) -> Outcome {
        if !self.codec.is_representable(p) {
            return Outcome::Illegal;
        }
        self.get(self.key(p)).outcome(objective)
    }

    /// All records with their keys, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (PositionKey, &Record)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(k, r)| (k as PositionKey, r))
    }

    /// Keys of legal white-to-move positions (draws included), ascending.
    pub fn legal_keys(&self) -> impl Iterator<Item = PositionKey> + '_ {
        self.iter()
            .filter(|(_, r)| r.optimal != Outcome::Illegal)
            .map(|(k, _)| k)
    }

    /// Keys that take part in the fixed points: legal and rook on board.
    pub fn open_keys(&self) -> impl Iterator<Item = PositionKey> + '_ {
        self.iter()
            .filter(|(_, r)| r.optimal.is_open())
            .map(|(k, _)| k)
    }

    /// Snapshot of one objective's outcomes, for passes that must not see their own writes.
    pub(crate) fn snapshot(&self, objective: Objective) -> Result<Vec<Outcome>, KrkError> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.records.len())
            .map_err(|_| KrkError::AllocationFailed {
                records: self.records.len(),
            })?;
        out.extend(self.records.iter().map(|r| r.outcome(objective)));
        Ok(out)
    }

    /// (position, chosen successor) for every open key; the successor is `None` where the
    /// objective has not fixed one.
    pub fn successor_pairs(
        &self,
        objective: Objective,
    ) -> impl Iterator<Item = (Position, Option<Position>)> + '_ {
        self.open_keys().map(move |k| {
            let succ = self.get(k).successor(objective);
            (self.position(k), succ.map(|s| self.position(s)))
        })
    }
}

fn classify(rules: &Rules, p: &Position) -> Outcome {
    if !rules.is_legal_white_to_move(p) {
        Outcome::Illegal
    } else if p.rook_captured {
        Outcome::Draw
    } else {
        Outcome::Unknown
    }
}
