//! The hand-written KRK strategy: an ordered list of rules, each a predicate over a
//! candidate white move.
//!
//! For a position, rules are tried in priority order; the first rule with a satisfying
//! candidate picks the first such candidate in move-enumeration order. Candidates that
//! stalemate black are never considered.

pub mod measures;

use serde::Serialize;

use crate::chess::rules::Rules;
use crate::chess::symmetry::canonicalize;
use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::position::Position;

use self::measures::{
    approaches_critical_square, back_move, black_king_next_to_rook, kings_on_same_edge,
    l_pattern, room, rook_divides, rook_guarded, white_king_next_to_rook,
};

/// Rule identifiers, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rule {
    ImmediateMate,
    ReadyToMate,
    Squeeze,
    ApproachDiagonal,
    ApproachNonDiagonal,
    KeepRoomDiagonal,
    KeepRoomNonDiagonal,
    RookHome,
    RookSafe,
    RookSafeSmallBoards,
}

impl Rule {
    pub const ALL: [Rule; 10] = [
        Rule::ImmediateMate,
        Rule::ReadyToMate,
        Rule::Squeeze,
        Rule::ApproachDiagonal,
        Rule::ApproachNonDiagonal,
        Rule::KeepRoomDiagonal,
        Rule::KeepRoomNonDiagonal,
        Rule::RookHome,
        Rule::RookSafe,
        Rule::RookSafeSmallBoards,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::ImmediateMate => "immediate-mate",
            Rule::ReadyToMate => "ready-to-mate",
            Rule::Squeeze => "squeeze",
            Rule::ApproachDiagonal => "approach-diagonal",
            Rule::ApproachNonDiagonal => "approach-non-diagonal",
            Rule::KeepRoomDiagonal => "keep-room-diagonal",
            Rule::KeepRoomNonDiagonal => "keep-room-non-diagonal",
            Rule::RookHome => "rook-home",
            Rule::RookSafe => "rook-safe",
            Rule::RookSafeSmallBoards => "rook-safe-small-boards",
        }
    }

    /// The predicate this rule applies to a candidate move.
    pub fn condition(self) -> RuleCondition {
        match self {
            Rule::ImmediateMate => immediate_mate,
            Rule::ReadyToMate => ready_to_mate,
            Rule::Squeeze => squeeze,
            Rule::ApproachDiagonal => approach_diagonal,
            Rule::ApproachNonDiagonal => approach_non_diagonal,
            Rule::KeepRoomDiagonal => keep_room_diagonal,
            Rule::KeepRoomNonDiagonal => keep_room_non_diagonal,
            Rule::RookHome => rook_home,
            Rule::RookSafe => rook_safe,
            Rule::RookSafeSmallBoards => rook_safe_small_boards,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a rule sees: the position, and every non-stalemating legal white move from it.
pub struct MoveContext<'a> {
    pub rules: &'a Rules,
    pub from: &'a Position,
    pub moves: &'a [Position],
}

impl MoveContext<'_> {
    #[inline]
    fn board(&self) -> &Board {
        &self.rules.board
    }
}

/// A rule predicate over one candidate move.
pub type RuleCondition = fn(&MoveContext<'_>, &Position) -> bool;

/// The move a strategy picked and the rule that picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyMove {
    pub rule: Rule,
    pub successor: Position,
}

/// An ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    rules: Vec<Rule>,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::standard()
    }
}

impl Strategy {
    /// All ten rules in priority order.
    pub fn standard() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }

    /// A custom rule list, tried in the given order.
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// This strategy with one rule dropped.
    pub fn without(&self, rule: Rule) -> Self {
        Self::with_rules(self.rules.iter().copied().filter(|&r| r != rule))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Pick white's move in `p`, or `None` when no rule applies.
    pub fn choose(&self, rules: &Rules, p: &Position) -> Option<StrategyMove> {
        let moves: Vec<Position> = rules
            .white_moves(p)
            .into_iter()
            .filter(|q| !rules.is_stalemate(q))
            .collect();
        let ctx = MoveContext {
            rules,
            from: p,
            moves: &moves,
        };
        self.rules.iter().find_map(|&rule| {
            let cond = rule.condition();
            moves
                .iter()
                .find(|q| cond(&ctx, q))
                .map(|&successor| StrategyMove { rule, successor })
        })
    }
}

#[inline]
fn rook_moved(from: &Position, to: &Position) -> bool {
    from.rook != to.rook
}

#[inline]
fn king_moved(from: &Position, to: &Position) -> bool {
    from.white_king != to.white_king
}

#[inline]
fn diagonal_step(from: &Position, to: &Position) -> bool {
    from.white_king.x != to.white_king.x && from.white_king.y != to.white_king.y
}

/// Shared guard of the king rules: once the box is small, do not walk into an edge
/// alongside the black king and do not step back from a rook-pinned king.
fn room_guard(board: &Board, from: &Position, to: &Position) -> bool {
    room(board, to) > 3
        || (!kings_on_same_edge(board, to)
            && (from.white_king.chebyshev(from.rook) != 1 || !back_move(board, from, to)))
}

fn immediate_mate(ctx: &MoveContext<'_>, to: &Position) -> bool {
    ctx.rules.is_mate(to)
}

fn ready_to_mate(ctx: &MoveContext<'_>, to: &Position) -> bool {
    let c = canonicalize(ctx.board(), to);
    let (bk, wk, wr) = (c.black_king, c.white_king, c.rook);
    (bk == Coord::new(0, 0) && wk == Coord::new(1, 2) && wr.x > 2 && wr.y > 0)
        || (bk == Coord::new(0, 1) && wk == Coord::new(2, 1) && wr.x >= 1 && wr.y == 2)
        || (bk.x == 0
            && wk.x == 2
            && wr.x >= 2
            && (wk.y - bk.y).abs() == 1
            && (wr.y - bk.y).abs() == 1
            && wk.y != wr.y)
}

fn shrinks_safely(board: &Board, from: &Position, to: &Position) -> bool {
    room(board, to) < room(board, from) && rook_guarded(to) && rook_divides(to)
}

fn squeeze(ctx: &MoveContext<'_>, to: &Position) -> bool {
    let board = ctx.board();
    if !rook_moved(ctx.from, to) || !shrinks_safely(board, ctx.from, to) {
        return false;
    }
    !ctx.moves.iter().any(|other| {
        other != to && rook_moved(ctx.from, other) && shrinks_safely(board, to, other)
    })
}

fn approach(ctx: &MoveContext<'_>, to: &Position, diagonal: bool) -> bool {
    let board = ctx.board();
    king_moved(ctx.from, to)
        && diagonal_step(ctx.from, to) == diagonal
        && approaches_critical_square(ctx.from, to)
        && rook_guarded(to)
        && (rook_divides(to) || l_pattern(to))
        && room_guard(board, ctx.from, to)
}

fn approach_diagonal(ctx: &MoveContext<'_>, to: &Position) -> bool {
    approach(ctx, to, true)
}

fn approach_non_diagonal(ctx: &MoveContext<'_>, to: &Position) -> bool {
    approach(ctx, to, false)
}

fn keep_room(ctx: &MoveContext<'_>, to: &Position, diagonal: bool) -> bool {
    let board = ctx.board();
    king_moved(ctx.from, to)
        && diagonal_step(ctx.from, to) == diagonal
        && rook_guarded(to)
        && rook_divides(to)
        && ctx.from.white_king.chebyshev(ctx.from.rook) >= to.white_king.chebyshev(to.rook)
        && room_guard(board, ctx.from, to)
}

fn keep_room_diagonal(ctx: &MoveContext<'_>, to: &Position) -> bool {
    keep_room(ctx, to, true)
}

fn keep_room_non_diagonal(ctx: &MoveContext<'_>, to: &Position) -> bool {
    keep_room(ctx, to, false)
}

/// The rook is not left next to the black king without the white king beside it.
#[inline]
fn rook_not_hanging(to: &Position) -> bool {
    !black_king_next_to_rook(to) || white_king_next_to_rook(to)
}

fn rook_home(ctx: &MoveContext<'_>, to: &Position) -> bool {
    if !rook_moved(ctx.from, to) || !rook_not_hanging(to) {
        return false;
    }
    let (wk, bk, wr) = (ctx.from.white_king, ctx.from.black_king, ctx.from.rook);
    let dest = to.rook;
    (bk.x < wk.x && wr.x != wk.x - 1 && dest.x == wk.x - 1)
        || (bk.x > wk.x && wr.x != wk.x + 1 && dest.x == wk.x + 1)
        || (bk.y < wk.y && wr.y != wk.y - 1 && dest.y == wk.y - 1)
        || (bk.y > wk.y && wr.y != wk.y + 1 && dest.y == wk.y + 1)
        || (wr.x == wk.x && wk.x == bk.x && (dest.x - wk.x).abs() == 1)
        || (wr.y == wk.y && wk.y == bk.y && (dest.y - wk.y).abs() == 1)
}

/// The rook lands on an edge line it was not already on.
fn rook_reaches_edge(board: &Board, from: &Position, to: &Position) -> bool {
    let (a, b) = (from.rook, to.rook);
    (a.x != 0 && b.x == 0)
        || (a.x != board.last_file() && b.x == board.last_file())
        || (a.y != 0 && b.y == 0)
        || (a.y != board.last_rank() && b.y == board.last_rank())
}

fn rook_safe(ctx: &MoveContext<'_>, to: &Position) -> bool {
    rook_moved(ctx.from, to)
        && rook_not_hanging(to)
        && rook_reaches_edge(ctx.board(), ctx.from, to)
        && to.black_king.chebyshev(to.rook) > 2
}

fn rook_safe_small_boards(ctx: &MoveContext<'_>, to: &Position) -> bool {
    rook_moved(ctx.from, to)
        && rook_reaches_edge(ctx.board(), ctx.from, to)
        && to.black_king.chebyshev(to.rook) == 2
        && (to.rook.x == to.white_king.x || to.rook.y == to.white_king.y)
}
