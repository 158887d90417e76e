use crate::core::board::Board;
use crate::error::KrkError;
use crate::solve::Relaxation;
use crate::strategy::Strategy;

/// What to compute, and on which board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub board: Board,
    pub relaxation: Relaxation,

    /// Compute exact distances to mate.
    pub optimal: bool,

    /// Assign strategy moves and verify them.
    pub verify_strategy: bool,

    pub strategy: Strategy,

    /// Check that the strategy's progress measure drops along every three-move line.
    pub termination: bool,
}

impl SolverConfig {
    /// Both fixed points with the standard strategy and in-place relaxation.
    pub fn new(files: u32, ranks: u32) -> Result<Self, KrkError> {
        Ok(Self::for_board(Board::new(files, ranks)?))
    }

    pub fn for_board(board: Board) -> Self {
        Self {
            board,
            relaxation: Relaxation::default(),
            optimal: true,
            verify_strategy: true,
            strategy: Strategy::standard(),
            termination: false,
        }
    }

    pub fn with_relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_optimal(mut self, enabled: bool) -> Self {
        self.optimal = enabled;
        self
    }

    pub fn with_strategy(mut self, enabled: bool) -> Self {
        self.verify_strategy = enabled;
        self
    }

    pub fn with_termination(mut self, enabled: bool) -> Self {
        self.termination = enabled;
        self
    }

    /// Verify `strategy` instead of the standard rule list.
    pub fn with_rules(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Rule;

    #[test]
    fn builder_switches() {
        let cfg = SolverConfig::new(5, 6)
            .unwrap()
            .with_relaxation(Relaxation::Jacobi)
            .with_optimal(false)
            .with_termination(true)
            .with_rules(Strategy::standard().without(Rule::Squeeze));
        assert_eq!(cfg.board.files(), 5);
        assert_eq!(cfg.board.ranks(), 6);
        assert_eq!(cfg.relaxation, Relaxation::Jacobi);
        assert!(!cfg.optimal);
        assert!(cfg.verify_strategy);
        assert!(cfg.termination);
        assert!(!SolverConfig::new(4, 4).unwrap().termination);
        assert!(!cfg.strategy.rules().contains(&Rule::Squeeze));
        assert!(SolverConfig::new(33, 4).is_err());
    }
}
