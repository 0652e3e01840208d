use std::fmt;

use pointfold_ir::LogicalPlan;

/// The outcome of running the optimizer to a fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedLogicalPlan {
    pub plan: LogicalPlan,
    /// Pass applications performed, counting the final one that changed
    /// nothing.
    pub iterations: usize,
    /// False when the iteration cap was reached before a no-op round.
    pub converged: bool,
}

impl OptimizedLogicalPlan {
    pub fn unoptimized(plan: LogicalPlan) -> Self {
        Self {
            plan,
            iterations: 0,
            converged: true,
        }
    }

    pub fn into_plan(self) -> LogicalPlan {
        self.plan
    }
}

impl fmt::Display for OptimizedLogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.plan.fmt(f)
    }
}
