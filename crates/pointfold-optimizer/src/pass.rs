use pointfold_common::error::Result;
use pointfold_ir::LogicalPlan;

use crate::OptimizerSettings;
use crate::planner::apply_point_lookup;

pub trait OptimizationPass: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply_logical(&self, plan: LogicalPlan) -> Result<LogicalPlan> {
        Ok(plan)
    }
}

/// Folds equality clusters in every filter, join condition and projection.
#[derive(Clone, Debug)]
pub struct PointLookupPass {
    settings: OptimizerSettings,
}

impl PointLookupPass {
    pub fn new(settings: OptimizerSettings) -> Self {
        Self { settings }
    }
}

impl OptimizationPass for PointLookupPass {
    fn name(&self) -> &'static str {
        "point_lookup"
    }

    fn apply_logical(&self, plan: LogicalPlan) -> Result<LogicalPlan> {
        apply_point_lookup(plan, &self.settings)
    }
}
