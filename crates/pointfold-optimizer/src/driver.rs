use pointfold_common::error::{Error, Result};
use pointfold_ir::LogicalPlan;
use tracing::{debug, instrument, warn};

use crate::OptimizedLogicalPlan;
use crate::pass::OptimizationPass;

/// Re-applies a set of passes until a round leaves the plan unchanged.
pub struct FixedPointDriver {
    passes: Vec<Box<dyn OptimizationPass>>,
    max_iterations: usize,
}

impl FixedPointDriver {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            passes: Vec::new(),
            max_iterations,
        }
    }

    pub fn with_pass(mut self, pass: impl OptimizationPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    #[instrument(skip_all, fields(passes = self.passes.len(), max_iterations = self.max_iterations))]
    pub fn run(&self, plan: LogicalPlan) -> Result<OptimizedLogicalPlan> {
        if self.max_iterations == 0 {
            return Err(Error::invalid_config("max_iterations must be at least 1"));
        }
        let mut plan = plan;
        for iteration in 1..=self.max_iterations {
            let mut next = plan.clone();
            for pass in &self.passes {
                next = pass.apply_logical(next)?;
            }
            if next == plan {
                debug!(iteration, "fixed point reached");
                return Ok(OptimizedLogicalPlan {
                    plan,
                    iterations: iteration,
                    converged: true,
                });
            }
            plan = next;
        }
        warn!(
            max_iterations = self.max_iterations,
            "optimizer stopped at iteration cap before reaching a fixed point"
        );
        Ok(OptimizedLogicalPlan {
            plan,
            iterations: self.max_iterations,
            converged: false,
        })
    }
}
