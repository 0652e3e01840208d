mod driver;
mod optimized_logical_plan;
mod pass;
mod planner;
#[cfg(test)]
mod test_utils;

pub use driver::FixedPointDriver;
pub use optimized_logical_plan::OptimizedLogicalPlan;
pub use pass::{OptimizationPass, PointLookupPass};
pub use planner::{apply_point_lookup, canonicalize_expr, canonicalize_predicate};
use pointfold_common::error::{Error, Result};
use pointfold_ir::LogicalPlan;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerSettings {
    pub point_lookup: bool,
    /// Fewest comparisons sharing an operand and literal type before they are
    /// rewritten. With 1, every `IN` list is sorted and deduplicated, including
    /// one that makes up the whole predicate.
    pub min_cluster_size: usize,
    pub max_iterations: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl OptimizerSettings {
    pub fn all_enabled() -> Self {
        Self {
            point_lookup: true,
            min_cluster_size: 2,
            max_iterations: 16,
        }
    }

    pub fn all_disabled() -> Self {
        Self {
            point_lookup: false,
            ..Self::all_enabled()
        }
    }

    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_cluster_size == 0 {
            return Err(Error::invalid_config("min_cluster_size must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid_config("max_iterations must be at least 1"));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(s).map_err(|e| Error::invalid_config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

pub fn optimize(logical: &LogicalPlan) -> Result<OptimizedLogicalPlan> {
    optimize_with_settings(logical, &OptimizerSettings::all_enabled())
}

pub fn optimize_with_settings(
    logical: &LogicalPlan,
    settings: &OptimizerSettings,
) -> Result<OptimizedLogicalPlan> {
    settings.validate()?;
    if !settings.point_lookup {
        return Ok(OptimizedLogicalPlan::unoptimized(logical.clone()));
    }
    FixedPointDriver::new(settings.max_iterations)
        .with_pass(PointLookupPass::new(settings.clone()))
        .run(logical.clone())
}
