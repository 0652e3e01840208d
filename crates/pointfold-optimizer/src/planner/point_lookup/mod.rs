//! Folds clusters of equality comparisons against the same column (or tuple
//! of columns) into single equalities and `IN` lists.
//!
//! Siblings under an `OR` are combined by union, siblings under an `AND` by
//! intersection. Comparisons are only combined when their literals have
//! exactly the same type. A node whose children yield nothing to combine is
//! returned as given, so re-running the rewrite on its own output is a no-op.

pub(crate) mod key;
mod merge;
mod rewrite;

use pointfold_common::error::Result;
use pointfold_ir::{Expr, LogicalPlan, PlanSchema};
use tracing::{debug, instrument};

use self::rewrite::{Context, Rewriter};
use crate::OptimizerSettings;

/// Canonicalizes a predicate whose only consumer asks whether it is TRUE:
/// a filter or a join condition. Such a predicate may fold to `FALSE` where
/// the input could also have been NULL.
#[instrument(skip_all, fields(min_cluster_size = settings.min_cluster_size))]
pub fn canonicalize_predicate(
    expr: Expr,
    schema: &PlanSchema,
    settings: &OptimizerSettings,
) -> Result<Expr> {
    canonicalize(expr, schema, settings, Context::Filter)
}

/// Canonicalizes an expression whose three-valued result is observed, such
/// as a projected column.
#[instrument(skip_all, fields(min_cluster_size = settings.min_cluster_size))]
pub fn canonicalize_expr(
    expr: Expr,
    schema: &PlanSchema,
    settings: &OptimizerSettings,
) -> Result<Expr> {
    canonicalize(expr, schema, settings, Context::Value)
}

fn canonicalize(
    expr: Expr,
    schema: &PlanSchema,
    settings: &OptimizerSettings,
    ctx: Context,
) -> Result<Expr> {
    settings.validate()?;
    expr.validate(schema)?;
    let rewritten = Rewriter::new(settings.min_cluster_size).rewrite(expr, ctx);
    if rewritten.changed {
        debug!(result = %rewritten.expr, "predicate canonicalized");
    }
    Ok(rewritten.expr)
}

/// Runs the rewrite over every predicate in `plan`, bottom-up.
pub fn apply_point_lookup(plan: LogicalPlan, settings: &OptimizerSettings) -> Result<LogicalPlan> {
    match plan {
        LogicalPlan::Scan { .. } => Ok(plan),

        LogicalPlan::Filter { input, predicate } => {
            let optimized_input = apply_point_lookup(*input, settings)?;
            let predicate =
                canonicalize_predicate(predicate, optimized_input.schema(), settings)?;
            Ok(LogicalPlan::Filter {
                input: Box::new(optimized_input),
                predicate,
            })
        }

        LogicalPlan::Project {
            input,
            expressions,
            schema,
        } => {
            let optimized_input = apply_point_lookup(*input, settings)?;
            let expressions = expressions
                .into_iter()
                .map(|e| canonicalize_expr(e, optimized_input.schema(), settings))
                .collect::<Result<Vec<_>>>()?;
            Ok(LogicalPlan::Project {
                input: Box::new(optimized_input),
                expressions,
                schema,
            })
        }

        LogicalPlan::Join {
            left,
            right,
            join_type,
            condition,
            schema,
        } => {
            let left = apply_point_lookup(*left, settings)?;
            let right = apply_point_lookup(*right, settings)?;
            let condition = condition
                .map(|c| canonicalize_predicate(c, &schema, settings))
                .transpose()?;
            Ok(LogicalPlan::Join {
                left: Box::new(left),
                right: Box::new(right),
                join_type,
                condition,
                schema,
            })
        }
    }
}
