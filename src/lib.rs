//! pointfold - point-lookup predicate canonicalization for SQL optimizers.
//!
//! Equality comparisons against the same column, or the same tuple of
//! columns, are folded into a single equality or `IN` list:
//!
//! ```text
//! OR(=($1, 99), =($0, 1), =($0, 2))               =>  OR(IN($0, 1, 2), =($1, 99))
//! AND(IN($0, 1, 2), IN($0, 1, 3))                 =>  =($0, 1)
//! OR(AND(=($0, 1), =($1, 1)), AND(=($0, 2), ...)) =>  IN(ROW($0, $1), ROW(1, 1), ...)
//! ```
//!
//! Comparisons are only combined when their literals have the same type, and
//! the rewrite of an already canonical predicate is a no-op, so the
//! optimizer can drive it to a fixed point.
//!
//! # Example
//!
//! ```rust
//! use pointfold::{DataType, Expr, LogicalPlan, PlanField, PlanSchema, optimize};
//!
//! let schema = PlanSchema::from_fields(vec![
//!     PlanField::new("id", DataType::Int64),
//!     PlanField::new("kind", DataType::Int64),
//! ]);
//! let id = Expr::column("id", 0);
//! let plan = LogicalPlan::filter(
//!     LogicalPlan::scan("t", schema),
//!     Expr::or(vec![
//!         Expr::eq(id.clone(), Expr::literal(2i64)),
//!         Expr::eq(id, Expr::literal(1i64)),
//!     ]),
//! );
//!
//! let optimized = optimize(&plan).unwrap();
//! assert_eq!(optimized.to_string(), "Filter: IN($0, 1, 2)\n  Scan: t\n");
//! ```

pub use pointfold_common::error::{Error, Result};
pub use pointfold_common::types::{DataType, Literal};
pub use pointfold_ir::{
    BinaryOp, Expr, JoinType, LogicalPlan, PlanField, PlanSchema, UnaryOp,
};
pub use pointfold_optimizer::{
    FixedPointDriver, OptimizationPass, OptimizedLogicalPlan, OptimizerSettings,
    PointLookupPass, apply_point_lookup, canonicalize_expr, canonicalize_predicate, optimize,
    optimize_with_settings,
};
