//! Predicate expressions, schemas and the minimal logical plan tree that the
//! pointfold optimizer rewrites.

mod expr;
mod plan;
mod schema;

pub use expr::{BinaryOp, Expr, UnaryOp};
pub use plan::{JoinType, LogicalPlan};
pub use schema::{PlanField, PlanSchema};
