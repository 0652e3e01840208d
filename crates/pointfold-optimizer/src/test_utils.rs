use std::collections::BTreeSet;

use pointfold_common::types::{DataType, Literal};
use pointfold_ir::{BinaryOp, Expr, LogicalPlan, PlanField, PlanSchema};

use crate::planner::point_lookup::key::ValueSet;

/// `f1`, `f2`, `f3` are INT64, `f4` is FLOAT64.
pub(crate) fn schema() -> PlanSchema {
    PlanSchema::from_fields(vec![
        PlanField::new("f1", DataType::Int64).with_table("t"),
        PlanField::new("f2", DataType::Int64).with_table("t"),
        PlanField::new("f3", DataType::Int64).with_table("t"),
        PlanField::new("f4", DataType::Float64).with_table("t"),
    ])
}

pub(crate) fn scan() -> LogicalPlan {
    LogicalPlan::scan("t", schema())
}

pub(crate) fn col(index: usize) -> Expr {
    Expr::column(format!("f{}", index + 1), index)
}

pub(crate) fn lit(v: i64) -> Expr {
    Expr::Literal(Literal::Int64(v))
}

pub(crate) fn dbl(v: f64) -> Expr {
    Expr::Literal(Literal::float64(v))
}

pub(crate) fn eq(left: Expr, right: Expr) -> Expr {
    Expr::eq(left, right)
}

pub(crate) fn gt(left: Expr, right: Expr) -> Expr {
    Expr::binary(left, BinaryOp::Gt, right)
}

pub(crate) fn in_list(expr: Expr, list: Vec<Expr>) -> Expr {
    Expr::in_list(expr, list)
}

pub(crate) fn and(children: Vec<Expr>) -> Expr {
    Expr::And(children)
}

pub(crate) fn or(children: Vec<Expr>) -> Expr {
    Expr::Or(children)
}

pub(crate) fn row(fields: Vec<Expr>) -> Expr {
    Expr::Row(fields)
}

pub(crate) fn points(values: &[i64]) -> ValueSet {
    values
        .iter()
        .map(|v| vec![Literal::Int64(*v)])
        .collect::<BTreeSet<_>>()
}
