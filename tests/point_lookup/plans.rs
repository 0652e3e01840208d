use pointfold::{
    DataType, Error, Expr, FixedPointDriver, JoinType, LogicalPlan, OptimizerSettings, PlanField,
    PlanSchema, PointLookupPass, optimize, optimize_with_settings,
};

use crate::test_helpers::common::{col, dbl, lit, schema};

fn scan() -> LogicalPlan {
    LogicalPlan::scan("t", schema())
}

fn orders() -> LogicalPlan {
    LogicalPlan::scan(
        "orders",
        PlanSchema::from_fields(vec![
            PlanField::new("id", DataType::Int64).with_table("orders"),
            PlanField::new("status", DataType::String).with_table("orders"),
        ]),
    )
}

#[test]
fn test_optimize_rewrites_filter_over_join() {
    let status = Expr::column("status", 5);
    let join = LogicalPlan::join(
        scan(),
        orders(),
        JoinType::Inner,
        Some(Expr::and(vec![
            Expr::eq(col(0), Expr::column("id", 4)),
            Expr::or(vec![
                Expr::eq(status.clone(), Expr::literal("open")),
                Expr::eq(status, Expr::literal("held")),
            ]),
        ])),
    );
    let plan = LogicalPlan::filter(
        join,
        Expr::and(vec![
            Expr::or(vec![
                Expr::eq(col(3), dbl(4.1)),
                Expr::eq(col(3), dbl(3.0)),
            ]),
            Expr::in_list(col(0), vec![lit(3), lit(1)]),
            Expr::in_list(col(0), vec![lit(1), lit(2), lit(3)]),
        ]),
    );

    let out = optimize(&plan).unwrap();
    assert!(out.converged);
    assert_eq!(out.iterations, 2);
    assert_eq!(
        out.to_string(),
        "Filter: AND(IN($0, 1, 3), IN($3, 3.0:FLOAT64, 4.1:FLOAT64))\n\
         \x20 Join(Inner): AND(=($0, $4), IN($5, 'held', 'open'))\n\
         \x20   Scan: t\n\
         \x20   Scan: orders\n"
    );
}

#[test]
fn test_unsatisfiable_filter_folds_to_false() {
    let plan = LogicalPlan::filter(
        scan(),
        Expr::and(vec![
            Expr::eq(col(1), lit(1)),
            Expr::eq(lit(2), col(1)),
        ]),
    );
    let out = optimize(&plan).unwrap();
    assert_eq!(out.to_string(), "Filter: false\n  Scan: t\n");
}

#[test]
fn test_settings_from_toml_drive_the_optimizer() {
    let settings =
        OptimizerSettings::from_toml_str("min_cluster_size = 3\nmax_iterations = 2").unwrap();
    let predicate = Expr::or(vec![
        Expr::eq(col(0), lit(1)),
        Expr::eq(col(0), lit(2)),
    ]);
    let plan = LogicalPlan::filter(scan(), predicate);
    let out = optimize_with_settings(&plan, &settings).unwrap();
    assert_eq!(out.plan, plan);
    assert_eq!(out.iterations, 1);
}

#[test]
fn test_driver_accepts_custom_pass_lists() {
    let driver =
        FixedPointDriver::new(4).with_pass(PointLookupPass::new(OptimizerSettings::default()));
    let plan = LogicalPlan::filter(
        scan(),
        Expr::or(vec![
            Expr::and(vec![
                Expr::eq(col(1), lit(2)),
                Expr::eq(col(0), lit(2)),
            ]),
            Expr::and(vec![
                Expr::eq(col(0), lit(1)),
                Expr::eq(col(1), lit(1)),
            ]),
        ]),
    );
    let out = driver.run(plan).unwrap();
    assert_eq!(
        out.to_string(),
        "Filter: IN(ROW($0, $1), ROW(1, 1), ROW(2, 2))\n  Scan: t\n"
    );
}

#[test]
fn test_bad_ordinal_surfaces_as_error() {
    let plan = LogicalPlan::filter(scan(), Expr::eq(col(0), Expr::column("x", 12)));
    let err = optimize(&plan).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(_)));
}
