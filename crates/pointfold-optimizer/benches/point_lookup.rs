use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pointfold_common::types::{DataType, Literal};
use pointfold_ir::{Expr, LogicalPlan, PlanField, PlanSchema};
use pointfold_optimizer::{OptimizerSettings, canonicalize_predicate, optimize};

fn make_schema(num_columns: usize) -> PlanSchema {
    let fields = (0..num_columns)
        .map(|i| PlanField::new(format!("col{}", i), DataType::Int64).with_table("t"))
        .collect();
    PlanSchema::from_fields(fields)
}

fn col(index: usize) -> Expr {
    Expr::column(format!("col{}", index), index)
}

fn lit_i64(v: i64) -> Expr {
    Expr::Literal(Literal::Int64(v))
}

/// `OR(c0 = 0, c1 = 1, c2 = 2, c0 = 3, ...)` over `columns` columns.
fn wide_disjunction(width: usize, columns: usize) -> Expr {
    Expr::or(
        (0..width)
            .map(|i| Expr::eq(col(i % columns), lit_i64(i as i64)))
            .collect(),
    )
}

/// `OR(AND(c0 = i, c1 = i), ...)`, folded into a row membership test.
fn row_disjunction(width: usize) -> Expr {
    Expr::or(
        (0..width)
            .map(|i| {
                Expr::and(vec![
                    Expr::eq(col(0), lit_i64(i as i64)),
                    Expr::eq(col(1), lit_i64(i as i64)),
                ])
            })
            .collect(),
    )
}

/// Conjunction of overlapping disjunctions on one column.
fn overlapping_conjunction(width: usize) -> Expr {
    Expr::and(
        (0..width)
            .map(|i| {
                Expr::or(vec![
                    Expr::eq(col(0), lit_i64(i as i64)),
                    Expr::eq(col(0), lit_i64(i as i64 + 1)),
                    Expr::eq(col(0), lit_i64(width as i64)),
                ])
            })
            .collect(),
    )
}

fn bench_canonicalize(c: &mut Criterion) {
    let schema = make_schema(8);
    let settings = OptimizerSettings::default();
    let mut group = c.benchmark_group("point_lookup/canonicalize");

    for width in [8, 64, 512] {
        let disjunction = wide_disjunction(width, 4);
        group.bench_with_input(
            BenchmarkId::new("wide_disjunction", width),
            &disjunction,
            |b, expr| {
                b.iter(|| canonicalize_predicate(black_box(expr.clone()), &schema, &settings))
            },
        );

        let rows = row_disjunction(width);
        group.bench_with_input(BenchmarkId::new("row_disjunction", width), &rows, |b, expr| {
            b.iter(|| canonicalize_predicate(black_box(expr.clone()), &schema, &settings))
        });

        let conjunction = overlapping_conjunction(width);
        group.bench_with_input(
            BenchmarkId::new("overlapping_conjunction", width),
            &conjunction,
            |b, expr| {
                b.iter(|| canonicalize_predicate(black_box(expr.clone()), &schema, &settings))
            },
        );
    }

    group.finish();
}

fn bench_fixed_point(c: &mut Criterion) {
    let plan = LogicalPlan::filter(
        LogicalPlan::scan("t", make_schema(8)),
        Expr::and(vec![wide_disjunction(64, 4), row_disjunction(64)]),
    );
    let mut group = c.benchmark_group("point_lookup/optimize");

    group.bench_function("filter", |b| b.iter(|| optimize(black_box(&plan))));

    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_fixed_point);
criterion_main!(benches);
