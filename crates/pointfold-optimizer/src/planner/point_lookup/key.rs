use std::collections::BTreeSet;

use pointfold_common::types::{DataType, Literal};
use pointfold_ir::{BinaryOp, Expr};
use rustc_hash::FxHashSet;

/// The n-ary Boolean node whose children are being classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Connective {
    And,
    Or,
}

impl Connective {
    /// The constant that decides the whole node on its own.
    pub(crate) fn absorbing(self) -> bool {
        matches!(self, Connective::Or)
    }

    pub(crate) fn build(self, children: Vec<Expr>) -> Expr {
        match self {
            Connective::And => Expr::And(children),
            Connective::Or => Expr::Or(children),
        }
    }
}

/// What a point-lookup predicate compares against its constants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Operand {
    Column(usize),
    Row(Vec<usize>),
}

impl Operand {
    pub(crate) fn ordinals(&self) -> &[usize] {
        match self {
            Operand::Column(index) => std::slice::from_ref(index),
            Operand::Row(indexes) => indexes,
        }
    }
}

/// Two comparisons are mergeable only when their keys are equal: same
/// operand, and literals of exactly the same type in every position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct GroupKey {
    pub(crate) operand: Operand,
    pub(crate) types: Vec<DataType>,
}

/// One literal per operand position.
pub(crate) type Point = Vec<Literal>;

pub(crate) type ValueSet = BTreeSet<Point>;

#[derive(Clone, Debug)]
pub(crate) struct Keyed {
    pub(crate) key: GroupKey,
    /// Column references in operand order, used to render the merged predicate.
    pub(crate) columns: Vec<Expr>,
    pub(crate) values: ValueSet,
}

/// Classifies a direct child of `parent`. `None` means passthrough.
pub(crate) fn classify(expr: &Expr, parent: Connective) -> Option<Keyed> {
    match (expr, parent) {
        (Expr::Or(children), Connective::And) => classify_uniform_disjunction(children),
        (Expr::And(children), Connective::Or) => classify_row_conjunction(children),
        _ => classify_leaf(expr),
    }
}

fn classify_leaf(expr: &Expr) -> Option<Keyed> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOp::Eq,
            right,
        } => classify_equality(left, right).or_else(|| classify_equality(right, left)),
        Expr::InList {
            expr,
            list,
            negated: false,
        } => classify_membership(expr, list),
        _ => None,
    }
}

fn classify_equality(operand: &Expr, value: &Expr) -> Option<Keyed> {
    match operand {
        Expr::Column { index, .. } => {
            let (ty, point) = scalar_point(value)?;
            Some(Keyed {
                key: GroupKey {
                    operand: Operand::Column(*index),
                    types: vec![ty],
                },
                columns: vec![operand.clone()],
                values: BTreeSet::from([point]),
            })
        }
        Expr::Row(fields) => {
            let indexes = distinct_columns(operand)?;
            let (types, point) = row_point(value, indexes.len())?;
            Some(Keyed {
                key: GroupKey {
                    operand: Operand::Row(indexes),
                    types,
                },
                columns: fields.clone(),
                values: BTreeSet::from([point]),
            })
        }
        _ => None,
    }
}

fn classify_membership(operand: &Expr, list: &[Expr]) -> Option<Keyed> {
    let (first, rest) = list.split_first()?;
    let mut keyed = classify_equality(operand, first)?;
    for item in rest {
        let (types, point) = match &keyed.key.operand {
            Operand::Column(_) => {
                let (ty, point) = scalar_point(item)?;
                (vec![ty], point)
            }
            Operand::Row(indexes) => row_point(item, indexes.len())?,
        };
        if types != keyed.key.types {
            return None;
        }
        keyed.values.insert(point);
    }
    Some(keyed)
}

/// `OR(x = 1, x = 2, x IN (5, 6))` is a single lookup on `x`.
fn classify_uniform_disjunction(children: &[Expr]) -> Option<Keyed> {
    let (first, rest) = children.split_first()?;
    let mut keyed = classify_leaf(first)?;
    for child in rest {
        let next = classify_leaf(child)?;
        if next.key != keyed.key {
            return None;
        }
        keyed.values.extend(next.values);
    }
    Some(keyed)
}

/// `AND(b = 2, a = 1)` over distinct columns is the row equality
/// `ROW(a, b) = ROW(1, 2)`. Columns are ordered by ordinal so that every
/// disjunct over the same column set yields the same operand.
fn classify_row_conjunction(children: &[Expr]) -> Option<Keyed> {
    if children.len() < 2 {
        return None;
    }
    let mut entries = Vec::with_capacity(children.len());
    let mut seen = FxHashSet::default();
    for child in children {
        let Expr::BinaryOp {
            op: BinaryOp::Eq, ..
        } = child
        else {
            return None;
        };
        let keyed = classify_leaf(child)?;
        let Operand::Column(index) = keyed.key.operand else {
            return None;
        };
        if !seen.insert(index) {
            return None;
        }
        let point = keyed.values.into_iter().next()?;
        let column = keyed.columns.into_iter().next()?;
        entries.push((index, keyed.key.types[0], column, point.into_iter().next()?));
    }
    entries.sort_by_key(|(index, ..)| *index);

    let mut indexes = Vec::with_capacity(entries.len());
    let mut types = Vec::with_capacity(entries.len());
    let mut columns = Vec::with_capacity(entries.len());
    let mut point = Vec::with_capacity(entries.len());
    for (index, ty, column, value) in entries {
        indexes.push(index);
        types.push(ty);
        columns.push(column);
        point.push(value);
    }
    Some(Keyed {
        key: GroupKey {
            operand: Operand::Row(indexes),
            types,
        },
        columns,
        values: BTreeSet::from([point]),
    })
}

fn scalar_point(value: &Expr) -> Option<(DataType, Point)> {
    let lit = value.as_literal()?;
    let ty = lit.data_type()?;
    Some((ty, vec![lit.clone()]))
}

fn row_point(value: &Expr, arity: usize) -> Option<(Vec<DataType>, Point)> {
    let lits = value.row_literals()?;
    if lits.len() != arity {
        return None;
    }
    let types = lits
        .iter()
        .map(|lit| lit.data_type())
        .collect::<Option<Vec<_>>>()?;
    Some((types, lits.into_iter().cloned().collect()))
}

fn distinct_columns(row: &Expr) -> Option<Vec<usize>> {
    let indexes = row.row_columns()?;
    let mut seen = FxHashSet::default();
    if indexes.is_empty() || !indexes.iter().all(|i| seen.insert(*i)) {
        return None;
    }
    Some(indexes)
}

/// The column or column tuple a passthrough predicate is about, if any.
pub(crate) fn governing_ordinals(expr: &Expr) -> Option<Vec<usize>> {
    fn operand_ordinals(e: &Expr) -> Option<Vec<usize>> {
        match e {
            Expr::Column { index, .. } => Some(vec![*index]),
            Expr::Row(_) => e.row_columns(),
            _ => None,
        }
    }

    match expr {
        Expr::BinaryOp { left, right, .. } => {
            operand_ordinals(left).or_else(|| operand_ordinals(right))
        }
        Expr::InList { expr, .. } | Expr::IsNull { expr, .. } => operand_ordinals(expr),
        Expr::Column { .. }
        | Expr::Literal(_)
        | Expr::Row(_)
        | Expr::And(_)
        | Expr::Or(_)
        | Expr::UnaryOp { .. } => None,
    }
}
