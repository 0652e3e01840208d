use std::fmt;

use pointfold_common::error::{Error, Result};
use pointfold_common::types::Literal;
use serde::{Deserialize, Serialize};

use crate::schema::PlanSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
}

/// A Boolean predicate or one of its operands.
///
/// `And` and `Or` are n-ary and keep their children in order. `Row` is an
/// ordered tuple and appears on either side of a row comparison: a tuple of
/// columns on the operand side, a tuple of literals on the value side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Column {
        name: String,
        index: usize,
    },
    Literal(Literal),
    Row(Vec<Expr>),
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    UnaryOp {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>, index: usize) -> Self {
        Expr::Column {
            name: name.into(),
            index,
        }
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn true_lit() -> Self {
        Expr::Literal(Literal::Bool(true))
    }

    pub fn false_lit() -> Self {
        Expr::Literal(Literal::Bool(false))
    }

    pub fn row(fields: Vec<Expr>) -> Self {
        Expr::Row(fields)
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::binary(left, BinaryOp::Eq, right)
    }

    pub fn in_list(expr: Expr, list: Vec<Expr>) -> Self {
        Expr::InList {
            expr: Box::new(expr),
            list,
            negated: false,
        }
    }

    pub fn and(children: Vec<Expr>) -> Self {
        Expr::And(children)
    }

    pub fn or(children: Vec<Expr>) -> Self {
        Expr::Or(children)
    }

    pub fn not(expr: Expr) -> Self {
        Expr::UnaryOp {
            op: UnaryOp::Not,
            expr: Box::new(expr),
        }
    }

    pub fn is_null(expr: Expr) -> Self {
        Expr::IsNull {
            expr: Box::new(expr),
            negated: false,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Expr::Literal(Literal::Bool(true)))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Expr::Literal(Literal::Bool(false)))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn column_index(&self) -> Option<usize> {
        match self {
            Expr::Column { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Ordinals of a `Row` made only of column references.
    pub fn row_columns(&self) -> Option<Vec<usize>> {
        match self {
            Expr::Row(fields) => fields.iter().map(Expr::column_index).collect(),
            _ => None,
        }
    }

    /// Values of a `Row` made only of literals.
    pub fn row_literals(&self) -> Option<Vec<&Literal>> {
        match self {
            Expr::Row(fields) => fields.iter().map(Expr::as_literal).collect(),
            _ => None,
        }
    }

    /// Checks column ordinals against `schema` and the arity of every row
    /// comparison. Types are not checked; no coercion happens downstream.
    pub fn validate(&self, schema: &PlanSchema) -> Result<()> {
        match self {
            Expr::Column { name, index } => {
                if schema.field(*index).is_none() {
                    return Err(Error::column_not_found(format!(
                        "{} (${}) in a schema of {} columns",
                        name,
                        index,
                        schema.len()
                    )));
                }
                Ok(())
            }
            Expr::Literal(_) => Ok(()),
            Expr::Row(fields) => fields.iter().try_for_each(|f| f.validate(schema)),
            Expr::BinaryOp { left, right, .. } => {
                left.validate(schema)?;
                right.validate(schema)?;
                check_same_arity(left, right)
            }
            Expr::InList { expr, list, .. } => {
                expr.validate(schema)?;
                for item in list {
                    item.validate(schema)?;
                    check_same_arity(expr, item)?;
                }
                Ok(())
            }
            Expr::And(children) | Expr::Or(children) => {
                children.iter().try_for_each(|c| c.validate(schema))
            }
            Expr::UnaryOp { expr, .. } | Expr::IsNull { expr, .. } => expr.validate(schema),
        }
    }
}

fn arity(expr: &Expr) -> Option<usize> {
    match expr {
        Expr::Row(fields) => Some(fields.len()),
        _ => None,
    }
}

fn check_same_arity(left: &Expr, right: &Expr) -> Result<()> {
    if arity(left) == arity(right) {
        return Ok(());
    }
    let describe = |e: &Expr| match arity(e) {
        Some(n) => format!("row of {}", n),
        None => "scalar".to_string(),
    };
    Err(Error::schema_mismatch(format!(
        "cannot compare {} with {} in {}",
        describe(left),
        describe(right),
        Expr::binary(left.clone(), BinaryOp::Eq, right.clone())
    )))
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column { index, .. } => write!(f, "${}", index),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Row(fields) => {
                write!(f, "ROW(")?;
                write_list(f, fields)?;
                write!(f, ")")
            }
            Expr::BinaryOp { left, op, right } => {
                write!(f, "{}({}, {})", op.symbol(), left, right)
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                if *negated {
                    write!(f, "NOT(")?;
                }
                write!(f, "IN({}", expr)?;
                for item in list {
                    write!(f, ", {}", item)?;
                }
                write!(f, ")")?;
                if *negated {
                    write!(f, ")")?;
                }
                Ok(())
            }
            Expr::And(children) => {
                write!(f, "AND(")?;
                write_list(f, children)?;
                write!(f, ")")
            }
            Expr::Or(children) => {
                write!(f, "OR(")?;
                write_list(f, children)?;
                write!(f, ")")
            }
            Expr::UnaryOp {
                op: UnaryOp::Not,
                expr,
            } => write!(f, "NOT({})", expr),
            Expr::IsNull { expr, negated } => {
                if *negated {
                    write!(f, "IS NOT NULL({})", expr)
                } else {
                    write!(f, "IS NULL({})", expr)
                }
            }
        }
    }
}
