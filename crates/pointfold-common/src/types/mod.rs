use std::fmt;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int32,
    Int64,
    Float64,
    Numeric,
    String,
    Date,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "BOOL"),
            DataType::Int32 => write!(f, "INT32"),
            DataType::Int64 => write!(f, "INT64"),
            DataType::Float64 => write!(f, "FLOAT64"),
            DataType::Numeric => write!(f, "NUMERIC"),
            DataType::String => write!(f, "STRING"),
            DataType::Date => write!(f, "DATE"),
        }
    }
}

/// A typed constant.
///
/// Equality, hashing and ordering are exact and type-aware: `Int64(1)` and
/// `Float64(1.0)` are different literals. Values of one type order naturally
/// (ascending); values of different types order by variant, which only
/// matters for keeping collections deterministic.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(OrderedFloat<f64>),
    Numeric(Decimal),
    String(String),
    Date(NaiveDate),
}

impl Literal {
    pub fn int32(v: i32) -> Self {
        Literal::Int32(v)
    }

    pub fn int64(v: i64) -> Self {
        Literal::Int64(v)
    }

    pub fn float64(v: f64) -> Self {
        Literal::Float64(OrderedFloat(v))
    }

    pub fn numeric(v: Decimal) -> Self {
        Literal::Numeric(v)
    }

    pub fn string(v: impl Into<String>) -> Self {
        Literal::String(v.into())
    }

    pub fn date(v: NaiveDate) -> Self {
        Literal::Date(v)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// The exact type of this literal; `None` for an untyped NULL.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Literal::Null => None,
            Literal::Bool(_) => Some(DataType::Bool),
            Literal::Int32(_) => Some(DataType::Int32),
            Literal::Int64(_) => Some(DataType::Int64),
            Literal::Float64(_) => Some(DataType::Float64),
            Literal::Numeric(_) => Some(DataType::Numeric),
            Literal::String(_) => Some(DataType::String),
            Literal::Date(_) => Some(DataType::Date),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int32(v) => Some(f64::from(*v)),
            Literal::Int64(v) => Some(*v as f64),
            Literal::Float64(v) => Some(v.0),
            Literal::Numeric(v) => v.to_f64(),
            _ => None,
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Int32(v) => write!(f, "{}:INT32", v),
            Literal::Int64(v) => write!(f, "{}", v),
            Literal::Float64(v) => write!(f, "{:?}:FLOAT64", v.0),
            Literal::Numeric(v) => write!(f, "{}:NUMERIC", v),
            Literal::String(v) => write!(f, "'{}'", v),
            Literal::Date(v) => write!(f, "DATE '{}'", v),
        }
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int32(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int64(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::float64(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::String(v.to_string())
    }
}
