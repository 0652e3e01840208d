use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::schema::PlanSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

/// The relational operators a predicate can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalPlan {
    Scan {
        table_name: String,
        schema: PlanSchema,
    },
    Filter {
        input: Box<LogicalPlan>,
        predicate: Expr,
    },
    Project {
        input: Box<LogicalPlan>,
        expressions: Vec<Expr>,
        schema: PlanSchema,
    },
    Join {
        left: Box<LogicalPlan>,
        right: Box<LogicalPlan>,
        join_type: JoinType,
        condition: Option<Expr>,
        schema: PlanSchema,
    },
}

impl LogicalPlan {
    pub fn scan(table_name: impl Into<String>, schema: PlanSchema) -> Self {
        LogicalPlan::Scan {
            table_name: table_name.into(),
            schema,
        }
    }

    pub fn filter(input: LogicalPlan, predicate: Expr) -> Self {
        LogicalPlan::Filter {
            input: Box::new(input),
            predicate,
        }
    }

    /// Joins `left` and `right`; the output schema, against which the
    /// condition is resolved, is the left schema followed by the right one.
    pub fn join(
        left: LogicalPlan,
        right: LogicalPlan,
        join_type: JoinType,
        condition: Option<Expr>,
    ) -> Self {
        let schema = left.schema().merge(right.schema());
        LogicalPlan::Join {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            condition,
            schema,
        }
    }

    pub fn schema(&self) -> &PlanSchema {
        match self {
            LogicalPlan::Scan { schema, .. } => schema,
            LogicalPlan::Filter { input, .. } => input.schema(),
            LogicalPlan::Project { schema, .. } => schema,
            LogicalPlan::Join { schema, .. } => schema,
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            LogicalPlan::Scan { table_name, .. } => writeln!(f, "{}Scan: {}", pad, table_name),
            LogicalPlan::Filter { input, predicate } => {
                writeln!(f, "{}Filter: {}", pad, predicate)?;
                input.fmt_indented(f, depth + 1)
            }
            LogicalPlan::Project {
                input, expressions, ..
            } => {
                write!(f, "{}Project: ", pad)?;
                for (i, e) in expressions.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                writeln!(f)?;
                input.fmt_indented(f, depth + 1)
            }
            LogicalPlan::Join {
                left,
                right,
                join_type,
                condition,
                ..
            } => {
                match condition {
                    Some(c) => writeln!(f, "{}Join({:?}): {}", pad, join_type, c)?,
                    None => writeln!(f, "{}Join({:?})", pad, join_type)?,
                }
                left.fmt_indented(f, depth + 1)?;
                right.fmt_indented(f, depth + 1)
            }
        }
    }
}

impl fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
