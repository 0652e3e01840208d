use pointfold_ir::Expr;
use tracing::trace;

use super::key::{Connective, GroupKey, Keyed, Operand, ValueSet};

/// A child of the node being rewritten, with its position among the
/// (flattened) children.
#[derive(Clone, Debug)]
pub(crate) struct Member {
    pub(crate) position: usize,
    pub(crate) expr: Expr,
}

/// Children sharing one [`GroupKey`], and the values they combine to.
#[derive(Debug)]
pub(crate) struct Cluster {
    pub(crate) key: GroupKey,
    columns: Vec<Expr>,
    values: ValueSet,
    members: Vec<Member>,
    intersected: bool,
}

pub(crate) enum Merged {
    /// The members stay as they were given.
    Keep(Vec<Member>),
    /// The members collapse into one predicate placed at `position`.
    Replace { position: usize, expr: Expr },
    /// Empty intersection: the enclosing conjunction can never hold.
    Contradiction,
}

impl Cluster {
    pub(crate) fn new(position: usize, expr: Expr, keyed: Keyed) -> Self {
        Self {
            key: keyed.key,
            columns: keyed.columns,
            values: keyed.values,
            members: vec![Member { position, expr }],
            intersected: false,
        }
    }

    pub(crate) fn absorb(
        &mut self,
        position: usize,
        expr: Expr,
        keyed: Keyed,
        connective: Connective,
    ) {
        debug_assert_eq!(self.key, keyed.key);
        match connective {
            Connective::Or => self.values.extend(keyed.values),
            Connective::And => {
                self.values.retain(|point| keyed.values.contains(point));
                self.intersected = true;
            }
        }
        self.members.push(Member { position, expr });
    }

    /// Decides what the cluster becomes. Clusters with fewer than
    /// `min_cluster_size` members are kept verbatim.
    ///
    /// Unless `null_as_false` holds, an intersection is only rewritten when it
    /// is non-empty and over a single column: a conjunction of row lookups on
    /// a partly NULL row can be NULL where the intersected lookup is FALSE.
    pub(crate) fn merge(self, min_cluster_size: usize, null_as_false: bool) -> Merged {
        if self.members.len() < min_cluster_size {
            trace!(
                members = self.members.len(),
                min_cluster_size, "cluster below threshold, kept"
            );
            return Merged::Keep(self.members);
        }
        if self.intersected && !null_as_false && matches!(self.key.operand, Operand::Row(_)) {
            return Merged::Keep(self.members);
        }
        if self.values.is_empty() {
            if null_as_false {
                trace!(operand = ?self.key.operand, "empty intersection");
                return Merged::Contradiction;
            }
            return Merged::Keep(self.members);
        }

        let expr = render(&self.key.operand, &self.columns, &self.values);
        let already_canonical = matches!(self.members.as_slice(), [only] if only.expr == expr);
        if already_canonical {
            return Merged::Keep(self.members);
        }
        trace!(
            operand = ?self.key.operand,
            members = self.members.len(),
            values = self.values.len(),
            "cluster merged"
        );
        Merged::Replace {
            position: self.members[0].position,
            expr,
        }
    }
}

/// Renders a non-empty value set as an equality for a single value, or as an
/// `IN` list with values in ascending order.
pub(crate) fn render(operand: &Operand, columns: &[Expr], values: &ValueSet) -> Expr {
    let operand_expr = match operand {
        Operand::Column(_) => columns[0].clone(),
        Operand::Row(_) => Expr::Row(columns.to_vec()),
    };
    let mut items: Vec<Expr> = values
        .iter()
        .map(|point| match operand {
            Operand::Column(_) => Expr::Literal(point[0].clone()),
            Operand::Row(_) => Expr::Row(point.iter().cloned().map(Expr::Literal).collect()),
        })
        .collect();

    if items.len() == 1 {
        Expr::eq(operand_expr, items.remove(0))
    } else {
        Expr::in_list(operand_expr, items)
    }
}
