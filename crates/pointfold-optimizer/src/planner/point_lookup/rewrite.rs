use std::cmp::Ordering;

use indexmap::IndexMap;
use indexmap::map::Entry;
use pointfold_common::types::Literal;
use pointfold_ir::Expr;
use tracing::debug;

use super::key::{Connective, GroupKey, classify, governing_ordinals};
use super::merge::{Cluster, Merged};

/// Whether the caller only distinguishes TRUE from not-TRUE (a filter or
/// join condition) or needs the exact three-valued result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    Filter,
    Value,
}

impl Context {
    fn null_as_false(self) -> bool {
        matches!(self, Context::Filter)
    }
}

pub(crate) struct Rewritten {
    pub(crate) expr: Expr,
    pub(crate) changed: bool,
}

impl Rewritten {
    fn unchanged(expr: Expr) -> Self {
        Self {
            expr,
            changed: false,
        }
    }
}

/// A predicate produced for the output child list, with what it sorts by.
struct Produced {
    ordinals: Option<Vec<usize>>,
    position: usize,
    expr: Expr,
}

impl Produced {
    /// Governed predicates first, by operand ordinals, then by input position.
    fn output_order(&self, other: &Self) -> Ordering {
        match (&self.ordinals, &other.ordinals) {
            (Some(a), Some(b)) => a.cmp(b).then(self.position.cmp(&other.position)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.position.cmp(&other.position),
        }
    }
}

pub(crate) struct Rewriter {
    min_cluster_size: usize,
}

impl Rewriter {
    pub(crate) fn new(min_cluster_size: usize) -> Self {
        Self { min_cluster_size }
    }

    pub(crate) fn rewrite(&self, expr: Expr, ctx: Context) -> Rewritten {
        match expr {
            Expr::And(children) => self.rewrite_connective(Connective::And, children, ctx),
            Expr::Or(children) => self.rewrite_connective(Connective::Or, children, ctx),
            Expr::UnaryOp { op, expr: inner } => {
                let inner = self.rewrite(*inner, Context::Value);
                Rewritten {
                    changed: inner.changed,
                    expr: Expr::UnaryOp {
                        op,
                        expr: Box::new(inner.expr),
                    },
                }
            }
            Expr::BinaryOp { left, op, right } => {
                let left = self.rewrite(*left, Context::Value);
                let right = self.rewrite(*right, Context::Value);
                self.render_lone(Rewritten {
                    changed: left.changed || right.changed,
                    expr: Expr::BinaryOp {
                        left: Box::new(left.expr),
                        op,
                        right: Box::new(right.expr),
                    },
                })
            }
            Expr::InList {
                expr: inner,
                list,
                negated,
            } => {
                let inner = self.rewrite(*inner, Context::Value);
                let list = self.rewrite_all(list);
                self.render_lone(Rewritten {
                    changed: inner.changed || list.changed,
                    expr: Expr::InList {
                        expr: Box::new(inner.expr),
                        list: list.exprs,
                        negated,
                    },
                })
            }
            Expr::IsNull {
                expr: inner,
                negated,
            } => {
                let inner = self.rewrite(*inner, Context::Value);
                Rewritten {
                    changed: inner.changed,
                    expr: Expr::IsNull {
                        expr: Box::new(inner.expr),
                        negated,
                    },
                }
            }
            Expr::Row(fields) => {
                let fields = self.rewrite_all(fields);
                Rewritten {
                    changed: fields.changed,
                    expr: Expr::Row(fields.exprs),
                }
            }
            leaf @ (Expr::Column { .. } | Expr::Literal(_)) => Rewritten::unchanged(leaf),
        }
    }

    /// With a threshold of one, a lookup that is not a child of any `AND` or
    /// `OR` is rendered as a one-member cluster would be, so wrapping it in
    /// a single-child connective does not change the result.
    fn render_lone(&self, rewritten: Rewritten) -> Rewritten {
        if self.min_cluster_size > 1 {
            return rewritten;
        }
        let Some(keyed) = classify(&rewritten.expr, Connective::Or) else {
            return rewritten;
        };
        match Cluster::new(0, rewritten.expr.clone(), keyed).merge(1, false) {
            Merged::Replace { expr, .. } => Rewritten {
                expr,
                changed: true,
            },
            Merged::Keep(_) | Merged::Contradiction => rewritten,
        }
    }

    fn rewrite_all(&self, exprs: Vec<Expr>) -> RewrittenList {
        let mut changed = false;
        let exprs = exprs
            .into_iter()
            .map(|e| {
                let r = self.rewrite(e, Context::Value);
                changed |= r.changed;
                r.expr
            })
            .collect();
        RewrittenList { exprs, changed }
    }

    fn rewrite_connective(
        &self,
        connective: Connective,
        children: Vec<Expr>,
        ctx: Context,
    ) -> Rewritten {
        let absorbing = connective.absorbing();
        let mut changed = false;
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            let r = self.rewrite(child, ctx);
            changed |= r.changed;
            match r.expr {
                Expr::And(nested) if connective == Connective::And => {
                    changed = true;
                    flat.extend(nested);
                }
                Expr::Or(nested) if connective == Connective::Or => {
                    changed = true;
                    flat.extend(nested);
                }
                constant if constant.is_true() || constant.is_false() => {
                    if constant.is_true() == absorbing {
                        return Rewritten {
                            expr: constant,
                            changed: true,
                        };
                    }
                    changed = true;
                }
                other => flat.push(other),
            }
        }

        let mut clusters: IndexMap<GroupKey, Cluster> = IndexMap::new();
        let mut produced = Vec::with_capacity(flat.len());
        for (position, child) in flat.into_iter().enumerate() {
            match classify(&child, connective) {
                Some(keyed) => match clusters.entry(keyed.key.clone()) {
                    Entry::Occupied(mut entry) => {
                        entry.get_mut().absorb(position, child, keyed, connective)
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(Cluster::new(position, child, keyed));
                    }
                },
                None => produced.push(Produced {
                    ordinals: governing_ordinals(&child),
                    position,
                    expr: child,
                }),
            }
        }

        for cluster in clusters.into_values() {
            let ordinals = cluster.key.operand.ordinals().to_vec();
            match cluster.merge(self.min_cluster_size, ctx.null_as_false()) {
                Merged::Keep(members) => {
                    produced.extend(members.into_iter().map(|m| Produced {
                        ordinals: Some(ordinals.clone()),
                        position: m.position,
                        expr: m.expr,
                    }))
                }
                Merged::Replace { position, expr } => {
                    changed = true;
                    produced.push(Produced {
                        ordinals: Some(ordinals),
                        position,
                        expr,
                    });
                }
                Merged::Contradiction => {
                    debug!(?connective, "conjunction folded to FALSE");
                    return Rewritten {
                        expr: Expr::Literal(Literal::Bool(false)),
                        changed: true,
                    };
                }
            }
        }

        if !changed && produced.len() >= 2 {
            produced.sort_by_key(|p| p.position);
            let exprs = produced.into_iter().map(|p| p.expr).collect();
            return Rewritten::unchanged(connective.build(exprs));
        }

        produced.sort_by(Produced::output_order);
        let mut exprs: Vec<Expr> = produced.into_iter().map(|p| p.expr).collect();
        let expr = match exprs.len() {
            0 => Expr::Literal(Literal::Bool(!absorbing)),
            1 => exprs.remove(0),
            _ => connective.build(exprs),
        };
        debug!(?connective, %expr, "node rewritten");
        Rewritten {
            expr,
            changed: true,
        }
    }
}

struct RewrittenList {
    exprs: Vec<Expr>,
    changed: bool,
}
