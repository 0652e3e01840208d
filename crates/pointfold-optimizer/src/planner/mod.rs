pub mod point_lookup;

pub use point_lookup::{apply_point_lookup, canonicalize_expr, canonicalize_predicate};
