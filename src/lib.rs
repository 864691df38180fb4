//! Rewrite legacy `CM_MILES` aggregation queries into the `CORTES_MILES` schema.
#![warn(missing_docs)]

/// Currency-equality filter detection (`AND MONEDA = <code>`).
pub mod detector;
/// Batch and interactive drivers built on the shared rewriter.
pub mod driver;
/// Query rewriting: filter removal, table rename, and aggregation-column substitution.
pub mod rewriter;
