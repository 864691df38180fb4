/// Target column and rewrite-kind enums shared across the crate.
pub mod columns;
/// Whitespace collapsing and clause-removal cleanup applied to every output.
pub mod normalize;
/// The rewrite entry point branching on the detected currency filter.
pub mod query_rewriter;
