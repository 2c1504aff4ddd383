/// Heatmap analysis for PMIS condition exports.
///
/// Submodules:
/// - `groupings` — organizes flat records into per-heatmap groups.
/// - `thresholds` — the per-heatmap predicates (low scores, sparse data).
/// - `summary` — rolls predicate results up into run-wide counts.

pub mod groupings;
pub mod summary;
pub mod thresholds;
