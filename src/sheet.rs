/// Statement splitting and alias extraction.
///
/// Turns raw sheet text into an ordered statement list plus a display-alias
/// map. Pure and infallible: a malformed alias line is dropped, never
/// fatal.
pub mod split;

/// Dependency classification.
///
/// Determines, for a statement list, which identifiers are inputs the
/// caller must supply and which are outputs the sheet computes.
pub mod classify;

/// Statement evaluation.
///
/// Resolves raw input bindings to numbers, then evaluates statements left
/// to right against a mutable binding environment, producing the outputs
/// and the final result.
pub mod evaluate;

/// Editable sheet sessions.
///
/// Ties splitting, classification, and evaluation together into a session
/// that carries input values forward across text edits and snapshots
/// to/from persistence records.
pub mod worksheet;
