/// Core evaluation logic for expressions and values.
///
/// Contains the binding context, expression dispatch, and core error
/// propagation.
pub mod core;

/// Binary operator evaluation.
///
/// Implements evaluation for all binary operations, including arithmetic,
/// comparisons, and logical operators.
pub mod binary;

/// The named-function registry and its default table.
///
/// Hosts the registrable function table the grammar dispatches calls
/// through, the numeric builtins, and the `sum`/`avg` aggregates.
pub mod functions;
