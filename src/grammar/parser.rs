/// Parse entry points.
///
/// Contains the top-level `parse` function that lexes a statement and parses
/// it into a single expression, plus the shared `parse_expression` entry the
/// precedence levels recurse through.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence ladder for all binary operators, from logical
/// OR down to exponentiation.
pub mod binary;

/// Unary, postfix, and primary expression parsing.
///
/// Handles prefix operators, array indexing, literals, identifiers,
/// function calls, groupings, and array literals.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides helpers shared between argument lists and array literals.
pub mod utils;
