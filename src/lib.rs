//! # reckon
//!
//! reckon is a deduction-and-evaluation engine for free-form calculation
//! sheets. A sheet is raw text containing semicolon-separated statements,
//! each either a bare expression or a `name = expression` assignment. The
//! engine statically classifies every identifier as an input (a value the
//! caller must supply) or an output (a value the sheet computes), then
//! evaluates the statements left to right against the supplied bindings to
//! produce the outputs and a final result.
//!
//! Comment lines of the form `// name: Display Name` attach cosmetic
//! display aliases to variables without affecting evaluation.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of a single expression as a tree. The AST is built by
/// the parser, traversed by the evaluator, and walked by the dependency
/// classifier to extract free variables.
///
/// # Responsibilities
/// - Defines expression node types for all supported constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
/// - Provides free-variable extraction for dependency classification.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating sheet statements. It standardizes error reporting and
/// carries detailed information about failures, including error kinds,
/// descriptions, and source locations.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Collapses parse and runtime failures into a single sheet-level error.
pub mod error;
/// The expression grammar: lexer, parser, values, and evaluation context.
///
/// This module provides the expression-language capability the sheet engine
/// depends on: numeric literals, named variables, arithmetic, comparison and
/// boolean operators, parentheses, array literals, and calls into a
/// registrable named-function table.
///
/// # Responsibilities
/// - Tokenizes and parses a single expression into an AST.
/// - Evaluates expressions against a variable binding environment.
/// - Hosts the function registry, including the `sum`/`avg` aggregates.
pub mod grammar;
/// The sheet engine: splitting, classification, evaluation, sessions.
///
/// This is the core of the crate. It turns raw sheet text into an ordered
/// statement list plus an alias map, classifies identifiers into inputs and
/// outputs, and evaluates the statements against supplied input bindings.
/// The [`sheet::worksheet::Worksheet`] type ties these together into an
/// editable session with carried-forward input values.
///
/// # Responsibilities
/// - Splits sheet text into statements and display aliases.
/// - Classifies free variables into required inputs.
/// - Evaluates statements and exposes outputs and the final result.
pub mod sheet;
/// The persistence boundary: records, stores, and identity.
///
/// Sheets round-trip through an external key-value store as flat records.
/// This module defines the record shape, the store and identity-provider
/// traits the engine consumes, an in-memory store used by tests, and the
/// deterministic display-name hash that keys save-by-name records.
pub mod store;
