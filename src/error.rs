/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of sheet
/// statements. Parse errors include syntax mistakes, unexpected tokens, and
/// any other issues detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include unknown variables or functions, type mismatches, and
/// invalid arguments.
pub mod runtime_error;
/// Sheet-level errors.
///
/// Collapses parse and runtime failures into the single error type returned
/// by whole-sheet operations (classification and evaluation).
pub mod sheet_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use sheet_error::SheetError;
