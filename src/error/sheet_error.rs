use crate::error::{ParseError, RuntimeError};

#[derive(Debug)]
/// A failure of a whole-sheet operation.
///
/// Classification and evaluation are atomic: the first parse or runtime
/// failure anywhere in the statement list aborts the call, and this type
/// carries the underlying error's description to the caller.
pub enum SheetError {
    /// A statement or sub-expression failed to parse.
    Parse(ParseError),
    /// A statement failed to evaluate.
    Runtime(RuntimeError),
}

impl From<ParseError> for SheetError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for SheetError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Runtime(error) => Some(error),
        }
    }
}
