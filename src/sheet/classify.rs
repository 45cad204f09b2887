use indexmap::IndexSet;

use crate::{
    error::ParseError,
    grammar::parser::core::parse,
    sheet::split::split_assignment,
};

/// Classifies the identifiers of a statement list into required inputs.
///
/// For every assignment statement, the right-hand side's free variables are
/// collected as candidate inputs and the trimmed left-hand side is recorded
/// as an output. For every bare-expression statement, the whole statement's
/// free variables are candidate inputs. After all statements are processed,
/// every output name is removed from the candidates: an identifier that is
/// ever assigned is never an input, regardless of where in the list it is
/// read. Classification is whole-list, not per-position: a variable
/// assigned by statement 3 and read by statement 1 is still excluded.
///
/// The returned names are unique and ordered by first appearance.
/// Statements that trim to nothing are skipped, so a trailing `;` is
/// harmless.
///
/// # Errors
/// If any statement fails to parse, classification fails as a whole;
/// callers must treat the entire variable set as unknown rather than
/// partially reporting.
///
/// # Example
/// ```
/// use reckon::sheet::classify::classify;
///
/// let statements = vec!["a = 1".to_string(), "a + b".to_string()];
/// let inputs = classify(&statements).unwrap();
///
/// assert_eq!(inputs, ["b"]);
/// ```
pub fn classify(statements: &[String]) -> Result<Vec<String>, ParseError> {
    let mut input_vars: IndexSet<String> = IndexSet::new();
    let mut output_vars: IndexSet<String> = IndexSet::new();

    for statement in statements {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        match split_assignment(statement) {
            Some((lhs, rhs)) => {
                let expr = parse(rhs.trim())?;
                input_vars.extend(expr.free_variables());
                output_vars.insert(lhs.trim().to_string());
            },
            None => {
                let expr = parse(statement)?;
                input_vars.extend(expr.free_variables());
            },
        }
    }

    for name in &output_vars {
        input_vars.shift_remove(name);
    }

    Ok(input_vars.into_iter().collect())
}
