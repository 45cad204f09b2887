use indexmap::IndexMap;

use crate::{
    error::{RuntimeError, SheetError},
    grammar::{
        evaluator::{core::Context, functions::FunctionRegistry},
        parser::core::parse,
        value::Value,
    },
    sheet::split::split_assignment,
};

/// A raw input value supplied for one input variable.
///
/// Raw values arrive either as numbers or as text. Text is parsed and
/// evaluated as a sub-expression, which lets one input be a plain numeric
/// string (`"4"`) or be defined in terms of another input (`"a + 1"`).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A value that is already numeric.
    Number(f64),
    /// A value to be parsed and evaluated as an expression.
    Text(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// The outcome of a successful evaluate call.
///
/// Holds the value of the last evaluated statement and the computed output
/// variables in statement order. A failed call produces no `Evaluation` at
/// all; partial results from statements before the failure are discarded,
/// never exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    result:  Option<Value>,
    outputs: IndexMap<String, Value>,
}

impl Evaluation {
    /// The value produced by the last statement evaluated, whether an
    /// assignment's value or a bare expression's value. `None` when the
    /// statement list held nothing to evaluate.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Iterates the computed output variables in statement order.
    ///
    /// Names beginning with `$` are reserved for a sheet's internal
    /// scratch values and are excluded from this enumeration; use
    /// [`Evaluation::output`] to read one directly.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.outputs
            .iter()
            .filter(|(name, _)| !name.starts_with('$'))
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Looks up a computed output variable by name, including reserved
    /// `$`-prefixed names.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&Value> {
        self.outputs.get(name)
    }
}

/// Evaluates a statement list against supplied input bindings.
///
/// Raw bindings are resolved to numbers first, then the statements are
/// evaluated left to right against a single binding environment, mutated in
/// place: an assignment writes its value into the environment (so later
/// statements can reference it) and into the output mapping, and each
/// statement's value becomes the running result. An assignment whose
/// trimmed left-hand side ends with `)` is not treated as an assignment
/// (function-call syntax cannot be an assignment target); the whole
/// statement is evaluated as a bare expression instead, with `=` read as
/// equality.
///
/// # Errors
/// Any parse or evaluation failure anywhere aborts the entire call; the
/// error carries the underlying description and no outputs are produced.
///
/// # Example
/// ```
/// use indexmap::IndexMap;
/// use reckon::{
///     grammar::{evaluator::functions::FunctionRegistry, value::Value},
///     sheet::evaluate::{RawValue, evaluate},
/// };
///
/// let statements: Vec<String> = ["x = 2", " y = x * 3", " y + 1"].iter()
///                                                                .map(|s| s.to_string())
///                                                                .collect();
/// let functions = FunctionRegistry::default();
/// let outcome = evaluate(&statements, &IndexMap::new(), &functions).unwrap();
///
/// assert_eq!(outcome.result(), Some(&Value::Number(7.0)));
/// assert_eq!(outcome.output("y"), Some(&Value::Number(6.0)));
/// ```
pub fn evaluate(statements: &[String],
                bindings: &IndexMap<String, RawValue>,
                functions: &FunctionRegistry)
                -> Result<Evaluation, SheetError> {
    let mut ctx = resolve_bindings(bindings, functions)?;

    let mut result = None;
    let mut outputs = IndexMap::new();

    for statement in statements {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        match split_assignment(statement) {
            Some((lhs, rhs)) if !lhs.trim().ends_with(')') => {
                let expr = parse(rhs.trim())?;
                let value = ctx.eval(&expr)?;
                let name = lhs.trim().to_string();

                ctx.define(name.clone(), value.clone());
                outputs.insert(name, value.clone());
                result = Some(value);
            },
            _ => {
                let expr = parse(statement)?;
                result = Some(ctx.eval(&expr)?);
            },
        }
    }

    Ok(Evaluation { result, outputs })
}

/// Resolves raw input bindings into a numeric binding environment.
///
/// Entries are resolved in map order, each against the environment built
/// so far; this is the resolution order for inputs defined in terms of
/// other inputs. Numbers bind directly. Text that trims to nothing is an
/// unsupplied input and binds nothing (a statement referencing it later
/// fails with an unknown-variable error). Other text is parsed and
/// evaluated; when that evaluation fails only because it references a name
/// with no binding yet, the input binds NaN. Circular or forward
/// references among raw inputs are misuse and yield not-a-number, not a
/// detected-cycle error.
fn resolve_bindings<'f>(bindings: &IndexMap<String, RawValue>,
                        functions: &'f FunctionRegistry)
                        -> Result<Context<'f>, SheetError> {
    let mut ctx = Context::new(functions);

    for (name, raw) in bindings {
        match raw {
            RawValue::Number(n) => ctx.define(name.clone(), Value::Number(*n)),
            RawValue::Text(text) => {
                if text.trim().is_empty() {
                    continue;
                }

                let expr = parse(text)?;
                match ctx.eval(&expr) {
                    Ok(value) => ctx.define(name.clone(), value),
                    Err(RuntimeError::UnknownVariable { .. }) => {
                        ctx.define(name.clone(), Value::Number(f64::NAN));
                    },
                    Err(error) => return Err(error.into()),
                }
            },
        }
    }

    Ok(ctx)
}
