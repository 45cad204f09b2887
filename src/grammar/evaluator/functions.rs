use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    grammar::{evaluator::core::EvalResult, value::Value},
};

/// Type alias for named function handlers.
///
/// A named function receives a slice of evaluated argument values and the
/// line number of the call site. It returns a value wrapped in
/// `EvalResult`.
pub type NamedFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a named function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means the function accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }
}

/// Defines the default functions by generating a lookup table and a name
/// list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the function.
///
/// The macro produces:
/// - `DefaultDef` (internal metadata),
/// - `DEFAULT_TABLE` (static table the registry is seeded from),
/// - `DEFAULT_FUNCTIONS` (public list of default function names).
macro_rules! default_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct DefaultDef {
            name:  &'static str,
            arity: Arity,
            func:  NamedFn,
        }
        static DEFAULT_TABLE: &[DefaultDef] = &[
            $(
                DefaultDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const DEFAULT_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

default_functions! {
    "sum"   => { arity: Arity::Exact(1), func: sum },
    "avg"   => { arity: Arity::Exact(1), func: avg },
    "sqrt"  => { arity: Arity::Exact(1), func: sqrt },
    "abs"   => { arity: Arity::Exact(1), func: abs },
    "floor" => { arity: Arity::Exact(1), func: |args, line| unary_round("floor", args, line) },
    "ceil"  => { arity: Arity::Exact(1), func: |args, line| unary_round("ceil", args, line) },
    "round" => { arity: Arity::Exact(1), func: |args, line| unary_round("round", args, line) },
    "min"   => { arity: Arity::Exact(2), func: |args, line| min_max("min", args, line) },
    "max"   => { arity: Arity::Exact(2), func: |args, line| min_max("max", args, line) },
}

#[derive(Clone, Copy)]
struct FunctionEntry {
    arity: Arity,
    func:  NamedFn,
}

/// The named-function table expressions dispatch calls through.
///
/// The registry is an explicit per-session object rather than state
/// registered onto a shared parser: every evaluate call receives a
/// reference to one, and two sessions never observe each other's
/// registrations. `Default` seeds the table with the aggregate functions
/// (`sum`, `avg`) and the numeric builtins.
///
/// # Example
/// ```
/// use reckon::grammar::{
///     evaluator::functions::{Arity, FunctionRegistry},
///     value::Value,
/// };
///
/// let mut registry = FunctionRegistry::default();
/// registry.register("double", Arity::Exact(1), |args, line| {
///             Ok(Value::Number(args[0].as_number(line)? * 2.0))
///         });
///
/// let result = registry.call("double", &[Value::Number(4.0)], 1).unwrap();
///
/// assert_eq!(result, Value::Number(8.0));
/// ```
pub struct FunctionRegistry {
    table: HashMap<String, FunctionEntry>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let table = DEFAULT_TABLE.iter()
                                 .map(|def| {
                                     (def.name.to_string(),
                                      FunctionEntry { arity: def.arity,
                                                      func:  def.func, })
                                 })
                                 .collect();
        Self { table }
    }
}

impl FunctionRegistry {
    /// Registers a named function, replacing any existing entry with the
    /// same name.
    pub fn register(&mut self, name: &str, arity: Arity, func: NamedFn) {
        self.table
            .insert(name.to_string(), FunctionEntry { arity, func });
    }

    /// Tests whether a function with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Dispatches a function call.
    ///
    /// The name is looked up in the table, the arity is verified, and the
    /// handler is invoked with the evaluated arguments.
    ///
    /// # Errors
    /// - `UnknownFunction` if no function with the given name exists.
    /// - `ArgumentCountMismatch` if the arity check fails.
    pub fn call(&self, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
        let entry = self.table
                        .get(name)
                        .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                       line })?;

        if !entry.arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { line });
        }

        (entry.func)(args, line)
    }
}

/// Extracts the numeric elements of an array value.
///
/// Returns `None` when the value is not an array or any element is not a
/// number. The aggregates use this to implement their defensive fallback.
fn numeric_items(value: &Value) -> Option<Vec<f64>> {
    let Value::Array(items) = value else {
        return None;
    };
    items.iter()
         .map(|item| match item {
             Value::Number(n) => Some(*n),
             _ => None,
         })
         .collect()
}

/// Returns the arithmetic sum of a numeric array.
///
/// A malformed argument (not an array, or an array containing a
/// non-numeric element) yields `0` rather than an error.
///
/// # Example
/// ```
/// use reckon::grammar::{evaluator::functions::sum, value::Value};
///
/// let arr: Value = vec![Value::Number(1.0), Value::Number(2.0)].into();
///
/// assert_eq!(sum(&[arr], 1).unwrap(), Value::Number(3.0));
/// assert_eq!(sum(&[Value::Number(5.0)], 1).unwrap(), Value::Number(0.0));
/// ```
pub fn sum(args: &[Value], _line: usize) -> EvalResult<Value> {
    let total = numeric_items(&args[0]).map_or(0.0, |items| items.iter().sum());
    Ok(Value::Number(total))
}

/// Returns the arithmetic mean of a numeric array.
///
/// Shares [`sum`]'s defensive fallback, and additionally yields `0` for an
/// empty array instead of dividing by zero.
pub fn avg(args: &[Value], _line: usize) -> EvalResult<Value> {
    let mean = numeric_items(&args[0]).map_or(0.0, |items| {
                                          if items.is_empty() {
                                              0.0
                                          } else {
                                              #[allow(clippy::cast_precision_loss)]
                                              let count = items.len() as f64;
                                              items.iter().sum::<f64>() / count
                                          }
                                      });
    Ok(Value::Number(mean))
}

/// Returns the square root of a number.
fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number(line)?.sqrt()))
}

/// Returns the absolute value of a number.
fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number(line)?.abs()))
}

/// Applies a rounding function (`floor`, `ceil`, or `round`) to a number.
fn unary_round(kind: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let n = args[0].as_number(line)?;
    let rounded = match kind {
        "floor" => n.floor(),
        "ceil" => n.ceil(),
        _ => n.round(),
    };
    Ok(Value::Number(rounded))
}

/// Returns the smaller (`min`) or larger (`max`) of two numbers.
fn min_max(kind: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_number(line)?;
    let b = args[1].as_number(line)?;
    let chosen = if kind == "min" { a.min(b) } else { a.max(b) };
    Ok(Value::Number(chosen))
}
