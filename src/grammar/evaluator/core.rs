use std::collections::HashMap;

use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    grammar::{evaluator::functions::FunctionRegistry, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the binding environment an expression is evaluated against.
///
/// The context holds the variable bindings resolved so far and a reference
/// to the function registry used to dispatch calls. The sheet evaluator
/// owns one context per evaluate call: it defines resolved inputs up front
/// and writes each assignment's value back in statement order, so later
/// statements see earlier results.
pub struct Context<'f> {
    vars:      HashMap<String, Value>,
    functions: &'f FunctionRegistry,
}

impl<'f> Context<'f> {
    /// Creates an empty context dispatching calls through `functions`.
    #[must_use]
    pub fn new(functions: &'f FunctionRegistry) -> Self {
        Self { vars: HashMap::new(),
               functions }
    }

    /// Binds `name` to `value`, replacing any existing binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Looks up the current binding for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// variables, unary and binary operations, function calls, array
    /// literals, and array indexing.
    ///
    /// # Example
    /// ```
    /// use reckon::grammar::{
    ///     evaluator::{core::Context, functions::FunctionRegistry},
    ///     parser::core::parse,
    ///     value::Value,
    /// };
    ///
    /// let functions = FunctionRegistry::default();
    /// let mut ctx = Context::new(&functions);
    /// ctx.define("x", Value::Number(4.0));
    ///
    /// let expr = parse("x * 2 + 1").unwrap();
    ///
    /// assert_eq!(ctx.eval(&expr).unwrap(), Value::Number(9.0));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok((*value).into()),
            Expr::Variable { name, line } => {
                self.vars
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                   line: *line, })
            },
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => {
                let mut arg_vals = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    arg_vals.push(self.eval(argument)?);
                }
                self.functions.call(name, &arg_vals, *line)
            },
            Expr::ArrayLiteral { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval(element)?);
                }
                Ok(items.into())
            },
            Expr::ArrayIndex { array, index, line } => {
                self.eval_array_index(array, index, *line)
            },
        }
    }

    fn eval_unary_op(&self, op: UnaryOperator, expr: &Expr, line: usize) -> EvalResult<Value> {
        let value = self.eval(expr)?;
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-value.as_number(line)?)),
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }

    /// Evaluates `array[index]`.
    ///
    /// The index must be a non-negative whole number within bounds.
    fn eval_array_index(&self, array: &Expr, index: &Expr, line: usize) -> EvalResult<Value> {
        let array = self.eval(array)?;
        let items = array.as_array(line)?;
        let index = self.eval(index)?.as_number(line)?;

        if index.fract() != 0.0 || index < 0.0 {
            return Err(RuntimeError::InvalidArgument { details: format!("index must be a non-negative whole number, got {index}"),
                                                       line });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = index as usize;
        items.get(position)
             .cloned()
             .ok_or(RuntimeError::IndexOutOfBounds { max: items.len().saturating_sub(1),
                                                     found: position,
                                                     line })
    }
}
