use crate::{
    ast::{BinaryOperator, Expr},
    grammar::{evaluator::core::{Context, EvalResult}, value::Value},
};

impl Context<'_> {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated first, then combined according to the
    /// operator:
    /// - arithmetic (`+ - * / ^ %`) requires numeric operands and follows
    ///   IEEE-754 semantics (`1 / 0` is infinity, NaN propagates),
    /// - ordering comparisons (`< > <= >=`) require numeric operands and
    ///   produce booleans,
    /// - equality (`==`, `!=`) compares values structurally; NaN compares
    ///   unequal to itself,
    /// - logic (`and`, `or`) requires boolean operands. Both sides are
    ///   always evaluated; there is no short-circuiting.
    pub(crate) fn eval_binary_op(&self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize)
                                 -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;

        match op {
            BinaryOperator::Add => {
                Ok(Value::Number(lhs.as_number(line)? + rhs.as_number(line)?))
            },
            BinaryOperator::Sub => {
                Ok(Value::Number(lhs.as_number(line)? - rhs.as_number(line)?))
            },
            BinaryOperator::Mul => {
                Ok(Value::Number(lhs.as_number(line)? * rhs.as_number(line)?))
            },
            BinaryOperator::Div => {
                Ok(Value::Number(lhs.as_number(line)? / rhs.as_number(line)?))
            },
            BinaryOperator::Mod => {
                Ok(Value::Number(lhs.as_number(line)? % rhs.as_number(line)?))
            },
            BinaryOperator::Pow => {
                Ok(Value::Number(lhs.as_number(line)?.powf(rhs.as_number(line)?)))
            },
            BinaryOperator::Less => Ok(Value::Bool(lhs.as_number(line)? < rhs.as_number(line)?)),
            BinaryOperator::Greater => {
                Ok(Value::Bool(lhs.as_number(line)? > rhs.as_number(line)?))
            },
            BinaryOperator::LessEqual => {
                Ok(Value::Bool(lhs.as_number(line)? <= rhs.as_number(line)?))
            },
            BinaryOperator::GreaterEqual => {
                Ok(Value::Bool(lhs.as_number(line)? >= rhs.as_number(line)?))
            },
            BinaryOperator::Equal => Ok(Value::Bool(lhs == rhs)),
            BinaryOperator::NotEqual => Ok(Value::Bool(lhs != rhs)),
            BinaryOperator::And => Ok(Value::Bool(lhs.as_bool(line)? && rhs.as_bool(line)?)),
            BinaryOperator::Or => Ok(Value::Bool(lhs.as_bool(line)? || rhs.as_bool(line)?)),
        }
    }
}
