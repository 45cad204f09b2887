use indexmap::IndexSet;

/// Represents a literal value in an expression.
///
/// `LiteralValue` covers the raw constant values that can appear directly in
/// sheet text: numbers and booleans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit floating-point literal.
    Number(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An abstract syntax tree (AST) node representing a single expression.
///
/// `Expr` covers all expression forms the sheet grammar supports: literals,
/// variable references, unary and binary operations, function calls, array
/// literals, and array indexing. Each variant carries the source line the
/// node started on.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `sum([a, b])`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Array literal expression.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Array indexing expression (e.g. `arr[2]`).
    ArrayIndex {
        /// The array to index into.
        array: Box<Self>,
        /// The index to access.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use reckon::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::ArrayIndex { line, .. } => *line,
        }
    }

    /// Collects the free variables of the expression, deduplicated and
    /// ordered by first appearance.
    ///
    /// Function-call names are not variables; only their arguments are
    /// walked. This is the extraction the dependency classifier relies on.
    ///
    /// ## Example
    /// ```
    /// use reckon::grammar::parser::core::parse;
    ///
    /// let expr = parse("a + sum([b, a])").unwrap();
    /// let free = expr.free_variables();
    /// let vars: Vec<&str> = free
    ///                           .iter()
    ///                           .map(String::as_str)
    ///                           .collect();
    ///
    /// assert_eq!(vars, ["a", "b"]);
    /// ```
    #[must_use]
    pub fn free_variables(&self) -> IndexSet<String> {
        let mut vars = IndexSet::new();
        self.collect_free_variables(&mut vars);
        vars
    }

    fn collect_free_variables(&self, vars: &mut IndexSet<String>) {
        match self {
            Self::Literal { .. } => {},
            Self::Variable { name, .. } => {
                vars.insert(name.clone());
            },
            Self::UnaryOp { expr, .. } => expr.collect_free_variables(vars),
            Self::BinaryOp { left, right, .. } => {
                left.collect_free_variables(vars);
                right.collect_free_variables(vars);
            },
            Self::FunctionCall { arguments, .. } => {
                for argument in arguments {
                    argument.collect_free_variables(vars);
                }
            },
            Self::ArrayLiteral { elements, .. } => {
                for element in elements {
                    element.collect_free_variables(vars);
                }
            },
            Self::ArrayIndex { array, index, .. } => {
                array.collect_free_variables(vars);
                index.collect_free_variables(vars);
            },
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, and logic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`, or a bare `=` in comparison position)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `not x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}
