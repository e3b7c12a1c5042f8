use std::fmt;

use log::trace;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Operand},
            utils::split_arguments,
        },
        lexer::Token,
    },
};

/// Native computation of an ordinary built-in.
///
/// Receives the bound arguments: numeric literals, or symbols for functions
/// passed by name.
pub type OrdinaryFn = fn(&[Token], &mut Context) -> EvalResult<Operand>;

/// Native computation of a high-order built-in.
///
/// Receives the unevaluated argument sub-ranges and decides itself what to
/// evaluate, and when.
pub type HighOrderFn = fn(&[&[Token]], &mut Context) -> EvalResult<Operand>;

/// Specifies the allowed number of arguments for a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// `n` or more arguments.
    AtLeast(usize),
    /// Between `lo` and `hi` arguments, inclusive.
    Between(usize, usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub const fn check(&self, n: usize) -> bool {
        match *self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
            Self::Between(lo, hi) => lo <= n && n <= hi,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "{n} or more"),
            Self::Between(lo, hi) => write!(f, "{lo} to {hi}"),
        }
    }
}

/// The three kinds of callables sharing the function table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Built-in over evaluated arguments.
    Ordinary,
    /// Built-in over unevaluated arguments.
    HighOrder,
    /// Defined by the user.
    Custom,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
             Self::Ordinary => "built-in",
             Self::HighOrder => "high-order",
             Self::Custom => "custom",
         })
    }
}

/// A user-defined function.
///
/// The body is kept as a token template. `parameters[i]` lists the body
/// positions where parameter `i` occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFunction {
    pub(crate) body:       Vec<Token>,
    pub(crate) parameters: Vec<Vec<usize>>,
}

impl CustomFunction {
    /// Number of declared parameters.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// The stored body template.
    #[must_use]
    pub fn body(&self) -> &[Token] {
        &self.body
    }

    /// Consumes a working copy of the function and returns its body with
    /// every parameter replaced by its argument.
    fn instantiate(mut self, arguments: Vec<Token>) -> Vec<Token> {
        for (positions, argument) in self.parameters.iter().zip(arguments) {
            for &position in positions {
                self.body[position] = argument.clone();
            }
        }
        self.body
    }
}

/// An entry of the function table.
#[derive(Debug, Clone)]
pub enum Function {
    /// A built-in over evaluated arguments.
    Ordinary {
        /// The computation.
        native: OrdinaryFn,
        /// Accepted argument counts.
        arity:  Arity,
    },
    /// A built-in controlling the evaluation of its own arguments.
    HighOrder {
        /// The computation.
        native: HighOrderFn,
        /// Accepted argument counts.
        arity:  Arity,
    },
    /// A user-defined function.
    Custom(CustomFunction),
}

impl Function {
    /// Which kind of callable this is.
    #[must_use]
    pub const fn kind(&self) -> FunctionKind {
        match self {
            Self::Ordinary { .. } => FunctionKind::Ordinary,
            Self::HighOrder { .. } => FunctionKind::HighOrder,
            Self::Custom(_) => FunctionKind::Custom,
        }
    }

    /// Accepted argument counts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self {
            Self::Ordinary { arity, .. } | Self::HighOrder { arity, .. } => *arity,
            Self::Custom(custom) => Arity::Exact(custom.arity()),
        }
    }
}

impl Context {
    /// Calls the function `name` with the argument range between its
    /// parentheses.
    ///
    /// High-order built-ins receive the raw argument sub-ranges. For every
    /// other function each argument is bound first: a lone variable name
    /// yields its value, a lone function name is passed through as a symbol,
    /// and anything else is evaluated. Ordinary built-ins are then invoked
    /// directly, while custom functions evaluate a copy of their body with the
    /// arguments substituted.
    ///
    /// # Errors
    /// - `UndefinedSymbol` if `name` or a lone argument symbol is unknown.
    /// - `WrongNumberOfArguments` if the argument count does not fit.
    /// - Any error raised by argument evaluation or by the function itself.
    ///
    /// # Example
    /// ```
    /// use calcrs::interpreter::{evaluator::core::Context, lexer::tokenize};
    ///
    /// let mut context = Context::new();
    /// context.exec("sq(x) = x * x").unwrap();
    ///
    /// let args = tokenize("1 + 2").unwrap();
    /// assert_eq!(context.call_function("sq", &args).unwrap(), 9.0);
    /// ```
    pub fn call_function(&mut self, name: &str, arguments: &[Token]) -> EvalResult<Operand> {
        let function =
            self.functions
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedSymbol { name: name.to_string() })?;

        let ranges = split_arguments(arguments)?;
        let arity = function.arity();
        if !arity.check(ranges.len()) {
            return Err(EvalError::WrongNumberOfArguments { function: name.to_string(),
                                                           expected: arity,
                                                           found:    ranges.len(), });
        }
        trace!("calling {} {name} with {} argument(s)", function.kind(), ranges.len());

        match function {
            Function::HighOrder { native, .. } => native(&ranges, self),
            Function::Ordinary { native, .. } => {
                let bound = self.bind_arguments(&ranges)?;
                native(&bound, self)
            },
            Function::Custom(custom) => {
                let bound = self.bind_arguments(&ranges)?;
                let body = custom.instantiate(bound);
                self.eval_expr(&body)
            },
        }
    }

    /// Turns argument sub-ranges into argument tokens.
    fn bind_arguments(&mut self, ranges: &[&[Token]]) -> EvalResult<Vec<Token>> {
        ranges.iter()
              .map(|&range| match range {
                  [Token::Symbol(name)] => {
                      if let Some(&value) = self.variables.get(name) {
                          Ok(Token::Number(value))
                      } else if self.functions.contains_key(name) {
                          Ok(Token::Symbol(name.clone()))
                      } else {
                          Err(EvalError::UndefinedSymbol { name: name.clone() })
                      }
                  },
                  _ => self.eval_expr(range).map(Token::Number),
              })
              .collect()
    }
}

/// Reads argument `index` of an ordinary built-in as a number.
///
/// # Errors
/// `UnexpectedTokenKind` if the argument is a function name.
pub fn operand(arguments: &[Token], index: usize) -> EvalResult<Operand> {
    arguments.get(index)
             .ok_or(EvalError::InvalidExpression)?
             .as_operand()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn apply_twice(arguments: &[Token], context: &mut Context) -> EvalResult<Operand> {
        let name = arguments[0].as_symbol()?.to_string();
        let once = context.call_function(&name, &[arguments[1].clone()])?;
        context.call_function(&name, &[Token::Number(once)])
    }

    #[test]
    fn arity_checks() {
        assert!(Arity::Exact(2).check(2));
        assert!(!Arity::Exact(2).check(3));
        assert!(Arity::AtLeast(1).check(7));
        assert!(!Arity::AtLeast(1).check(0));
        assert!(Arity::Between(4, 5).check(5));
        assert!(!Arity::Between(4, 5).check(3));
        assert_eq!(Arity::Between(4, 5).to_string(), "4 to 5");
    }

    #[test]
    fn custom_call_substitutes_arguments() {
        let mut context = Context::new();
        context.exec("f(a, b) = a - b").unwrap();
        context.exec("x = 10").unwrap();

        assert_eq!(context.exec("f(x, 2 * 3)").unwrap().1, 4.0);
        assert_eq!(context.exec("f(f(5, 1), (1))").unwrap().1, 3.0);
    }

    #[test]
    fn wrong_argument_count() {
        let mut context = Context::new();
        context.exec("f(x) = x").unwrap();

        assert_eq!(context.exec("f(1, 2)"),
                   Err(EvalError::WrongNumberOfArguments { function: "f".into(),
                                                           expected: Arity::Exact(1),
                                                           found:    2, }));
        assert!(matches!(context.exec("f()"), Err(EvalError::WrongNumberOfArguments { .. })));
    }

    #[test]
    fn unknown_symbol_argument() {
        let mut context = Context::new();
        context.exec("f(x) = x").unwrap();

        assert_eq!(context.exec("f(y)"), Err(EvalError::UndefinedSymbol { name: "y".into() }));
    }

    #[test]
    fn function_names_are_passed_by_reference() {
        let mut context = Context::new();
        context.functions.insert("twice".into(),
                                 Function::Ordinary { native: apply_twice,
                                                      arity:  Arity::Exact(2), });
        context.exec("inc(x) = x + 1").unwrap();
        context.exec("g(h, v) = h(h(v))").unwrap();

        assert_eq!(context.exec("twice(inc, 5)").unwrap().1, 7.0);
        assert_eq!(context.exec("g(inc, 1)").unwrap().1, 3.0);
    }

    #[test]
    fn empty_argument_is_invalid() {
        let mut context = Context::new();
        context.exec("f(x, y) = x").unwrap();

        assert_eq!(context.exec("f(1,)"), Err(EvalError::InvalidExpression));
    }

    #[test]
    fn kind_and_arity_of_custom_function() {
        let mut context = Context::new();
        context.exec("f(a, b, c) = a").unwrap();

        let f = &context.functions()["f"];
        assert_eq!(f.kind(), FunctionKind::Custom);
        assert_eq!(f.arity(), Arity::Exact(3));
    }
}
