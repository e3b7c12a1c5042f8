use std::collections::HashMap;

use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{function::core::Function, utils::find_matching_paren},
        lexer::{Token, tokenize},
    },
};

/// The single numeric type every expression evaluates to.
pub type Operand = f64;

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Deepest evaluation nesting allowed before `StackOverflow` is raised.
pub const MAX_RECURSION_DEPTH: usize = 1024;

/// Name of the variable that holds the last plain-expression result.
pub const ANS: &str = "ANS";

/// Classification of an executed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// A plain expression; its value was stored into `ANS`.
    Expr,
    /// A variable assignment such as `x = 2`.
    VarAssign,
    /// A function definition such as `f(x) = x * x`.
    FuncDef,
}

/// Stores the session state of the interpreter.
///
/// `Context` is created once per session and reused for every input line. It
/// owns the variable and function tables; built-ins and user definitions share
/// the function table, so a later definition replaces an earlier one with the
/// same name.
pub struct Context {
    pub(crate) variables: HashMap<String, Operand>,
    pub(crate) functions: HashMap<String, Function>,
    pub(crate) depth:     usize,
    pub(crate) rng:       StdRng,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a new context whose only variable is `ANS = 0` and whose
    /// function table is empty. The random source is seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a new context with a deterministic random source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { variables: HashMap::from([(ANS.to_string(), 0.0)]),
               functions: HashMap::new(),
               depth: 0,
               rng }
    }

    /// Variables of the session, including `ANS` and imported constants.
    #[must_use]
    pub const fn variables(&self) -> &HashMap<String, Operand> {
        &self.variables
    }

    /// Functions of the session, built-in and user-defined alike.
    #[must_use]
    pub const fn functions(&self) -> &HashMap<String, Function> {
        &self.functions
    }

    /// Executes one input line.
    ///
    /// The line is classified, in order, as a variable assignment
    /// (`name = expr`), a function definition (`name(params) = body`) or a
    /// plain expression whose value is stored into `ANS`. Tables are only
    /// written once evaluation has succeeded, so a failing line leaves the
    /// session unchanged.
    ///
    /// # Returns
    /// The line's kind and its value. The value of a function definition is
    /// always zero.
    ///
    /// # Errors
    /// Any `EvalError` raised while tokenizing, defining or evaluating.
    ///
    /// # Example
    /// ```
    /// use calcrs::interpreter::evaluator::core::{Context, ExprKind};
    ///
    /// let mut context = Context::new();
    /// assert_eq!(context.exec("x = 5").unwrap(), (ExprKind::VarAssign, 5.0));
    /// assert_eq!(context.exec("f(a) = a * x").unwrap(), (ExprKind::FuncDef, 0.0));
    /// assert_eq!(context.exec("f(2) + 1").unwrap(), (ExprKind::Expr, 11.0));
    /// assert_eq!(context.variables()["ANS"], 11.0);
    /// ```
    pub fn exec(&mut self, line: &str) -> EvalResult<(ExprKind, Operand)> {
        self.depth = 0;
        let tokens = tokenize(line)?;

        if tokens.len() > 2
           && let Token::Symbol(name) = &tokens[0]
           && tokens[1] == Token::Equals
        {
            let value = self.eval_expr(&tokens[2..])?;
            debug!("assigning {name} = {value}");
            self.variables.insert(name.clone(), value);
            return Ok((ExprKind::VarAssign, value));
        }

        if self.define_function(&tokens)? {
            return Ok((ExprKind::FuncDef, 0.0));
        }

        let value = self.eval_expr(&tokens)?;
        self.variables.insert(ANS.to_string(), value);
        Ok((ExprKind::Expr, value))
    }

    /// Evaluates a token range and returns its value.
    ///
    /// This is the recursive core of the interpreter. Every nested call counts
    /// towards [`MAX_RECURSION_DEPTH`].
    ///
    /// # Errors
    /// - `InvalidExpression` for an empty or malformed range.
    /// - `StackOverflow` once the nesting limit is exceeded.
    /// - Any error raised by a sub-expression or a function call.
    ///
    /// # Example
    /// ```
    /// use calcrs::interpreter::{evaluator::core::Context, lexer::tokenize};
    ///
    /// let mut context = Context::new();
    /// let tokens = tokenize("(1 + 2) * 3").unwrap();
    /// assert_eq!(context.eval_expr(&tokens).unwrap(), 9.0);
    /// assert_eq!(context.eval_expr(&tokens[1..4]).unwrap(), 3.0);
    /// ```
    pub fn eval_expr(&mut self, tokens: &[Token]) -> EvalResult<Operand> {
        if tokens.is_empty() {
            return Err(EvalError::InvalidExpression);
        }
        if self.depth > MAX_RECURSION_DEPTH {
            return Err(EvalError::StackOverflow { limit: MAX_RECURSION_DEPTH });
        }

        self.depth += 1;
        let result = self.eval_range(tokens);
        self.depth -= 1;
        result
    }

    /// Dispatches a non-empty range to the rule that applies to its shape.
    fn eval_range(&mut self, tokens: &[Token]) -> EvalResult<Operand> {
        if let [single] = tokens {
            return self.eval_single(single);
        }

        match &tokens[0] {
            Token::LParen => {
                let close = find_matching_paren(tokens, 0)?;
                if close == tokens.len() - 1 {
                    return self.eval_expr(&tokens[1..close]);
                }
            },
            Token::Minus => {
                if let Some(value) = self.eval_leading_minus(tokens)? {
                    return Ok(value);
                }
            },
            Token::Symbol(name) if tokens[1] == Token::LParen => {
                let close = find_matching_paren(tokens, 1)?;
                if close == tokens.len() - 1 {
                    return self.call_function(name, &tokens[2..close]);
                }
            },
            _ => {},
        }

        self.eval_binary_split(tokens)
    }

    /// Evaluates a range made of exactly one token.
    fn eval_single(&self, token: &Token) -> EvalResult<Operand> {
        match token {
            Token::Number(value) => Ok(*value),
            Token::Symbol(name) => self.variable(name),
            _ => Err(EvalError::InvalidExpression),
        }
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    /// `UndefinedSymbol` if the variable is not bound.
    pub fn variable(&self, name: &str) -> EvalResult<Operand> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedSymbol { name: name.to_string() })
    }
}
