/// Evaluation errors.
///
/// Defines the fixed error taxonomy raised while tokenizing, classifying or
/// evaluating an input line. Every variant aborts the current `exec` call and
/// leaves the session state untouched.
pub mod eval_error;
/// Lexer errors.
///
/// The error type produced by the `logos` lexer before it is mapped into an
/// [`EvalError`] carrying the offending text.
pub mod lex_error;

pub use eval_error::EvalError;
pub use lex_error::LexError;
