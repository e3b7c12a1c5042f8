use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Operand},
            function::core::operand,
        },
        lexer::Token,
    },
};

/// Natural logarithm.
pub fn ln(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
    Ok(operand(args, 0)?.ln())
}

/// Base-10 logarithm.
pub fn lg(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
    Ok(operand(args, 0)?.log10())
}

/// Computes the logarithm of a value with respect to a given base.
///
/// Accepts exactly two arguments, `base` first:
/// `log(base, value) = ln(value) / ln(base)`.
///
/// # Errors
/// `DivisionByZero` when `ln(base)` equals zero, i.e. for base `1`.
///
/// # Example
/// ```
/// use calcrs::interpreter::{
///     evaluator::{core::Context, function::logarithm::log},
///     lexer::Token,
/// };
///
/// let result = log(&[Token::Number(2.0), Token::Number(8.0)], &mut Context::new()).unwrap();
/// assert!((result - 3.0).abs() < 1e-12);
/// ```
pub fn log(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
    let ln_base = operand(args, 0)?.ln();
    let ln_value = operand(args, 1)?.ln();

    if ln_base == 0.0 {
        return Err(EvalError::DivisionByZero);
    }

    Ok(ln_value / ln_base)
}
