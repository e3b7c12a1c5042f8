use crate::interpreter::{
    evaluator::{
        core::{EvalResult, Operand},
        function::core::operand,
    },
    lexer::Token,
};

/// Computes the minimum or maximum over all supplied arguments.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`. Every argument must be numeric.
///
/// # Example
/// ```
/// use calcrs::interpreter::{evaluator::function::min_max::min_max, lexer::Token};
///
/// let args = [Token::Number(3.0), Token::Number(7.0), Token::Number(-1.0)];
/// assert_eq!(min_max("min", &args).unwrap(), -1.0);
/// assert_eq!(min_max("max", &args).unwrap(), 7.0);
/// ```
pub fn min_max(name: &str, args: &[Token]) -> EvalResult<Operand> {
    let mut result = operand(args, 0)?;

    for i in 1..args.len() {
        let value = operand(args, i)?;
        result = if name == "min" {
            result.min(value)
        } else {
            result.max(value)
        };
    }

    Ok(result)
}
