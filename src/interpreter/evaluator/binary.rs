use log::trace;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Operand},
            utils::{find_matching_paren, is_unary_minus},
        },
        lexer::Token,
    },
};

impl Context {
    /// Evaluates a range by splitting it at its main operator.
    ///
    /// The main operator is the top-level operator with the lowest precedence;
    /// among equals the last one wins, which makes chains of equal precedence
    /// left-associative (`1 - 2 - 3` is `(1 - 2) - 3`). Parenthesized groups
    /// are opaque operands and unary minuses are never candidates.
    ///
    /// # Errors
    /// - `InvalidExpression` if there is no operator to split at.
    /// - `ParenMismatch` for an unclosed or stray parenthesis.
    /// - Any error raised while evaluating the operands.
    pub(crate) fn eval_binary_split(&mut self, tokens: &[Token]) -> EvalResult<Operand> {
        let index = find_main_operator(tokens)?.ok_or(EvalError::InvalidExpression)?;
        trace!("splitting at '{}' ({index} of {})", tokens[index], tokens.len());

        self.eval_binary(&tokens[index], &tokens[..index], &tokens[index + 1..])
    }

    /// Applies a binary operator to two operand ranges.
    ///
    /// Evaluation order is part of the contract:
    /// - `*` evaluates the left side first and returns zero without touching
    ///   the right side when the left side is exactly zero.
    /// - `/` evaluates the right side first and fails before touching the left
    ///   side when the divisor is exactly zero.
    fn eval_binary(&mut self, op: &Token, left: &[Token], right: &[Token]) -> EvalResult<Operand> {
        match op {
            Token::Plus => Ok(self.eval_expr(left)? + self.eval_expr(right)?),
            Token::Minus => Ok(self.eval_expr(left)? - self.eval_expr(right)?),
            Token::Star => {
                let l = self.eval_expr(left)?;
                if l == 0.0 {
                    return Ok(0.0);
                }
                Ok(l * self.eval_expr(right)?)
            },
            Token::Slash => {
                let denominator = self.eval_expr(right)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(self.eval_expr(left)? / denominator)
            },
            Token::Caret => Ok(self.eval_expr(left)?.powf(self.eval_expr(right)?)),
            _ => Err(EvalError::InvalidExpression),
        }
    }
}

/// Locates the operator a range is split at, if any.
fn find_main_operator(tokens: &[Token]) -> EvalResult<Option<usize>> {
    let mut main: Option<(usize, u8)> = None;

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::LParen => i = find_matching_paren(tokens, i)?,
            Token::RParen => return Err(EvalError::ParenMismatch),
            token => {
                if let Some(precedence) = token.precedence()
                   && !is_unary_minus(tokens, i)
                   && main.is_none_or(|(_, lowest)| precedence <= lowest)
                {
                    main = Some((i, precedence));
                }
            },
        }
        i += 1;
    }

    Ok(main.map(|(index, _)| index))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn eval(source: &str) -> EvalResult<Operand> {
        Context::new().eval_expr(&tokenize(source)?)
    }

    #[test]
    fn main_operator_is_last_of_lowest_precedence() {
        let tokens = tokenize("1 + 2 * 3 - 4 ^ 5").unwrap();
        assert_eq!(find_main_operator(&tokens).unwrap(), Some(5));

        let tokens = tokenize("(1 + 2) * 3").unwrap();
        assert_eq!(find_main_operator(&tokens).unwrap(), Some(5));

        let tokens = tokenize("-3").unwrap();
        assert_eq!(find_main_operator(&tokens).unwrap(), None);
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval("2*3^2").unwrap(), 18.0);
        assert_eq!(eval("1+2*3-4/2").unwrap(), 5.0);
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(eval("1-2-3").unwrap(), -4.0);
        assert_eq!(eval("8/4/2").unwrap(), 1.0);
        assert_eq!(eval("2^3^2").unwrap(), 64.0);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1/(2-2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn division_checks_divisor_before_dividend() {
        assert_eq!(eval("nope/0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn zero_left_factor_skips_right_side() {
        assert_eq!(eval("0*(1/0)").unwrap(), 0.0);
        assert_eq!(eval("(1-1)*nope").unwrap(), 0.0);
        assert_eq!(eval("(1/0)*0"), Err(EvalError::DivisionByZero));
    }
}
