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
    /// Evaluates a range that opens with `-`.
    ///
    /// The range is scanned for a top-level `+` or binary `-`. When there is
    /// none, the minus negates the whole remainder, e.g. `-(3 + 5)` or `-2 ^ 2`.
    /// Otherwise `None` is returned and the range is left to the binary split,
    /// which never splits at the first token, so the leading minus stays bound
    /// to its own term: `-3 + 5` becomes `(-3) + 5`.
    ///
    /// # Errors
    /// - `ParenMismatch` for an unclosed or stray parenthesis.
    /// - Any error raised while evaluating the negated remainder.
    pub(crate) fn eval_leading_minus(&mut self, tokens: &[Token]) -> EvalResult<Option<Operand>> {
        let mut i = 1;
        while i < tokens.len() {
            match tokens[i] {
                Token::LParen => i = find_matching_paren(tokens, i)?,
                Token::RParen => return Err(EvalError::ParenMismatch),
                Token::Plus => return Ok(None),
                Token::Minus if !is_unary_minus(tokens, i) => return Ok(None),
                _ => {},
            }
            i += 1;
        }

        Ok(Some(-self.eval_expr(&tokens[1..])?))
    }
}
