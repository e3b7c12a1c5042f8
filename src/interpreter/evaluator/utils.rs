use std::ops::{Deref, DerefMut};

use log::trace;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Operand},
        lexer::Token,
    },
};

/// Finds the `)` matching the `(` at `open`.
///
/// Scans forward counting nesting depth, so inner groups are skipped.
///
/// # Errors
/// `ParenMismatch` if the group is never closed within `tokens`.
///
/// # Example
/// ```
/// use calcrs::interpreter::{evaluator::utils::find_matching_paren, lexer::tokenize};
///
/// let tokens = tokenize("(1 + (2)) * 3").unwrap();
/// assert_eq!(find_matching_paren(&tokens, 0).unwrap(), 6);
/// assert_eq!(find_matching_paren(&tokens, 3).unwrap(), 5);
/// ```
pub fn find_matching_paren(tokens: &[Token], open: usize) -> EvalResult<usize> {
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth.checked_sub(1).ok_or(EvalError::ParenMismatch)?;
                if depth == 0 {
                    return Ok(i);
                }
            },
            _ => {},
        }
    }

    Err(EvalError::ParenMismatch)
}

/// Splits an argument range at its top-level commas.
///
/// Commas nested inside parentheses belong to inner calls and do not split.
/// An empty range has no arguments; otherwise `n` top-level commas produce
/// `n + 1` (possibly empty) sub-ranges.
///
/// # Errors
/// `ParenMismatch` if a group inside the range is not closed.
///
/// # Example
/// ```
/// use calcrs::interpreter::{evaluator::utils::split_arguments, lexer::tokenize};
///
/// let tokens = tokenize("1, max(2, 3), 4").unwrap();
/// let args = split_arguments(&tokens).unwrap();
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[1].len(), 6);
/// ```
pub fn split_arguments(tokens: &[Token]) -> EvalResult<Vec<&[Token]>> {
    let mut arguments = Vec::new();
    if tokens.is_empty() {
        return Ok(arguments);
    }

    let mut start = 0;
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::LParen => i = find_matching_paren(tokens, i)?,
            Token::RParen => return Err(EvalError::ParenMismatch),
            Token::Comma => {
                arguments.push(&tokens[start..i]);
                start = i + 1;
            },
            _ => {},
        }
        i += 1;
    }
    arguments.push(&tokens[start..]);

    Ok(arguments)
}

/// Tells whether the `-` at `index` negates its operand rather than
/// subtracting.
///
/// A minus is unary when it opens the range, or when the token before it is
/// neither an operand, a symbol nor a closing parenthesis.
#[must_use]
pub fn is_unary_minus(tokens: &[Token], index: usize) -> bool {
    tokens[index] == Token::Minus
    && (index == 0
        || !matches!(tokens[index - 1], Token::Number(_) | Token::Symbol(_) | Token::RParen))
}

/// A variable binding that lives only as long as the guard.
///
/// The guard dereferences to the [`Context`] it was created on. When dropped,
/// on success and error paths alike, the binding is removed again, or the
/// value it shadowed is restored.
pub struct TransientBinding<'a> {
    context:  &'a mut Context,
    name:     String,
    shadowed: Option<Operand>,
}

impl<'a> TransientBinding<'a> {
    /// Binds `name` to `value` in `context` until the guard is dropped.
    pub fn new(context: &'a mut Context, name: String, value: Operand) -> Self {
        trace!("binding transient variable {name}");
        let shadowed = context.variables.insert(name.clone(), value);
        Self { context,
               name,
               shadowed }
    }

    /// Updates the value of the guarded binding.
    pub fn set(&mut self, value: Operand) {
        self.context.variables.insert(self.name.clone(), value);
    }
}

impl Deref for TransientBinding<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.context
    }
}

impl DerefMut for TransientBinding<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.context
    }
}

impl Drop for TransientBinding<'_> {
    fn drop(&mut self) {
        trace!("releasing transient variable {}", self.name);
        match self.shadowed.take() {
            Some(value) => self.context.variables.insert(self.name.clone(), value),
            None => self.context.variables.remove(&self.name),
        };
    }
}
