use std::fmt;

use logos::Logos;

use crate::{
    error::{EvalError, LexError},
    interpreter::evaluator::core::{EvalResult, Operand},
};

/// Represents a lexical token of an input line.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Only `Number` and `Symbol` carry a payload; every other kind is fully
/// described by its variant.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_operand)]
    Number(Operand),
    /// Symbol tokens; variable, function or parameter names such as `x` or
    /// `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Symbol(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Equals,
    /// Whitespace between tokens.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// An ordered, randomly indexable sequence of tokens.
///
/// Evaluation borrows half-open ranges of it as `&tokens[begin..end]`.
pub type TokenList = Vec<Token>;

impl Token {
    /// Returns `true` for a numeric literal.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` for a symbol.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns `true` for one of the binary operators `+ - * / ^`.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Star | Self::Slash | Self::Caret)
    }

    /// Binding strength of an operator token, `None` for anything else.
    ///
    /// `+`/`-` bind weakest, `^` strongest.
    #[must_use]
    pub const fn precedence(&self) -> Option<u8> {
        match self {
            Self::Plus | Self::Minus => Some(1),
            Self::Star | Self::Slash => Some(2),
            Self::Caret => Some(3),
            _ => None,
        }
    }

    /// Returns the numeric payload of a literal.
    ///
    /// # Errors
    /// `UnexpectedTokenKind` if the token is not a numeric literal.
    pub fn as_operand(&self) -> EvalResult<Operand> {
        match self {
            Self::Number(value) => Ok(*value),
            other => Err(EvalError::UnexpectedTokenKind { expected: "operand",
                                                          found:    other.to_string(), }),
        }
    }

    /// Returns the name carried by a symbol.
    ///
    /// # Errors
    /// `UnexpectedTokenKind` if the token is not a symbol.
    pub fn as_symbol(&self) -> EvalResult<&str> {
        match self {
            Self::Symbol(name) => Ok(name),
            other => Err(EvalError::UnexpectedTokenKind { expected: "symbol",
                                                          found:    other.to_string(), }),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Symbol(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Caret => f.write_str("^"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
            Self::Equals => f.write_str("="),
            Self::Ignored => Ok(()),
        }
    }
}

/// Converts a line of text into its token list.
///
/// Whitespace separates tokens but is otherwise ignored.
///
/// # Errors
/// - `ParseFailed` if some text matches no token rule.
/// - `OperandOverflow` if a numeric literal is not representable as a finite
///   operand.
///
/// # Example
/// ```
/// use calcrs::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 * x").unwrap();
/// assert_eq!(tokens,
///            vec![Token::Number(2.0), Token::Star, Token::Symbol("x".into())]);
/// ```
pub fn tokenize(text: &str) -> EvalResult<TokenList> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok),
            Err(LexError::Overflow) => {
                return Err(EvalError::OperandOverflow { literal: lexer.slice().to_string() });
            },
            Err(LexError::Unrecognized) => {
                return Err(EvalError::ParseFailed { text: lexer.slice().to_string() });
            },
        }
    }

    Ok(tokens)
}

/// Renders a token range back to text, one space between tokens.
///
/// # Example
/// ```
/// use calcrs::interpreter::lexer::{render, tokenize};
///
/// assert_eq!(render(&tokenize("f(x)=x*2").unwrap()), "f ( x ) = x * 2");
/// ```
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    tokens.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}

/// Parses a numeric literal from the current token slice.
///
/// Literals that parse to an infinite value overflowed the operand type.
fn parse_operand(lex: &logos::Lexer<Token>) -> Result<Operand, LexError> {
    match lex.slice().parse::<Operand>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LexError::Overflow),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sym(name: &str) -> Token {
        Token::Symbol(name.to_string())
    }

    #[test]
    fn lexes_operators_and_punctuation() {
        assert_eq!(tokenize("+-*/^(),=").unwrap(),
                   vec![Token::Plus,
                        Token::Minus,
                        Token::Star,
                        Token::Slash,
                        Token::Caret,
                        Token::LParen,
                        Token::RParen,
                        Token::Comma,
                        Token::Equals]);
    }

    #[test]
    fn lexes_decimal_and_exponent_literals() {
        assert_eq!(tokenize("12 3.5 1e3 2.5E-2 7e+1").unwrap(),
                   vec![Token::Number(12.0),
                        Token::Number(3.5),
                        Token::Number(1000.0),
                        Token::Number(0.025),
                        Token::Number(70.0)]);
    }

    #[test]
    fn lexes_definition_line() {
        assert_eq!(tokenize("f(x, y_2) = x*y_2").unwrap(),
                   vec![sym("f"),
                        Token::LParen,
                        sym("x"),
                        Token::Comma,
                        sym("y_2"),
                        Token::RParen,
                        Token::Equals,
                        sym("x"),
                        Token::Star,
                        sym("y_2")]);
    }

    #[test]
    fn whitespace_only_gives_no_tokens() {
        assert!(tokenize(" \t \r\n").unwrap().is_empty());
    }

    #[test]
    fn unknown_character_fails_to_parse() {
        assert!(matches!(tokenize("1 + $"), Err(EvalError::ParseFailed { text }) if text == "$"));
        assert!(matches!(tokenize("#i"), Err(EvalError::ParseFailed { .. })));
    }

    #[test]
    fn huge_literal_overflows() {
        assert!(matches!(tokenize("1e999"), Err(EvalError::OperandOverflow { literal }) if literal == "1e999"));
    }

    #[test]
    fn payload_accessors_check_the_kind() {
        assert_eq!(Token::Number(2.0).as_operand().unwrap(), 2.0);
        assert_eq!(sym("x").as_symbol().unwrap(), "x");
        assert!(matches!(sym("x").as_operand(),
                         Err(EvalError::UnexpectedTokenKind { expected: "operand", .. })));
        assert!(matches!(Token::Plus.as_symbol(),
                         Err(EvalError::UnexpectedTokenKind { expected: "symbol", .. })));
    }
}
