use thiserror::Error;

use crate::interpreter::evaluator::{core::Operand, function::core::Arity};

/// Represents all errors that can occur while executing an input line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The token range does not form a valid expression.
    #[error("invalid expression")]
    InvalidExpression,
    /// A variable or function name is not bound in the context.
    #[error("undefined symbol '{name}'")]
    UndefinedSymbol {
        /// The unknown name.
        name: String,
    },
    /// An opening or closing parenthesis has no partner.
    #[error("parentheses mismatched")]
    ParenMismatch,
    /// The right-hand side of a division evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The evaluation nested deeper than the recursion limit.
    #[error("stack overflow: evaluation nested deeper than {limit} levels")]
    StackOverflow {
        /// The recursion limit that was exceeded.
        limit: usize,
    },
    /// A function definition names the same parameter twice.
    #[error("repeated parameter name '{name}'")]
    RepeatedParameterName {
        /// The duplicated parameter.
        name: String,
    },
    /// A function was called with an unsupported number of arguments.
    #[error("wrong number of arguments: '{function}' takes {expected}, found {found}")]
    WrongNumberOfArguments {
        /// The called function.
        function: String,
        /// The accepted argument count.
        expected: Arity,
        /// The supplied argument count.
        found:    usize,
    },
    /// A `SUM`/`MUL` step can never reach the end of its range.
    #[error("infinite loop: step {step} never reaches {end} from {begin}")]
    InfiniteLoop {
        /// First value of the loop variable.
        begin: Operand,
        /// Exclusive bound of the loop variable.
        end:   Operand,
        /// Increment applied on every iteration.
        step:  Operand,
    },
    /// A token of one kind was used where another kind is required.
    #[error("unexpected token type: expected {expected}, found '{found}'")]
    UnexpectedTokenKind {
        /// Description of the required kind.
        expected: &'static str,
        /// The token actually found.
        found:    String,
    },
    /// Part of the input could not be classified as any token.
    #[error("parse failed at '{text}'")]
    ParseFailed {
        /// The unclassifiable text.
        text: String,
    },
    /// A numeric literal does not fit into a finite operand.
    #[error("operand overflow: '{literal}'")]
    OperandOverflow {
        /// The literal as written.
        literal: String,
    },
}
