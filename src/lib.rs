//! # calcrs
//!
//! calcrs is an interactive arithmetic expression interpreter written in Rust.
//! It evaluates one line at a time against a session [`Context`] that keeps
//! variables and functions, with support for user-defined functions and the
//! high-order built-ins `SUM`, `MUL` and `IF_ELSE`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

pub use crate::{
    error::EvalError,
    interpreter::evaluator::core::{Context, EvalResult, ExprKind, Operand},
};

/// Provides unified error types for lexing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing or
/// evaluating a line. Every variant carries the offending name, text or arity
/// where one exists, so messages can be shown to the user as they are.
///
/// # Responsibilities
/// - Defines the lexer's internal error enum.
/// - Defines `EvalError`, the single error type of the public API.
pub mod error;
/// Orchestrates the evaluation of input lines.
///
/// This module ties together lexing, evaluation and the function library to
/// provide a complete runtime for the interpreter. It exposes the public API
/// for executing lines against a session.
///
/// # Responsibilities
/// - Coordinates the lexer and the evaluator.
/// - Provides entry points for executing lines and importing built-ins.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Executes every non-blank line of `source` against `context`.
///
/// Lines run in order and execution stops at the first failing line. Lines
/// that succeeded before it keep their effect on the session.
///
/// # Returns
/// The value of the last plain expression, or `None` if the script only
/// assigned variables and defined functions.
///
/// # Errors
/// The error of the first failing line.
///
/// # Examples
/// ```
/// use calcrs::{Context, run_script};
///
/// let mut context = Context::new();
/// context.import_builtins();
///
/// let source = "r = 2\narea(x) = pi * x ^ 2\n\narea(r) / pi";
/// assert_eq!(run_script(&mut context, source).unwrap(), Some(4.0));
///
/// // `y` is not defined
/// assert!(run_script(&mut context, "y + 1").is_err());
/// ```
pub fn run_script(context: &mut Context, source: &str) -> EvalResult<Option<Operand>> {
    let mut result = None;

    for (number, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        debug!("script line {}: {line}", number + 1);
        if let (ExprKind::Expr, value) = context.exec(line)? {
            result = Some(value);
        }
    }

    Ok(result)
}
