/// Binary operator evaluation logic.
///
/// Finds the main operator of a range and applies `+ - * / ^` to the values of
/// both sides.
pub mod binary;

/// Unary minus evaluation logic.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, line classification and the recursive range
/// evaluator.
pub mod core;

/// Custom function definitions.
///
/// Recognizes `name(params) = body` lines and stores them as body templates.
pub mod definition;

/// Utility functions for evaluation.
///
/// Provides parenthesis matching, argument splitting and scoped variable
/// bindings shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles built-in and user-defined function calls, argument checking, and
/// return value computation.
pub mod function;
