/// The evaluator module computes the value of token ranges.
///
/// The evaluator works directly on the token list of a line: it classifies the
/// line, splits ranges at their main operator, dispatches function calls and
/// manages variable and function state. It is the core execution engine of
/// the interpreter.
///
/// # Responsibilities
/// - Evaluates token ranges, including calls to built-in and custom
///   functions.
/// - Handles variable assignment and function definition.
/// - Reports runtime errors such as division by zero or unbounded recursion.
pub mod evaluator;
/// The lexer module tokenizes input lines for evaluation.
///
/// The lexer reads a raw line and produces the flat token list the evaluator
/// walks over: numeric literals, symbols, operators and punctuation.
///
/// # Responsibilities
/// - Converts the input characters into tokens.
/// - Reports lexical errors for unknown characters or oversized literals.
pub mod lexer;
