/// Failure reported by a single lexer step.
///
/// `logos` requires its error type to have a default, which is used for input
/// that matches no token rule at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    /// The text matches no token rule.
    #[default]
    Unrecognized,
    /// A numeric literal is too large to be represented as a finite operand.
    Overflow,
}
