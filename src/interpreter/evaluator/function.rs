/// Built-in function table.
///
/// Contains the mathematical and comparison functions, together with the
/// constants, that `import_builtins` makes available.
pub mod builtin;
/// High-order built-ins.
///
/// `SUM`, `MUL` and `IF_ELSE`, which receive their arguments unevaluated.
pub mod high_order;
/// Logarithm function implementations.
///
/// Supports natural, decimal and base-n logarithms.
pub mod logarithm;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum value from a list of arguments.
pub mod min_max;

pub mod core;
