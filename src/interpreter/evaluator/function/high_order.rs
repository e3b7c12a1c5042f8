use log::trace;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Operand},
            function::core::{Arity, HighOrderFn},
            utils::TransientBinding,
        },
        lexer::{Token, render},
    },
};

/// Prefix turning a `SUM`/`MUL` loop variable into its internal name.
///
/// `#` cannot be typed in an input line, so the internal name never aliases a
/// user variable.
pub const LOOP_VARIABLE_PREFIX: &str = "#";

/// Metadata of one high-order built-in.
pub(crate) struct HighOrderDef {
    pub(crate) name:  &'static str,
    pub(crate) arity: Arity,
    pub(crate) func:  HighOrderFn,
}

pub(crate) static HIGH_ORDER_TABLE: &[HighOrderDef] =
    &[HighOrderDef { name:  "SUM",
                     arity: Arity::Between(4, 5),
                     func:  sum, },
      HighOrderDef { name:  "MUL",
                     arity: Arity::Between(4, 5),
                     func:  product, },
      HighOrderDef { name:  "IF_ELSE",
                     arity: Arity::Exact(3),
                     func:  if_else, }];

/// How the values of a loop body are folded together.
#[derive(Clone, Copy)]
enum Accumulator {
    Sum,
    Product,
}

impl Accumulator {
    const fn identity(self) -> Operand {
        match self {
            Self::Sum => 0.0,
            Self::Product => 1.0,
        }
    }

    fn combine(self, acc: Operand, value: Operand) -> Operand {
        match self {
            Self::Sum => acc + value,
            Self::Product => acc * value,
        }
    }
}

/// `SUM(expr, var, begin, end[, step])`: adds up `expr` for `var` running from
/// `begin` towards `end`, `end` excluded.
///
/// # Example
/// ```
/// use calcrs::interpreter::evaluator::core::Context;
///
/// let mut context = Context::new();
/// context.import_builtins();
/// assert_eq!(context.exec("SUM(i ^ 2, i, 1, 4)").unwrap().1, 14.0);
/// ```
pub fn sum(args: &[&[Token]], context: &mut Context) -> EvalResult<Operand> {
    accumulate(args, context, Accumulator::Sum)
}

/// `MUL(expr, var, begin, end[, step])`: multiplies `expr` for `var` running
/// from `begin` towards `end`, `end` excluded.
pub fn product(args: &[&[Token]], context: &mut Context) -> EvalResult<Operand> {
    accumulate(args, context, Accumulator::Product)
}

/// `IF_ELSE(cond, then, else)`: evaluates `cond` and then exactly one branch.
///
/// The branch that is not taken is never evaluated, so it may contain
/// expressions that would fail.
///
/// # Example
/// ```
/// use calcrs::interpreter::evaluator::core::Context;
///
/// let mut context = Context::new();
/// context.import_builtins();
/// assert_eq!(context.exec("IF_ELSE(0, 1 / 0, 2)").unwrap().1, 2.0);
/// ```
pub fn if_else(args: &[&[Token]], context: &mut Context) -> EvalResult<Operand> {
    let condition = context.eval_expr(args[0])?;
    if condition == 0.0 {
        context.eval_expr(args[2])
    } else {
        context.eval_expr(args[1])
    }
}

/// Shared loop of `SUM` and `MUL`.
///
/// The loop variable is renamed inside the body and bound through a
/// [`TransientBinding`], which releases it however the loop ends.
fn accumulate(args: &[&[Token]],
              context: &mut Context,
              accumulator: Accumulator)
              -> EvalResult<Operand> {
    let variable = match args[1] {
        [Token::Symbol(name)] => name.as_str(),
        other => {
            return Err(EvalError::UnexpectedTokenKind { expected: "symbol",
                                                        found:    render(other), });
        },
    };
    let internal = format!("{LOOP_VARIABLE_PREFIX}{variable}");
    let body = args[0].iter()
                      .map(|token| match token {
                          Token::Symbol(name) if name == variable => Token::Symbol(internal.clone()),
                          other => other.clone(),
                      })
                      .collect::<Vec<_>>();

    let begin = context.eval_expr(args[2])?;
    let end = context.eval_expr(args[3])?;
    let step = match args.get(4) {
        Some(step) => context.eval_expr(step)?,
        None if begin > end => -1.0,
        None => 1.0,
    };
    if !begin.is_finite()
       || !end.is_finite()
       || (end - begin) * step < 0.0
       || (begin != end && begin + step == begin)
    {
        return Err(EvalError::InfiniteLoop { begin, end, step });
    }
    trace!("looping {internal} from {begin} to {end} by {step}");

    let mut binding = TransientBinding::new(context, internal, begin);
    let mut result = accumulator.identity();
    let mut x = begin;
    while (begin < end && x < end) || (begin > end && x > end) {
        binding.set(x);
        result = accumulator.combine(result, binding.eval_expr(&body)?);
        let next = x + step;
        if next == x {
            return Err(EvalError::InfiniteLoop { begin, end, step });
        }
        x = next;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn builtins() -> Context {
        let mut context = Context::new();
        context.import_builtins();
        context
    }

    fn eval(context: &mut Context, source: &str) -> EvalResult<Operand> {
        context.exec(source).map(|(_, value)| value)
    }

    fn has_loop_binding(context: &Context) -> bool {
        context.variables()
               .keys()
               .any(|name| name.starts_with(LOOP_VARIABLE_PREFIX))
    }

    #[test]
    fn sum_and_product_over_half_open_ranges() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "SUM(i, i, 1, 5)").unwrap(), 10.0);
        assert_eq!(eval(&mut context, "MUL(i, i, 1, 4)").unwrap(), 6.0);
        assert_eq!(eval(&mut context, "SUM(i, i, 1, 10, 2)").unwrap(), 25.0);
        assert_eq!(eval(&mut context, "SUM(1, k, 0, 0.5, 0.125)").unwrap(), 4.0);
    }

    #[test]
    fn default_step_follows_direction() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "SUM(i, i, 5, 1)").unwrap(), 14.0);
        assert_eq!(eval(&mut context, "MUL(i, i, 4, 1)").unwrap(), 24.0);
        assert_eq!(eval(&mut context, "SUM(i, i, 3, 3)").unwrap(), 0.0);
        assert_eq!(eval(&mut context, "MUL(i, i, 3, 3)").unwrap(), 1.0);
    }

    #[test]
    fn unreachable_end_is_an_infinite_loop() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "SUM(i, i, 1, 10, -1)"),
                   Err(EvalError::InfiniteLoop { begin: 1.0,
                                                 end:   10.0,
                                                 step:  -1.0, }));
        assert!(matches!(eval(&mut context, "MUL(i, i, 1, 10, 0)"),
                         Err(EvalError::InfiniteLoop { .. })));
    }

    #[test]
    fn step_absorbed_by_the_loop_variable_is_an_infinite_loop() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "SUM(1, i, 1e17, 1e17 + 100)"),
                   Err(EvalError::InfiniteLoop { begin: 1e17,
                                                 end:   1e17 + 100.0,
                                                 step:  1.0, }));
        // 2^53 - 2 steps by 1 up to 2^53, where adding 1 no longer moves it.
        assert!(matches!(eval(&mut context, "SUM(1, i, 2 ^ 53 - 2, 2 ^ 53 + 8)"),
                         Err(EvalError::InfiniteLoop { .. })));
        assert!(!has_loop_binding(&context));
    }

    #[test]
    fn loop_variable_does_not_alias_user_variable() {
        let mut context = builtins();
        context.exec("i = 100").unwrap();

        assert_eq!(eval(&mut context, "SUM(i, i, 1, 4)").unwrap(), 6.0);
        assert_eq!(eval(&mut context, "SUM(i * j, j, 1, 3)").unwrap(), 300.0);
        assert_eq!(context.variables()["i"], 100.0);
        assert!(!has_loop_binding(&context));
    }

    #[test]
    fn nested_loops_with_the_same_variable() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "SUM(SUM(i, i, 0, 3), i, 0, 2)").unwrap(), 6.0);
        assert_eq!(eval(&mut context, "SUM(SUM(i * j, j, 1, 3), i, 1, 3)").unwrap(), 9.0);
        assert!(!has_loop_binding(&context));
    }

    #[test]
    fn loop_binding_is_released_on_error() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "SUM(1 / (i - 2), i, 0, 5)"), Err(EvalError::DivisionByZero));
        assert!(!has_loop_binding(&context));
    }

    #[test]
    fn loop_variable_must_be_a_symbol() {
        let mut context = builtins();
        assert!(matches!(eval(&mut context, "SUM(i, 2, 1, 5)"),
                         Err(EvalError::UnexpectedTokenKind { expected: "symbol", .. })));
        assert!(matches!(eval(&mut context, "SUM(i, i, 1)"),
                         Err(EvalError::WrongNumberOfArguments { .. })));
    }

    #[test]
    fn custom_function_inside_loop() {
        let mut context = builtins();
        context.exec("sq(x) = x * x").unwrap();
        assert_eq!(eval(&mut context, "SUM(sq(n), n, 1, 4)").unwrap(), 14.0);
    }

    #[test]
    fn if_else_evaluates_only_the_taken_branch() {
        let mut context = builtins();
        assert_eq!(eval(&mut context, "IF_ELSE(1, 1/0, 2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval(&mut context, "IF_ELSE(0, 1/0, 2)").unwrap(), 2.0);
        assert_eq!(eval(&mut context, "IF_ELSE(gt(3, 2), 10, nope)").unwrap(), 10.0);
    }

    #[test]
    fn recursion_through_if_else() {
        let mut context = builtins();
        context.exec("fact(n) = IF_ELSE(leq(n, 1), 1, n * fact(n - 1))").unwrap();
        assert_eq!(eval(&mut context, "fact(5)").unwrap(), 120.0);
    }
}
