use std::f64::consts::{E, PI};

use log::debug;
use rand::Rng;

use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult, Operand},
        function::{
            core::{Arity, Function, OrdinaryFn, operand},
            high_order::HIGH_ORDER_TABLE,
            logarithm, min_max,
        },
    },
    lexer::Token,
};

/// Defines the ordinary built-ins by generating a lookup table.
///
/// Each entry provides a name, an arity and a function pointer
/// implementing the built-in.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Metadata of one ordinary built-in.
        pub(crate) struct BuiltinDef {
            pub(crate) name:  &'static str,
            pub(crate) arity: Arity,
            pub(crate) func:  OrdinaryFn,
        }
        pub(crate) static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "eq"    => { arity: Arity::Exact(2), func: eq },
    "neq"   => { arity: Arity::Exact(2), func: neq },
    "leq"   => { arity: Arity::Exact(2), func: leq },
    "lt"    => { arity: Arity::Exact(2), func: lt },
    "geq"   => { arity: Arity::Exact(2), func: geq },
    "gt"    => { arity: Arity::Exact(2), func: gt },
    "ln"    => { arity: Arity::Exact(1), func: logarithm::ln },
    "lg"    => { arity: Arity::Exact(1), func: logarithm::lg },
    "log"   => { arity: Arity::Exact(2), func: logarithm::log },
    "sin"   => { arity: Arity::Exact(1), func: sin },
    "cos"   => { arity: Arity::Exact(1), func: cos },
    "tan"   => { arity: Arity::Exact(1), func: tan },
    "asin"  => { arity: Arity::Exact(1), func: asin },
    "acos"  => { arity: Arity::Exact(1), func: acos },
    "atan"  => { arity: Arity::Exact(1), func: atan },
    "exp"   => { arity: Arity::Exact(1), func: exp },
    "gamma" => { arity: Arity::Exact(1), func: gamma },
    "floor" => { arity: Arity::Exact(1), func: floor },
    "ceil"  => { arity: Arity::Exact(1), func: ceil },
    "erf"   => { arity: Arity::Exact(1), func: erf },
    "abs"   => { arity: Arity::Exact(1), func: abs },
    "rand"  => { arity: Arity::Exact(2), func: random },
    "max"   => { arity: Arity::AtLeast(1), func: |args, _| min_max::min_max("max", args) },
    "min"   => { arity: Arity::AtLeast(1), func: |args, _| min_max::min_max("min", args) },
}

impl Context {
    /// Installs the built-in library.
    ///
    /// Binds the constants `pi` and `e` and registers every ordinary and
    /// high-order built-in, replacing functions of the same name. Unrelated
    /// variables and user functions are preserved, so importing twice is
    /// harmless.
    ///
    /// # Example
    /// ```
    /// use calcrs::interpreter::evaluator::core::Context;
    ///
    /// let mut context = Context::new();
    /// context.import_builtins();
    /// assert_eq!(context.exec("max(1, 7, 3) + floor(pi)").unwrap().1, 10.0);
    /// ```
    pub fn import_builtins(&mut self) {
        self.variables.insert("pi".to_string(), PI);
        self.variables.insert("e".to_string(), E);

        for builtin in BUILTIN_TABLE {
            self.functions.insert(builtin.name.to_string(),
                                  Function::Ordinary { native: builtin.func,
                                                       arity:  builtin.arity, });
        }
        for builtin in HIGH_ORDER_TABLE {
            self.functions.insert(builtin.name.to_string(),
                                  Function::HighOrder { native: builtin.func,
                                                        arity:  builtin.arity, });
        }

        debug!("imported {} built-in functions",
               BUILTIN_TABLE.len() + HIGH_ORDER_TABLE.len());
    }
}

/// Applies a one-argument `f64` method to the argument of a built-in.
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
            Ok(operand(args, 0)?.$real_fn())
        }
    };
}

real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);
real_builtin!(asin, asin);
real_builtin!(acos, acos);
real_builtin!(atan, atan);
real_builtin!(exp, exp);
real_builtin!(floor, floor);
real_builtin!(ceil, ceil);
real_builtin!(abs, abs);

/// Compares the two arguments of a built-in, yielding `1` or `0`.
macro_rules! comparison_builtin {
    ($fname:ident, $op:tt) => {
        #[allow(clippy::float_cmp)]
        pub fn $fname(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
            let holds = operand(args, 0)? $op operand(args, 1)?;
            Ok(if holds { 1.0 } else { 0.0 })
        }
    };
}

comparison_builtin!(eq, ==);
comparison_builtin!(neq, !=);
comparison_builtin!(leq, <=);
comparison_builtin!(lt, <);
comparison_builtin!(geq, >=);
comparison_builtin!(gt, >);

/// The error function.
pub fn erf(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
    Ok(statrs::function::erf::erf(operand(args, 0)?))
}

/// The gamma function Γ(x).
///
/// # Example
/// ```
/// use calcrs::interpreter::{
///     evaluator::{core::Context, function::builtin::gamma},
///     lexer::Token,
/// };
///
/// // Γ(5) = 4! = 24
/// let g = gamma(&[Token::Number(5.0)], &mut Context::new()).unwrap();
/// assert!((g - 24.0).abs() < 1e-9);
/// ```
pub fn gamma(args: &[Token], _: &mut Context) -> EvalResult<Operand> {
    Ok(statrs::function::gamma::gamma(operand(args, 0)?))
}

/// A uniformly distributed value in `[a, b)`, drawn from the context's random
/// source.
pub fn random(args: &[Token], context: &mut Context) -> EvalResult<Operand> {
    let a = operand(args, 0)?;
    let b = operand(args, 1)?;
    Ok(a + context.rng.r#gen::<f64>() * (b - a))
}
