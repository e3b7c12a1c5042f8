use std::collections::HashMap;

use log::debug;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::{CustomFunction, Function},
        },
        lexer::Token,
    },
};

/// Shortest token list that can define a function, as in `f(x) = x`.
const MIN_DEFINITION_LEN: usize = 6;

impl Context {
    /// Registers a custom function if the line has the shape
    /// `name ( [param {, param}] ) = body`.
    ///
    /// Detection is a non-committing probe: any structural mismatch returns
    /// `Ok(false)` so that the caller can evaluate the line as an expression
    /// instead. A successful match replaces any function of the same name,
    /// built-in or custom.
    ///
    /// # Errors
    /// `RepeatedParameterName` if the parameter list names a symbol twice.
    ///
    /// # Example
    /// ```
    /// use calcrs::interpreter::{evaluator::core::Context, lexer::tokenize};
    ///
    /// let mut context = Context::new();
    /// assert!(context.define_function(&tokenize("area(w, h) = w * h").unwrap()).unwrap());
    /// assert!(!context.define_function(&tokenize("area(2, 3)").unwrap()).unwrap());
    /// assert_eq!(context.exec("area(2, 3)").unwrap().1, 6.0);
    /// ```
    pub fn define_function(&mut self, tokens: &[Token]) -> EvalResult<bool> {
        if tokens.len() < MIN_DEFINITION_LEN {
            return Ok(false);
        }
        let (Token::Symbol(name), Token::LParen) = (&tokens[0], &tokens[1]) else {
            return Ok(false);
        };
        let Some(close) = tokens.windows(2)
                                .skip(2)
                                .position(|pair| pair[0] == Token::RParen && pair[1] == Token::Equals)
                                .map(|offset| offset + 2)
        else {
            return Ok(false);
        };
        let body = &tokens[close + 2..];
        if body.is_empty() {
            return Ok(false);
        }
        let Some(parameters) = parse_parameters(&tokens[2..close])? else {
            return Ok(false);
        };

        debug!("defining {name}({})", parameters.join(", "));
        let function = CustomFunction::new(body.to_vec(), &parameters);
        self.functions.insert(name.clone(), Function::Custom(function));
        Ok(true)
    }
}

/// Reads a comma-separated list of parameter names.
///
/// Returns `None` when the list is not made of symbols separated by commas.
fn parse_parameters(tokens: &[Token]) -> EvalResult<Option<Vec<String>>> {
    let mut parameters: Vec<String> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match (i % 2, token) {
            (0, Token::Symbol(name)) => {
                if parameters.contains(name) {
                    return Err(EvalError::RepeatedParameterName { name: name.clone() });
                }
                parameters.push(name.clone());
            },
            (1, Token::Comma) => {},
            _ => return Ok(None),
        }
    }
    if tokens.last() == Some(&Token::Comma) {
        return Ok(None);
    }

    Ok(Some(parameters))
}

impl CustomFunction {
    /// Builds a custom function from its body and parameter names.
    ///
    /// Every body symbol that names a parameter has its position recorded
    /// under that parameter's index, so calls can substitute arguments without
    /// scanning the body again.
    #[must_use]
    pub fn new(body: Vec<Token>, parameters: &[String]) -> Self {
        let index = parameters.iter()
                              .enumerate()
                              .map(|(i, name)| (name.as_str(), i))
                              .collect::<HashMap<_, _>>();

        let mut positions = vec![Vec::new(); parameters.len()];
        for (position, token) in body.iter().enumerate() {
            if let Token::Symbol(name) = token
               && let Some(&i) = index.get(name.as_str())
            {
                positions[i].push(position);
            }
        }

        Self { body,
               parameters: positions }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn define(context: &mut Context, source: &str) -> EvalResult<bool> {
        context.define_function(&tokenize(source)?)
    }

    #[test]
    fn records_parameter_positions() {
        let mut context = Context::new();
        assert!(define(&mut context, "f(x, y) = x * y + x").unwrap());

        let Some(Function::Custom(f)) = context.functions().get("f") else {
            panic!("f is not a custom function");
        };
        assert_eq!(f.arity(), 2);
        assert_eq!(f.parameters, vec![vec![0, 4], vec![2]]);
        assert_eq!(f.body, tokenize("x * y + x").unwrap());
    }

    #[test]
    fn repeated_parameter_is_an_error() {
        let mut context = Context::new();
        assert_eq!(define(&mut context, "f(x, x) = x"),
                   Err(EvalError::RepeatedParameterName { name: "x".into() }));
        assert!(context.functions().is_empty());
    }

    #[test]
    fn non_definitions_fall_through() {
        let mut context = Context::new();
        for source in ["f(x)", "f(x) + 1 = 2", "f(1) = 2", "f(x y) = 2", "f(x,) = 2", "(x) = 1",
                       "f(x) =", "x = f(y) + 1"]
        {
            assert!(!define(&mut context, source).unwrap(), "{source} was taken as a definition");
        }
        assert!(context.functions().is_empty());
    }

    #[test]
    fn zero_parameter_function() {
        let mut context = Context::new();
        assert!(define(&mut context, "k() = 2 * 3").unwrap());
        assert_eq!(context.exec("k() + 1").unwrap().1, 7.0);
    }

    #[test]
    fn redefinition_replaces_previous_function() {
        let mut context = Context::new();
        context.exec("f(x) = x").unwrap();
        context.exec("f(x, y) = x - y").unwrap();

        assert_eq!(context.exec("f(5, 3)").unwrap().1, 2.0);
        assert!(matches!(context.exec("f(5)"), Err(EvalError::WrongNumberOfArguments { .. })));
    }
}
