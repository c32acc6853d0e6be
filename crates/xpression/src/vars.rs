use crate::error::XpressionError;
use crate::eval_ctx::Resolver;
use crate::lexer;
use crate::path::{parse_path, walk};
use crate::token::TokenKind;
use crate::types::Operand;
use serde_json::Value;
use std::collections::HashMap;

/// Variable store: a JSON environment document plus named bindings.
///
/// Paths starting with `$` or `@` are walked against the environment. Any
/// other variable name is looked up among the bindings.
#[derive(Debug, Clone, Default)]
pub struct Vars {
    env: Value,
    vars: HashMap<String, Operand>,
}

impl Vars {
    pub fn new(env: Value) -> Self {
        Vars {
            env,
            vars: HashMap::new(),
        }
    }

    pub fn env(&self) -> &Value {
        &self.env
    }

    pub fn set_env(&mut self, env: Value) {
        self.env = env;
    }

    pub fn get(&self, name: &str) -> Option<&Operand> {
        self.vars.get(name)
    }

    /// Binds `name`. The name must lex as a single plain variable token: a
    /// letter first, no keyword, no separator, operator or bracket.
    pub fn set(&mut self, name: &str, value: impl Into<Operand>) -> Result<(), XpressionError> {
        if !is_binding_name(name) {
            return Err(XpressionError::Resolver(format!(
                "invalid variable name: {:?}",
                name
            )));
        }
        self.vars.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Removes a binding. Returns whether it existed.
    pub fn del(&mut self, name: &str) -> bool {
        self.vars.remove(name).is_some()
    }
}

fn is_binding_name(name: &str) -> bool {
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) || name.contains('[') {
        return false;
    }
    match lexer::tokenize(name).as_deref() {
        Ok([token]) => token.kind == TokenKind::Variable(name.to_string()),
        _ => false,
    }
}

impl Resolver for Vars {
    fn resolve(&self, path: &str) -> Result<Operand, XpressionError> {
        if path.starts_with('$') || path.starts_with('@') {
            let segments = parse_path(path).map_err(|e| XpressionError::Resolver(e.to_string()))?;
            return Ok(walk(&self.env, &segments));
        }
        self.vars
            .get(path)
            .cloned()
            .ok_or_else(|| XpressionError::VariableNotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bindings() {
        let mut vars = Vars::default();
        vars.set("x", 3.0).unwrap();
        assert!(vars.has("x"));
        assert_eq!(vars.get("x"), Some(&Operand::Number(3.0)));
        assert_eq!(vars.resolve("x"), Ok(Operand::Number(3.0)));
        assert!(vars.del("x"));
        assert!(!vars.del("x"));
        assert_eq!(
            vars.resolve("x"),
            Err(XpressionError::VariableNotFound("x".into()))
        );
    }

    #[test]
    fn test_invalid_names() {
        let mut vars = Vars::default();
        assert!(vars.set("", 1.0).is_err());
        assert!(vars.set("$x", 1.0).is_err());
        assert!(vars.set("@", 1.0).is_err());
        for name in ["true", "null", "a b", "a,b", "a+b", "a-b", "a(b", "a[0]", "a!", "x/y"] {
            assert!(vars.set(name, 1.0).is_err(), "name: {}", name);
            assert!(!vars.has(name), "name: {}", name);
        }
        assert!(vars.set("nullable", 1.0).is_ok());
        assert!(vars.set("item_2.count", 1.0).is_ok());
        assert_eq!(vars.resolve("item_2.count"), Ok(Operand::Number(1.0)));
    }

    #[test]
    fn test_replace_env() {
        let mut vars = Vars::new(json!({"n": 1}));
        vars.set("n", 7_i64).unwrap();
        assert_eq!(vars.env(), &json!({"n": 1}));
        assert_eq!(vars.resolve("$.n"), Ok(Operand::Number(1.0)));

        vars.set_env(json!({"n": "two"}));
        assert_eq!(vars.env(), &json!({"n": "two"}));
        assert_eq!(vars.resolve("$.n"), Ok(Operand::from("two")));
        // Bindings are kept across environment changes.
        assert_eq!(vars.resolve("n"), Ok(Operand::Number(7.0)));
    }

    #[test]
    fn test_env_paths() {
        let vars = Vars::new(json!({"a": {"b": [1, "two"]}}));
        assert_eq!(vars.resolve("$.a.b[1]"), Ok(Operand::from("two")));
        assert_eq!(vars.resolve("@.a.c"), Ok(Operand::Undefined));
        assert!(matches!(
            vars.resolve("$.a["),
            Err(XpressionError::Resolver(_))
        ));
    }
}
