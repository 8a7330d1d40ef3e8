use std::collections::HashMap;

use super::value::Value;

/// Variable bindings for one program run.
///
/// Only assignment writes here; there is a single scope and nothing outlives
/// the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds `name`, returning the value it replaced.
    pub fn assign(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.variables.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_overwrites() {
        let mut env = Environment::new();
        assert_eq!(env.assign("x", Value::Integer(1)), None);
        assert_eq!(env.assign("x", Value::from("two")), Some(Value::Integer(1)));
        assert_eq!(env.lookup("x"), Some(&Value::from("two")));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_lookup_missing() {
        let env = Environment::new();
        assert!(env.lookup("missing").is_none());
        assert!(!env.contains("missing"));
        assert!(env.is_empty());
    }
}
