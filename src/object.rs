//! Runtime values (spec.md §3.3).
//!
//! A closed variant set modeled as a Rust enum, replacing the teacher's
//! `Object` trait + `LoxCallable`/downcast hierarchy (spec.md §9 REDESIGN
//! FLAGS). Namespaced as `object::Value` rather than `ast::Expression`'s
//! `BooleanLiteral`, avoiding the `Boolean`/`Boolean` collision the source
//! language had between its AST and value types.

use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Identifier};
use crate::environment::Environment;

/// A closure: parameters and body are non-owning references into the AST
/// (bounded by the program's lifetime); `env` is the environment captured
/// at the function literal's evaluation (spec.md §3.3, §4.3).
#[derive(Debug, Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub env: Environment,
}

impl PartialEq for Function {
    /// Functions compare by identity of their captured environment plus
    /// structural equality of their declaration; two distinct closures are
    /// never equal even with identical source text.
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env.ptr_eq(&other.env)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    /// Internal marker that propagates a `return` out of nested blocks
    /// (spec.md §3.3, §4.3). Never observable outside the evaluator: the
    /// only site that unwraps it is `Program` evaluation and call-site
    /// application.
    ReturnValue(Box<Value>),
    /// Internal short-circuit carrier (spec.md §3.3, §7).
    Error(String),
    Function(Rc<Function>),
}

impl Value {
    /// The runtime-queryable type tag from spec.md §3.3. These exact
    /// strings are load-bearing: they appear verbatim in error messages
    /// (e.g. `"type mismatch: INTEGER + BOOLEAN"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function(_) => "FUNCTION",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Truthiness, centralized (spec.md §4.3): `Null` and `Boolean(false)`
    /// are false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// REPL-facing rendering (spec.md §3.3).
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::Null => "null".to_string(),
            Value::ReturnValue(v) => v.inspect(),
            Value::Error(message) => format!("ERROR : {}", message),
            Value::Function(function) => {
                let params = function
                    .parameters
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({}) {{\n{}\n}}", params, function.body)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_spec() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Integer(0).is_truthy());
    }

    #[test]
    fn inspect_formats_match_spec_table() {
        assert_eq!(Value::Integer(42).inspect(), "42");
        assert_eq!(Value::Boolean(true).inspect(), "true");
        assert_eq!(Value::Null.inspect(), "null");
        assert_eq!(
            Value::Error("identifier not found: x".to_string()).inspect(),
            "ERROR : identifier not found: x"
        );
    }
}
