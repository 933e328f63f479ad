//! Lexically scoped environment chain (spec.md §3.4).
//!
//! Frames must be shared: multiple closures may hold the same outer frame
//! (spec.md §3.4, §9). The teacher's Rust port used an owning `Box` for
//! `enclosing`, which cannot express that sharing; this restores the
//! original C++ implementation's `std::shared_ptr<Environment> outer`
//! (`examples/original_source/.../object.hpp`) using Rust's idiomatic
//! `Rc<RefCell<_>>` equivalent instead of a raw shared pointer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Value;

struct Frame {
    values: HashMap<String, Value>,
    outer: Option<Environment>,
}

/// A cheaply-clonable handle to a scope frame. Cloning an `Environment`
/// shares the same underlying frame (longest-holder-wins lifetime via
/// `Rc`); it does not create a new scope.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// The top-level (global) environment: no parent.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            outer: None,
        })))
    }

    /// A nested environment chained to `outer` (shared, not owned).
    pub fn enclosed(outer: &Environment) -> Self {
        Self(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    /// Bind `name` in the innermost (this) frame, shadowing any outer
    /// binding with the same name (spec.md §4.3 `Let`).
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().values.insert(name.into(), value);
    }

    /// Walk outward to the first frame that binds `name` (spec.md §3.4).
    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        if let Some(value) = frame.values.get(name) {
            return Some(value.clone());
        }
        frame.outer.as_ref()?.get(name)
    }

    /// Identity comparison of the underlying frame, used so two closures
    /// capturing the same environment compare as referring to the same
    /// scope (see `object::Function`'s `PartialEq`).
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment({:p})", Rc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward_to_first_match() {
        let global = Environment::new();
        global.set("x", Value::Integer(1));
        let inner = Environment::enclosed(&global);
        assert_eq!(inner.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let global = Environment::new();
        global.set("x", Value::Integer(1));
        let inner = Environment::enclosed(&global);
        inner.set("x", Value::Integer(2));
        assert_eq!(inner.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn missing_identifier_resolves_to_none() {
        let env = Environment::new();
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn clones_share_the_same_frame() {
        let env = Environment::new();
        let alias = env.clone();
        alias.set("x", Value::Integer(5));
        assert_eq!(env.get("x"), Some(Value::Integer(5)));
        assert!(env.ptr_eq(&alias));
    }
}
