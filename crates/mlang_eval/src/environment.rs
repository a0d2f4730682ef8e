use std::collections::HashMap;
use std::rc::Rc;

use mlang_syntax::ast::{Literal, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Value(Literal),
    Component(Rc<[Node]>),
    /// Only created when functions are callable.
    Function(Rc<[Node]>),
}

/// Name bindings of one interpreter.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Binds `name`, returning the binding it replaced.
    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) -> Option<Binding> {
        self.bindings.insert(name.into(), binding)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
