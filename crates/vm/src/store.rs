//! Flat, name-keyed variable store.

use std::collections::HashMap;

use microvm_common::{TypeTag, Value};

use crate::error::ErrorKind;

/// A named binding and the tag of the value it last received.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub type_tag: TypeTag,
    pub value: Value,
}

/// Single global namespace for one program run.
#[derive(Debug, Default)]
pub struct VariableStore {
    vars: HashMap<String, Variable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: &str, value: Value) {
        let var = Variable {
            name: name.to_string(),
            type_tag: value.type_tag(),
            value,
        };
        self.vars.insert(name.to_string(), var);
    }

    /// Current value of `name`. Lists come back as shared handles.
    pub fn get(&self, name: &str) -> Result<Value, ErrorKind> {
        self.vars
            .get(name)
            .map(|var| var.value.clone())
            .ok_or_else(|| ErrorKind::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// The full record for `name`, if bound.
    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }
}
