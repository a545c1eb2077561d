//! The operand stack.

use microvm_common::Value;

use crate::error::ErrorKind;

/// LIFO container of values. Only the top is observable.
#[derive(Debug, Default)]
pub struct OperandStack {
    values: Vec<Value>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self {
            values: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Remove and return the top value.
    pub fn pop(&mut self) -> Result<Value, ErrorKind> {
        self.values.pop().ok_or(ErrorKind::StackUnderflow)
    }

    /// The top value, left in place.
    pub fn peek(&self) -> Result<&Value, ErrorKind> {
        self.values.last().ok_or(ErrorKind::StackUnderflow)
    }

    /// Pop `n` values one at a time and return them in push order.
    ///
    /// On underflow the values already popped stay consumed.
    pub fn pop_n(&mut self, n: usize) -> Result<Vec<Value>, ErrorKind> {
        let mut items = Vec::with_capacity(n.min(self.values.len()));
        for _ in 0..n {
            items.push(self.pop()?);
        }
        items.reverse();
        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
