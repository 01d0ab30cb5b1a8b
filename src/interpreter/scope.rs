use std::collections::HashMap;

use super::Value;

/// The dynamic environment of the evaluator: a stack of frames with the
/// global frame at the bottom. Function calls push a fresh frame whose parent
/// is the global frame, so intermediate caller frames stay invisible.
#[derive(Debug)]
pub struct Scope {
    scope_stack: Vec<HashMap<String, Value>>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            scope_stack: vec![HashMap::new()],
        }
    }

    /// Find a value by name in the innermost frame, falling back to the
    /// global frame.
    pub fn find(&self, name: &str) -> Option<Value> {
        if let Some(frame) = self.scope_stack.last() {
            if let Some(value) = frame.get(name) {
                return Some(value.clone());
            }
        }

        self.scope_stack
            .first()
            .and_then(|frame| frame.get(name).cloned())
    }

    /// Bind a name in the innermost frame, overwriting a binding already
    /// present there. Enclosing frames are never written through, which gives
    /// functions private locals without declarations.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.scope_stack.last_mut() {
            frame.insert(name.to_owned(), value);
        }
    }

    /// Push a fresh frame for a function call.
    pub fn push(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Pop the innermost frame and drop its bindings. The global frame is
    /// never popped.
    pub fn pop(&mut self) {
        if self.scope_stack.len() > 1 {
            self.scope_stack.pop();
        }
    }
}
