use std::collections::HashMap;

use log::debug;

use crate::ast::Block;

use super::RuntimeError;

/// A function as registered at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
}

/// Flat table of all defined functions, keyed by name. Definitions live from
/// the moment their statement executes until the program ends.
#[derive(Default, Debug)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    /// Register a function. Redefining a name fails.
    pub fn define(
        &mut self,
        name: &str,
        params: &[String],
        body: &Block,
    ) -> Result<(), RuntimeError> {
        if self.functions.contains_key(name) {
            return Err(RuntimeError {
                message: format!("Function {name} already defined"),
            });
        }

        debug!("registering function '{name}' with {} parameters", params.len());

        self.functions.insert(
            name.to_owned(),
            Function {
                name: name.to_owned(),
                params: params.to_vec(),
                body: body.clone(),
            },
        );

        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<Function> {
        self.functions.get(name).cloned()
    }
}
