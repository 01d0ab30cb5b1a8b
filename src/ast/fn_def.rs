use super::Block;

/// A `function <name>(<params>) { ... }` definition. The definition takes
/// effect when this statement executes, not when it is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: String,
    pub params: Vec<String>,
    pub block: Block,
}
