use super::Statement;

/// An ordered sequence of statements, as found in `if`/`while`/function
/// bodies and at the top level.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}
