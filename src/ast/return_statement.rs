use super::Expression;

/// A `return` statement. A missing expression defaults to the number 0 at
/// evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expression>,
}
