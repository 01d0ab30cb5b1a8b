use std::fmt::Display;

/// Operator of a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryVerb {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    And,
}

impl BinaryVerb {
    /// Whether this verb belongs to the arithmetic layer of the grammar, as
    /// opposed to the comparison/`and` layer that only appears in conditions.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryVerb::Plus
                | BinaryVerb::Minus
                | BinaryVerb::Times
                | BinaryVerb::Divide
                | BinaryVerb::Modulo
        )
    }
}

impl Display for BinaryVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryVerb::Plus => "+",
            BinaryVerb::Minus => "-",
            BinaryVerb::Times => "*",
            BinaryVerb::Divide => "/",
            BinaryVerb::Modulo => "%",
            BinaryVerb::Equal => "==",
            BinaryVerb::NotEqual => "!=",
            BinaryVerb::GreaterThan => ">",
            BinaryVerb::LessThan => "<",
            BinaryVerb::GreaterOrEqual => ">=",
            BinaryVerb::LessOrEqual => "<=",
            BinaryVerb::And => "and",
        };
        f.write_str(symbol)
    }
}
