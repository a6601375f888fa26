//! Operators for Pipewright conditions
//!
//! Each operator family has its own enum; the wire spelling of every operator
//! is its variant name, verbatim.

use serde::{Deserialize, Serialize};

/// The five operator families a condition can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorType {
    Unary,
    Binary,
    Logical,
    Comparator,
    Exists,
}

impl OperatorType {
    /// Unary and exists conditions have no left-hand operand
    pub fn has_lhs(&self) -> bool {
        !matches!(self, OperatorType::Unary | OperatorType::Exists)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Arithmetic negation (-)
    Negation,
    /// Bitwise inversion (~)
    Inversion,
    /// Logical NOT (!)
    LogicalNot,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Negation => "Negation",
            UnaryOperator::Inversion => "Inversion",
            UnaryOperator::LogicalNot => "LogicalNot",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Negation" => Some(UnaryOperator::Negation),
            "Inversion" => Some(UnaryOperator::Inversion),
            "LogicalNot" => Some(UnaryOperator::LogicalNot),
            _ => None,
        }
    }
}

/// Binary (arithmetic/bitwise) operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Addition,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulus,
    RightShift,
    LeftShift,
    Or,
    And,
    Xor,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Addition => "Addition",
            BinaryOperator::Subtract => "Subtract",
            BinaryOperator::Multiply => "Multiply",
            BinaryOperator::Divide => "Divide",
            BinaryOperator::Power => "Power",
            BinaryOperator::Modulus => "Modulus",
            BinaryOperator::RightShift => "RightShift",
            BinaryOperator::LeftShift => "LeftShift",
            BinaryOperator::Or => "Or",
            BinaryOperator::And => "And",
            BinaryOperator::Xor => "Xor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Addition" => Some(BinaryOperator::Addition),
            "Subtract" => Some(BinaryOperator::Subtract),
            "Multiply" => Some(BinaryOperator::Multiply),
            "Divide" => Some(BinaryOperator::Divide),
            "Power" => Some(BinaryOperator::Power),
            "Modulus" => Some(BinaryOperator::Modulus),
            "RightShift" => Some(BinaryOperator::RightShift),
            "LeftShift" => Some(BinaryOperator::LeftShift),
            "Or" => Some(BinaryOperator::Or),
            "And" => Some(BinaryOperator::And),
            "Xor" => Some(BinaryOperator::Xor),
            _ => None,
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "And",
            LogicalOperator::Or => "Or",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "And" => Some(LogicalOperator::And),
            "Or" => Some(LogicalOperator::Or),
            _ => None,
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparatorOperator {
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    NotEqual,
    RegexMatch,
    RegexNoMatch,
}

impl ComparatorOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparatorOperator::GreaterThan => "GreaterThan",
            ComparatorOperator::LessThan => "LessThan",
            ComparatorOperator::GreaterThanOrEqual => "GreaterThanOrEqual",
            ComparatorOperator::LessThanOrEqual => "LessThanOrEqual",
            ComparatorOperator::Equal => "Equal",
            ComparatorOperator::NotEqual => "NotEqual",
            ComparatorOperator::RegexMatch => "RegexMatch",
            ComparatorOperator::RegexNoMatch => "RegexNoMatch",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GreaterThan" => Some(ComparatorOperator::GreaterThan),
            "LessThan" => Some(ComparatorOperator::LessThan),
            "GreaterThanOrEqual" => Some(ComparatorOperator::GreaterThanOrEqual),
            "LessThanOrEqual" => Some(ComparatorOperator::LessThanOrEqual),
            "Equal" => Some(ComparatorOperator::Equal),
            "NotEqual" => Some(ComparatorOperator::NotEqual),
            "RegexMatch" => Some(ComparatorOperator::RegexMatch),
            "RegexNoMatch" => Some(ComparatorOperator::RegexNoMatch),
            _ => None,
        }
    }
}

/// Existence-test operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExistsOperator {
    Exists,
    NotExists,
}

impl ExistsOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExistsOperator::Exists => "Exists",
            ExistsOperator::NotExists => "NotExists",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Exists" => Some(ExistsOperator::Exists),
            "NotExists" => Some(ExistsOperator::NotExists),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_type_has_lhs() {
        assert!(!OperatorType::Unary.has_lhs());
        assert!(!OperatorType::Exists.has_lhs());
        assert!(OperatorType::Binary.has_lhs());
        assert!(OperatorType::Logical.has_lhs());
        assert!(OperatorType::Comparator.has_lhs());
    }

    #[test]
    fn test_comparator_operator_round_trip() {
        for op in [
            ComparatorOperator::GreaterThan,
            ComparatorOperator::LessThan,
            ComparatorOperator::GreaterThanOrEqual,
            ComparatorOperator::LessThanOrEqual,
            ComparatorOperator::Equal,
            ComparatorOperator::NotEqual,
            ComparatorOperator::RegexMatch,
            ComparatorOperator::RegexNoMatch,
        ] {
            assert_eq!(ComparatorOperator::parse(op.as_str()), Some(op));
        }
    }

    #[test]
    fn test_binary_operator_round_trip() {
        for op in [
            BinaryOperator::Addition,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Power,
            BinaryOperator::Modulus,
            BinaryOperator::RightShift,
            BinaryOperator::LeftShift,
            BinaryOperator::Or,
            BinaryOperator::And,
            BinaryOperator::Xor,
        ] {
            assert_eq!(BinaryOperator::parse(op.as_str()), Some(op));
        }
    }

    #[test]
    fn test_unknown_operator_name() {
        assert_eq!(UnaryOperator::parse("Nope"), None);
        assert_eq!(LogicalOperator::parse("Xor"), None);
        assert_eq!(ExistsOperator::parse(""), None);
    }
}
