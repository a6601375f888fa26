//! Condition types
//!
//! A condition is a small boolean/value expression that optionally gates a
//! process. One variant per operator family keeps the "unary and exists
//! conditions have no left-hand operand" rule structural. "No condition
//! attached" is represented as `Option<Condition>` everywhere; there is no
//! sentinel value.

pub mod operator;

pub use operator::{
    BinaryOperator, ComparatorOperator, ExistsOperator, LogicalOperator, OperatorType,
    UnaryOperator,
};

use serde::{Deserialize, Serialize};

/// A conditional expression gating a process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Single-operand expression (negate/invert/not)
    Unary { op: UnaryOperator, rhs: String },
    /// Arithmetic/bitwise expression over two operands
    Binary {
        op: BinaryOperator,
        lhs: String,
        rhs: String,
    },
    /// Logical combination of two operands
    Logical {
        op: LogicalOperator,
        lhs: String,
        rhs: String,
    },
    /// Comparison of two operands
    Comparator {
        op: ComparatorOperator,
        lhs: String,
        rhs: String,
    },
    /// Existence test on a key
    Exists { op: ExistsOperator, key: String },
}

impl Condition {
    /// Create a unary condition
    pub fn unary(op: UnaryOperator, rhs: impl Into<String>) -> Self {
        Condition::Unary { op, rhs: rhs.into() }
    }

    /// Create a binary condition
    pub fn binary(op: BinaryOperator, lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Condition::Binary {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Create a logical condition
    pub fn logical(op: LogicalOperator, lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Condition::Logical {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Create a comparator condition
    pub fn comparator(
        op: ComparatorOperator,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        Condition::Comparator {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Create an existence-test condition
    pub fn exists(op: ExistsOperator, key: impl Into<String>) -> Self {
        Condition::Exists { op, key: key.into() }
    }

    /// The operator family of this condition
    pub fn operator_type(&self) -> OperatorType {
        match self {
            Condition::Unary { .. } => OperatorType::Unary,
            Condition::Binary { .. } => OperatorType::Binary,
            Condition::Logical { .. } => OperatorType::Logical,
            Condition::Comparator { .. } => OperatorType::Comparator,
            Condition::Exists { .. } => OperatorType::Exists,
        }
    }

    /// Wire spelling of the operator
    pub fn op_str(&self) -> &'static str {
        match self {
            Condition::Unary { op, .. } => op.as_str(),
            Condition::Binary { op, .. } => op.as_str(),
            Condition::Logical { op, .. } => op.as_str(),
            Condition::Comparator { op, .. } => op.as_str(),
            Condition::Exists { op, .. } => op.as_str(),
        }
    }

    /// Left-hand operand, where the family has one
    pub fn lhs(&self) -> Option<&str> {
        match self {
            Condition::Binary { lhs, .. }
            | Condition::Logical { lhs, .. }
            | Condition::Comparator { lhs, .. } => Some(lhs),
            _ => None,
        }
    }

    /// Right-hand operand (the tested key for exists conditions)
    pub fn rhs(&self) -> &str {
        match self {
            Condition::Unary { rhs, .. }
            | Condition::Binary { rhs, .. }
            | Condition::Logical { rhs, .. }
            | Condition::Comparator { rhs, .. } => rhs,
            Condition::Exists { key, .. } => key,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.lhs() {
            Some(lhs) => write!(f, "{} {} {}", lhs, self.op_str(), self.rhs()),
            None => write!(f, "{} {}", self.op_str(), self.rhs()),
        }
    }
}

/// How an operand string serializes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// A `[name]`-wrapped variable reference
    Variable,
    /// A string that parses as a finite number
    Numeric,
    /// Anything else
    Literal,
}

/// Classify an operand string for serialization.
///
/// Any bracket-delimited string is a variable reference; there is no escape
/// for a literal that starts with `[` and ends with `]`.
pub fn classify_operand(operand: &str) -> OperandKind {
    if operand.len() >= 2 && operand.starts_with('[') && operand.ends_with(']') {
        return OperandKind::Variable;
    }
    if operand.parse::<f64>().map_or(false, f64::is_finite) {
        return OperandKind::Numeric;
    }
    OperandKind::Literal
}

/// Strip the brackets from a variable operand, or return the operand as-is
pub fn variable_name(operand: &str) -> &str {
    operand
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(operand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_operator_type() {
        let c = Condition::comparator(ComparatorOperator::Equal, "[a]", "1");
        assert_eq!(c.operator_type(), OperatorType::Comparator);
        assert_eq!(c.op_str(), "Equal");
        assert_eq!(c.lhs(), Some("[a]"));
        assert_eq!(c.rhs(), "1");
    }

    #[test]
    fn test_unary_has_no_lhs() {
        let c = Condition::unary(UnaryOperator::LogicalNot, "[flag]");
        assert_eq!(c.lhs(), None);
        assert_eq!(c.rhs(), "[flag]");
    }

    #[test]
    fn test_exists_key_is_rhs() {
        let c = Condition::exists(ExistsOperator::NotExists, "user.id");
        assert_eq!(c.lhs(), None);
        assert_eq!(c.rhs(), "user.id");
    }

    #[test]
    fn test_display() {
        let c = Condition::comparator(ComparatorOperator::GreaterThan, "[amount]", "100");
        assert_eq!(c.to_string(), "[amount] GreaterThan 100");

        let u = Condition::unary(UnaryOperator::Negation, "[x]");
        assert_eq!(u.to_string(), "Negation [x]");
    }

    #[test]
    fn test_classify_operand_variable() {
        assert_eq!(classify_operand("[name]"), OperandKind::Variable);
        assert_eq!(classify_operand("[]"), OperandKind::Variable);
        // Unbalanced brackets are not variables
        assert_eq!(classify_operand("[name"), OperandKind::Literal);
        assert_eq!(classify_operand("name]"), OperandKind::Literal);
        assert_eq!(classify_operand("["), OperandKind::Literal);
    }

    #[test]
    fn test_classify_operand_numeric() {
        assert_eq!(classify_operand("42"), OperandKind::Numeric);
        assert_eq!(classify_operand("-3.5"), OperandKind::Numeric);
        assert_eq!(classify_operand("1e6"), OperandKind::Numeric);
        assert_eq!(classify_operand(""), OperandKind::Literal);
        assert_eq!(classify_operand("42abc"), OperandKind::Literal);
        assert_eq!(classify_operand("inf"), OperandKind::Literal);
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(variable_name("[user.id]"), "user.id");
        assert_eq!(variable_name("plain"), "plain");
    }
}
