//! Criteria expression trees

use serde_json::{json, Value as JsonValue};

/// Boolean connective joining two criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaOp {
    /// Both sides must hold
    And,
    /// Either side may hold
    Or,
}

impl CriteriaOp {
    /// Wire token of the connective
    pub fn as_str(self) -> &'static str {
        match self {
            CriteriaOp::And => "and",
            CriteriaOp::Or => "or",
        }
    }
}

/// A nested boolean filter expression
///
/// Built by [`Criteria::join`] from leaf conditions; empty operands are
/// absorbed so joins never manufacture connectives around nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Criteria {
    /// No condition
    #[default]
    Empty,
    /// An atomic condition, e.g. `Age >= 18`
    Leaf(String),
    /// An explicitly parenthesized sub-expression
    Paren(Box<Criteria>),
    /// Two criteria joined by a connective
    Binary {
        /// Connective between the sides
        op: CriteriaOp,
        /// Left side
        left: Box<Criteria>,
        /// Right side
        right: Box<Criteria>,
    },
}

impl Criteria {
    /// An atomic condition
    pub fn leaf(condition: impl Into<String>) -> Self {
        Criteria::Leaf(condition.into())
    }

    /// True when no condition is present
    pub fn is_empty(&self) -> bool {
        matches!(self, Criteria::Empty)
    }

    /// Parenthesize this criteria; empty stays empty
    pub fn paren(self) -> Self {
        if self.is_empty() {
            self
        } else {
            Criteria::Paren(Box::new(self))
        }
    }

    /// Join two criteria with `op`, absorbing empty operands
    pub fn join(left: Criteria, op: CriteriaOp, right: Criteria) -> Criteria {
        if left.is_empty() {
            return right;
        }
        if right.is_empty() {
            return left;
        }
        Criteria::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Render the nested-array wire form consumed by list services
    ///
    /// Binary nodes become `[left, op, right]`, parenthesized nodes
    /// `["()", inner]`, leaves plain strings, and empty `[""]`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Criteria::Empty => json!([""]),
            Criteria::Leaf(condition) => json!(condition),
            Criteria::Paren(inner) => json!(["()", inner.to_json()]),
            Criteria::Binary { op, left, right } => {
                json!([left.to_json(), op.as_str(), right.to_json()])
            }
        }
    }
}
