//! The abstract syntax tree of a parsed query.
//!
//! The variant set is closed and small, so [`Node`] is a plain enum rather
//! than an open trait: every variant knows how to evaluate itself against a
//! resolver and how to re-serialize to canonical source via
//! [`Node::to_query`]. The canonical form is what gets persisted for named
//! sets, and it re-parses to an equal tree (associativity is implicit, so no
//! parentheses are needed).

use std::fmt;

use crate::error::Result;
use crate::sets::{self, Set};

/// Callback used to materialize a [`Node::SetRef`] during evaluation.
///
/// Given the referenced name it returns the parsed pattern stored for that
/// set, which is then evaluated with the same resolver. Keeping the resolver
/// an explicit value keeps the tree itself pure: dependency tracking and
/// cycle checks live entirely in the closure the evaluator builds.
pub type Resolver<'a> = dyn FnMut(&str) -> Result<Node> + 'a;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Union,
    Intersection,
    Difference,
    SymmetricDifference,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Union => '|',
            Operator::Intersection => '&',
            Operator::Difference => '-',
            Operator::SymmetricDifference => '^',
        }
    }

    fn apply(&self, lhs: &Set, rhs: &Set) -> Set {
        match self {
            Operator::Union => sets::union(&[lhs, rhs]),
            Operator::Intersection => sets::intersection(&[lhs, rhs]),
            Operator::Difference => sets::difference(&[lhs, rhs]),
            Operator::SymmetricDifference => sets::symmetric_difference(&[lhs, rhs]),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A literal element; for quoted items the name keeps its quotes.
    Item { name: String },
    /// Reference to a named set in the catalog.
    SetRef { name: String },
    /// Braced inline set; empty denotes the empty set.
    SetLiteral { elements: Vec<Node> },
    Binary { op: Operator, lhs: Box<Node>, rhs: Box<Node> },
    /// Only ever the root of a query. Evaluation passes through to the
    /// expression; the binding itself is the database facade's concern.
    Assign { name: String, expr: Box<Node> },
}

impl Node {
    /// Evaluates the tree to a materialized set, resolving references
    /// left-to-right and depth-first. The first error aborts evaluation.
    pub fn evaluate(&self, resolve: &mut Resolver) -> Result<Set> {
        match self {
            Node::Item { name } => Ok(Set::from_items([name.clone()])),
            Node::SetRef { name } => {
                let pattern = resolve(name)?;
                pattern.evaluate(resolve)
            }
            Node::SetLiteral { elements } => {
                let mut evaluated = Vec::with_capacity(elements.len());
                for element in elements {
                    evaluated.push(element.evaluate(resolve)?);
                }
                Ok(sets::union(&evaluated.iter().collect::<Vec<_>>()))
            }
            Node::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(resolve)?;
                let rhs = rhs.evaluate(resolve)?;
                Ok(op.apply(&lhs, &rhs))
            }
            Node::Assign { expr, .. } => expr.evaluate(resolve),
        }
    }

    /// Deterministic canonical source: no whitespace except around the `=`
    /// of an assignment, no parentheses. This is the form the backend
    /// persists and the form re-parsed when a reference is resolved.
    pub fn to_query(&self) -> String {
        match self {
            Node::Item { name } => name.clone(),
            Node::SetRef { name } => name.clone(),
            Node::SetLiteral { elements } => {
                let mut buf = String::from("{");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        buf.push(',');
                    }
                    buf.push_str(&element.to_query());
                }
                buf.push('}');
                buf
            }
            Node::Binary { op, lhs, rhs } => {
                format!("{}{}{}", lhs.to_query(), op, rhs.to_query())
            }
            Node::Assign { name, expr } => format!("{} = {}", name, expr.to_query()),
        }
    }
}
