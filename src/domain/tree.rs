//! Shape leaves and the owned decomposition tree.

use std::fmt;

use termtree::Tree;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::operator::Operator;

/// Atomic shape unit: a character, optionally annotated with a single
/// disambiguating sub-shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Leaf {
    pub base: char,
    pub annotation: Option<char>,
}

impl Leaf {
    pub fn new(base: char) -> Self {
        Self {
            base,
            annotation: None,
        }
    }

    pub fn annotated(base: char, annotation: char) -> Self {
        Self {
            base,
            annotation: Some(annotation),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.annotation {
            Some(ann) => write!(f, "[{}({})]", self.base, ann),
            None => write!(f, "[{}]", self.base),
        }
    }
}

/// Decomposition tree node: either a bare leaf or an operator over exactly
/// `arity(operator)` owned children. There are no parent pointers; every
/// node exclusively owns its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdsNode {
    Leaf(Leaf),
    Composite {
        operator: Operator,
        children: Vec<IdsNode>,
    },
}

impl IdsNode {
    /// Wrap a single leaf.
    pub fn leaf(leaf: Leaf) -> Self {
        IdsNode::Leaf(leaf)
    }

    /// Build a composite node, validating the operand count against the
    /// operator's arity. Never coerces.
    pub fn composite(operator: Operator, children: Vec<IdsNode>) -> DomainResult<Self> {
        if children.len() != operator.arity() {
            return Err(DomainError::ArityMismatch {
                operator: operator.symbol(),
                expected: operator.arity(),
                actual: children.len(),
            });
        }
        Ok(IdsNode::Composite { operator, children })
    }

    /// Total node count: every leaf and every composite counts once.
    pub fn count(&self) -> usize {
        match self {
            IdsNode::Leaf(_) => 1,
            IdsNode::Composite { children, .. } => {
                1 + children.iter().map(IdsNode::count).sum::<usize>()
            }
        }
    }

    /// Ordered leaves reachable through composite children.
    ///
    /// A bare leaf-wrapping node registers no structural children and
    /// therefore yields an empty sequence, not the leaf itself.
    pub fn leaves(&self) -> Vec<&Leaf> {
        match self {
            IdsNode::Leaf(_) => Vec::new(),
            IdsNode::Composite { children, .. } => {
                let mut leaves = Vec::new();
                for child in children {
                    child.collect_leaves(&mut leaves);
                }
                leaves
            }
        }
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Leaf>) {
        match self {
            IdsNode::Leaf(leaf) => leaves.push(leaf),
            IdsNode::Composite { children, .. } => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }
}

impl fmt::Display for IdsNode {
    /// Canonical prefix notation: `[shape]` for a leaf, the operator symbol
    /// followed by each child in order for a composite, no separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdsNode::Leaf(leaf) => write!(f, "{}", leaf),
            IdsNode::Composite { operator, children } => {
                write!(f, "{}", operator)?;
                for child in children {
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
        }
    }
}

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for IdsNode {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            IdsNode::Leaf(leaf) => Tree::new(leaf.to_string()),
            IdsNode::Composite { operator, children } => {
                let leaves: Vec<_> = children.iter().map(|c| c.to_tree_string()).collect();
                Tree::new(operator.to_string()).with_leaves(leaves)
            }
        }
    }
}
