//! Substitution rules and the recursive decomposer.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::domain::entry::{Entry, EntryKind};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{IdsNode, Leaf};

/// Placeholder shape that excluded characters collapse to inside other
/// decompositions.
pub const EXCLUSION_PLACEHOLDER: char = 'X';

/// Per-character substitution rules: char-as-leaf to replacement subtree.
/// Built once from all entries, read-only thereafter.
///
/// A character gets a rule only when its record is unambiguous: an excluded
/// character maps to the placeholder leaf; a character with exactly one
/// alias row and no decomposition row maps to its target; in full scope, a
/// character with exactly one decomposition row maps to that tree.
/// Characters with zero or competing decompositions get no rule and stay
/// non-substitutable.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMap {
    rules: BTreeMap<Leaf, IdsNode>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the alias pre-pass: exclusions and unambiguous aliases only.
    pub fn alias_only(entries: &[Entry]) -> Self {
        Self::build(entries, false)
    }

    /// Full rules: additionally inline unambiguous decompositions.
    pub fn full(entries: &[Entry]) -> Self {
        Self::build(entries, true)
    }

    #[instrument(level = "debug", skip(entries))]
    fn build(entries: &[Entry], include_decompositions: bool) -> Self {
        let mut per_char: BTreeMap<char, (usize, Vec<char>, Vec<&IdsNode>)> = BTreeMap::new();
        for entry in entries {
            let slot = per_char.entry(entry.character).or_default();
            match &entry.kind {
                EntryKind::Excluded => slot.0 += 1,
                EntryKind::Alias(target) => slot.1.push(*target),
                EntryKind::Decomposition(tree) => slot.2.push(tree),
            }
        }

        let mut rules = BTreeMap::new();
        for (character, (excluded, aliases, decompositions)) in per_char {
            let key = Leaf::new(character);
            if excluded > 0 {
                rules.insert(key, IdsNode::leaf(Leaf::new(EXCLUSION_PLACEHOLDER)));
            } else if aliases.len() == 1 && decompositions.is_empty() {
                rules.insert(key, IdsNode::leaf(Leaf::new(aliases[0])));
            } else if include_decompositions && decompositions.len() == 1 {
                rules.insert(key, decompositions[0].clone());
            }
        }
        debug!(rules = rules.len(), "replacement map built");
        Self { rules }
    }

    pub fn insert(&mut self, key: Leaf, replacement: IdsNode) {
        self.rules.insert(key, replacement);
    }

    pub fn get(&self, key: &Leaf) -> Option<&IdsNode> {
        self.rules.get(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Recursively inlines replacement rules into a tree until no substitutable
/// leaf remains.
///
/// Substitution is structural: a leaf holding a rule key is replaced by the
/// fully-expanded form of its mapped subtree. The expansion stack makes
/// termination explicit: re-entering a shape already being expanded is a
/// fatal cycle, reported with the origin character. A rule mapping a shape
/// to itself is a no-op.
pub struct Decomposer<'a> {
    rules: &'a ReplacementMap,
}

impl<'a> Decomposer<'a> {
    pub fn new(rules: &'a ReplacementMap) -> Self {
        Self { rules }
    }

    /// Fully expand `tree`. `origin` names the character (or shape) being
    /// resolved, for error reporting.
    pub fn decompose(&self, origin: &str, tree: &IdsNode) -> DomainResult<IdsNode> {
        let mut stack = Vec::new();
        self.expand(origin, tree, &mut stack)
    }

    fn expand(
        &self,
        origin: &str,
        node: &IdsNode,
        stack: &mut Vec<Leaf>,
    ) -> DomainResult<IdsNode> {
        match node {
            IdsNode::Leaf(leaf) => match self.rules.get(leaf) {
                Some(replacement) if replacement != node => {
                    if stack.contains(leaf) {
                        return Err(DomainError::SubstitutionCycle {
                            origin: origin.to_string(),
                            shape: leaf.to_string(),
                        });
                    }
                    stack.push(leaf.clone());
                    let expanded = self.expand(origin, replacement, stack);
                    stack.pop();
                    expanded
                }
                _ => Ok(node.clone()),
            },
            IdsNode::Composite { operator, children } => {
                let children = children
                    .iter()
                    .map(|child| self.expand(origin, child, stack))
                    .collect::<DomainResult<Vec<_>>>()?;
                Ok(IdsNode::Composite {
                    operator: *operator,
                    children,
                })
            }
        }
    }
}
