//! Variant grouping over fully-resolved decompositions.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use tracing::{instrument, warn};

use crate::domain::graph::AliasGraph;

/// Characters sharing one fully-resolved decomposition, split into the
/// primary set and the variant set. Both sets are sorted, so grouping is
/// invariant under input-row permutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantGroup {
    pub primaries: BTreeSet<char>,
    pub variants: BTreeSet<char>,
}

impl VariantGroup {
    /// `<primaries>@<sorted-variants>` output form.
    pub fn render(&self) -> String {
        format!(
            "{}@{}",
            self.primaries.iter().join(""),
            self.variants.iter().join("")
        )
    }
}

/// Groups decomposed entries and assigns primary vs. variant characters.
pub struct VariantUnifier<'a> {
    graph: &'a AliasGraph,
}

impl<'a> VariantUnifier<'a> {
    pub fn new(graph: &'a AliasGraph) -> Self {
        Self { graph }
    }

    /// Group `(character, resolved decomposition)` pairs by decomposition.
    ///
    /// Every character joins its group's primary side; characters reachable
    /// from it through the alias graph are folded into the variant side. In
    /// groups with more than one primary, characters whose glyph does not
    /// appear inside the decomposition string are demoted to variants. If
    /// several primaries remain the collision is logged and all are kept.
    #[instrument(level = "debug", skip(self, resolved))]
    pub fn unify(&self, resolved: &[(char, String)]) -> BTreeMap<String, VariantGroup> {
        let mut groups: BTreeMap<String, VariantGroup> = BTreeMap::new();

        for (character, decomposition) in resolved {
            let group = groups.entry(decomposition.clone()).or_default();
            group.primaries.insert(*character);
            group.variants.extend(self.graph.reachable(*character));
        }

        for (decomposition, group) in &mut groups {
            if group.primaries.len() <= 1 {
                continue;
            }
            let demoted: Vec<char> = group
                .primaries
                .iter()
                .copied()
                .filter(|c| !decomposition.contains(*c))
                .collect();
            for character in demoted {
                group.primaries.remove(&character);
                group.variants.insert(character);
            }
            if group.primaries.len() > 1 {
                warn!(
                    decomposition = %decomposition,
                    primaries = %group.primaries.iter().join(""),
                    "multiple primary characters share a decomposition"
                );
            }
        }

        groups
    }
}
