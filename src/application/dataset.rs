//! Dataset pipeline
//!
//! Orchestrates raw rows into the output artifact: classification, alias
//! pre-pass, replacement resolution, variant unification, and the
//! supplementary geta / extra-shape / oracle-bone flows.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{
    parse_ids, AliasGraph, Decomposer, Entry, EntryKind, IdsNode, RawRow, Reference,
    ReplacementMap, VariantUnifier,
};

/// Placeholder-glyph annotation row: key and note text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetaRow {
    pub key: String,
    pub text: String,
}

/// Standalone shape row: decomposition, optional reference, optional note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraRow {
    pub shape: String,
    pub refer: String,
    pub note: String,
}

/// Attested archaic glyph row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleRow {
    pub code: String,
    pub glyph: String,
    pub construction: String,
    pub reconstruction: String,
    pub note: String,
}

/// One serialized entry of the output artifact. Optional fields are omitted
/// from the JSON encoding.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct OutputRecord {
    #[serde(rename = "char", skip_serializing_if = "Option::is_none")]
    pub character: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
    #[serde(rename = "is", skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,
    #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
    pub excluded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refer: Option<String>,
    #[serde(rename = "to", skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_ids: Option<String>,
}

impl OutputRecord {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The complete build artifact. All maps are sorted by key so two runs over
/// identical input serialize byte-for-byte identically.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Dataset {
    pub entries: Vec<OutputRecord>,
    pub variants: BTreeMap<String, String>,
    pub geta: BTreeMap<String, String>,
    #[serde(rename = "ob")]
    pub oracle: BTreeMap<String, String>,
}

/// Builds the dataset from raw table rows.
#[derive(Debug, Default)]
pub struct DatasetBuilder;

impl DatasetBuilder {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build(
        &self,
        rows: &[RawRow],
        geta_rows: &[GetaRow],
        extra_rows: &[ExtraRow],
        oracle_rows: &[OracleRow],
    ) -> ApplicationResult<Dataset> {
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(Entry::from_row(row)?);
        }
        debug!(entries = entries.len(), "rows classified");

        // Alias pre-pass: inline alias targets (and exclusion placeholders)
        // into every decomposition before anything else looks at them.
        let alias_rules = ReplacementMap::alias_only(&entries);
        let pre = Decomposer::new(&alias_rules);
        for entry in &mut entries {
            let origin = entry.character.to_string();
            if let EntryKind::Decomposition(tree) = &mut entry.kind {
                *tree = pre.decompose(&origin, tree)?;
            }
        }

        let graph = AliasGraph::from_entries(&entries);
        let aliasers = graph.aliasers();
        let rules = ReplacementMap::full(&entries);
        let decomposer = Decomposer::new(&rules);
        debug!(rules = rules.len(), aliasers = aliasers.len(), "resolver ready");

        let mut resolved_pairs: Vec<(char, String)> = Vec::new();
        let mut records = Vec::with_capacity(entries.len());
        for entry in &entries {
            let origin = entry.character.to_string();
            let mut record = OutputRecord {
                character: Some(entry.character),
                ..Default::default()
            };

            match &entry.kind {
                EntryKind::Excluded => record.excluded = Some(true),
                EntryKind::Alias(target) => record.alias = Some(*target),
                EntryKind::Decomposition(tree) => {
                    let ids = tree.to_string();
                    let resolved = decomposer.decompose(&origin, tree)?.to_string();
                    if resolved != ids {
                        record.new_ids = Some(resolved.clone());
                    }
                    record.ids = Some(ids);
                    resolved_pairs.push((entry.character, resolved));
                }
            }

            match &entry.reference {
                Some(Reference::Tree(tree)) => {
                    let resolved = decomposer.decompose(&origin, tree)?;
                    check_reference_integrity(&origin, &resolved, &aliasers)?;
                    record.refer = Some(tree.to_string());
                }
                Some(Reference::Pointer(text)) => record.pointer = Some(text.clone()),
                None => {}
            }

            record.note = entry.note.clone();
            records.push(record);
        }

        let groups = VariantUnifier::new(&graph).unify(&resolved_pairs);
        let variants: BTreeMap<String, String> = groups
            .into_iter()
            .map(|(decomposition, group)| (decomposition, group.render()))
            .collect();

        let geta: BTreeMap<String, String> = geta_rows
            .iter()
            .map(|row| (row.key.clone(), row.text.clone()))
            .collect();

        for row in extra_rows {
            records.extend(self.build_extra_record(row, &decomposer, &aliasers)?);
        }

        let oracle = self.build_oracle_groups(oracle_rows, &decomposer, &aliasers)?;

        Ok(Dataset {
            entries: records,
            variants,
            geta,
            oracle,
        })
    }

    /// Standalone shapes carry no `char` field; their decomposition and
    /// reference are emitted fully resolved.
    fn build_extra_record(
        &self,
        row: &ExtraRow,
        decomposer: &Decomposer<'_>,
        aliasers: &BTreeSet<char>,
    ) -> ApplicationResult<Option<OutputRecord>> {
        let mut record = OutputRecord::default();

        if !row.shape.is_empty() {
            let tree = parse_ids(&row.shape)?;
            let resolved = decomposer.decompose(&row.shape, &tree)?;
            check_reference_integrity(&row.shape, &resolved, aliasers)?;
            record.ids = Some(resolved.to_string());
        }
        if !row.refer.is_empty() {
            let tree = parse_ids(&row.refer)?;
            let resolved = decomposer.decompose(&row.refer, &tree)?;
            check_reference_integrity(&row.refer, &resolved, aliasers)?;
            record.refer = Some(resolved.to_string());
        }
        if !row.note.is_empty() {
            record.note = Some(row.note.clone());
        }

        Ok(if record.is_empty() { None } else { Some(record) })
    }

    /// Group oracle-bone rows by decomposed construction into
    /// `<glyph+code>@<glyph+code…>` strings.
    fn build_oracle_groups(
        &self,
        rows: &[OracleRow],
        decomposer: &Decomposer<'_>,
        aliasers: &BTreeSet<char>,
    ) -> ApplicationResult<BTreeMap<String, String>> {
        let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in rows {
            let label = format!("{}{}", row.glyph, row.code);
            if !row.reconstruction.is_empty() {
                let tree = parse_ids(&row.reconstruction)?;
                let resolved = decomposer.decompose(&label, &tree)?;
                check_reference_integrity(&label, &resolved, aliasers)?;
            }
            if row.construction.is_empty() {
                continue;
            }
            let tree = parse_ids(&row.construction)?;
            let resolved = decomposer.decompose(&label, &tree)?;
            check_reference_integrity(&label, &resolved, aliasers)?;
            members.entry(resolved.to_string()).or_default().push(label);
        }

        let mut groups = BTreeMap::new();
        for (decomposition, labels) in members {
            let Some((first, rest)) = labels.split_first() else {
                continue;
            };
            groups.insert(decomposition, format!("{}@{}", first, rest.join("")));
        }
        Ok(groups)
    }
}

/// A resolved reference must not contain a shape that still names an
/// alias-declaring character; that means the dataset contradicts itself.
fn check_reference_integrity(
    origin: &str,
    resolved: &IdsNode,
    aliasers: &BTreeSet<char>,
) -> ApplicationResult<()> {
    let leaves = match resolved {
        IdsNode::Leaf(leaf) => vec![leaf],
        _ => resolved.leaves(),
    };
    for leaf in leaves {
        if leaf.annotation.is_none() && aliasers.contains(&leaf.base) {
            return Err(ApplicationError::ReferenceIntegrity {
                origin: origin.to_string(),
                shape: leaf.base,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rows: &[RawRow]) -> ApplicationResult<Dataset> {
        DatasetBuilder::new().build(rows, &[], &[], &[])
    }

    #[test]
    fn given_two_simple_rows_when_building_then_two_singleton_groups() {
        let dataset = build(&[
            RawRow::new("江", "⿰氵工", "", ""),
            RawRow::new("河", "⿰氵可", "", ""),
        ])
        .unwrap();

        assert_eq!(dataset.entries.len(), 2);
        assert_eq!(dataset.entries[0].ids.as_deref(), Some("⿰[氵][工]"));
        assert!(dataset.entries[0].new_ids.is_none());
        assert_eq!(dataset.variants.len(), 2);
        assert_eq!(dataset.variants["⿰[氵][工]"], "江@");
        assert_eq!(dataset.variants["⿰[氵][可]"], "河@");
    }

    #[test]
    fn given_component_definition_when_building_then_new_ids_resolved() {
        let dataset = build(&[
            RawRow::new("木", "⿰十八", "", ""),
            RawRow::new("林", "⿰木木", "", ""),
        ])
        .unwrap();

        let lin = &dataset.entries[1];
        assert_eq!(lin.ids.as_deref(), Some("⿰[木][木]"));
        assert_eq!(lin.new_ids.as_deref(), Some("⿰⿰[十][八]⿰[十][八]"));
    }

    #[test]
    fn given_alias_row_when_building_then_inlined_and_folded() {
        let dataset = build(&[
            RawRow::new("湧", "⿰氵勇", "", ""),
            RawRow::new("涌", "=湧", "", ""),
        ])
        .unwrap();

        assert_eq!(dataset.entries[1].alias, Some('湧'));
        assert!(dataset.entries[1].ids.is_none());
        // 涌 rides along as a variant of 湧's group.
        let group = dataset.variants.values().next().unwrap();
        assert_eq!(group, "湧@涌");
    }

    #[test]
    fn given_excluded_row_when_building_then_placeholder_in_ids() {
        let dataset = build(&[
            RawRow::new("久", "X", "", "rare"),
            RawRow::new("圦", "⿰土久", "", ""),
        ])
        .unwrap();

        assert_eq!(dataset.entries[0].excluded, Some(true));
        assert!(dataset.entries[0].ids.is_none());
        assert_eq!(dataset.entries[0].note.as_deref(), Some("rare"));
        // The excluded component collapses to the placeholder leaf.
        assert_eq!(dataset.entries[1].ids.as_deref(), Some("⿰[土][X]"));
    }

    #[test]
    fn given_clean_reference_when_building_then_refer_kept_raw() {
        let dataset = build(&[RawRow::new("江", "⿰氵工", "⿰水工", "")]).unwrap();
        assert_eq!(dataset.entries[0].refer.as_deref(), Some("⿰[水][工]"));
    }

    #[test]
    fn given_reference_naming_aliaser_when_building_then_integrity_error() {
        // 涌 declares two competing alias targets, so it stays
        // non-substitutable and survives into the resolved reference.
        let err = build(&[
            RawRow::new("涌", "=湧", "", ""),
            RawRow::new("涌", "=甬", "", ""),
            RawRow::new("勇", "⿱甬力", "⿻涌", ""),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ApplicationError::ReferenceIntegrity {
                origin: "勇".to_string(),
                shape: '涌',
            }
        );
    }

    #[test]
    fn given_extra_rows_when_building_then_records_without_char() {
        let dataset = DatasetBuilder::new()
            .build(
                &[RawRow::new("木", "⿰十八", "", "")],
                &[],
                &[ExtraRow {
                    shape: "⿱木木".to_string(),
                    refer: String::new(),
                    note: "stacked".to_string(),
                }],
                &[],
            )
            .unwrap();

        let extra = dataset.entries.last().unwrap();
        assert!(extra.character.is_none());
        assert_eq!(extra.ids.as_deref(), Some("⿱⿰[十][八]⿰[十][八]"));
        assert_eq!(extra.note.as_deref(), Some("stacked"));
    }

    fn oracle_row(code: &str, glyph: &str, construction: &str) -> OracleRow {
        OracleRow {
            code: code.to_string(),
            glyph: glyph.to_string(),
            construction: construction.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn given_oracle_rows_when_building_then_grouped_by_construction() {
        let rows = [
            oracle_row("001", "𠂤", "⿱厂一"),
            oracle_row("002", "𠂥", "⿱厂一"),
        ];
        let dataset = DatasetBuilder::new().build(&[], &[], &[], &rows).unwrap();

        assert_eq!(dataset.oracle["⿱[厂][一]"], "𠂤001@𠂥002");
    }

    #[test]
    fn given_geta_rows_when_building_then_sorted_map() {
        let geta = [
            GetaRow {
                key: "b".to_string(),
                text: "second".to_string(),
            },
            GetaRow {
                key: "a".to_string(),
                text: "first".to_string(),
            },
        ];
        let dataset = DatasetBuilder::new().build(&[], &geta, &[], &[]).unwrap();
        let keys: Vec<_> = dataset.geta.keys().cloned().collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
