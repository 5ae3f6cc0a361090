//! Per-character entries classified from raw table rows.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::parser::parse_ids;
use crate::domain::tree::{IdsNode, Leaf};

/// Primary field value marking a character as excluded from decomposition.
pub const EXCLUSION_SENTINEL: &str = "X";
/// Primary field prefix declaring an alias to another character.
pub const ALIAS_MARKER: char = '=';
/// Prefix marking an annotated self-shape (primary field) or pointer text
/// (secondary field).
pub const POINTER_MARKER: char = '*';

/// Raw 4-field row from the tabular source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub character: String,
    pub primary: String,
    pub secondary: String,
    pub note: String,
}

impl RawRow {
    pub fn new(character: &str, primary: &str, secondary: &str, note: &str) -> Self {
        Self {
            character: character.to_string(),
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            note: note.to_string(),
        }
    }
}

/// What a row says about its character. Exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Decomposition(IdsNode),
    Alias(char),
    Excluded,
}

/// Secondary-field payload: a parsed reference tree or verbatim pointer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Tree(IdsNode),
    Pointer(String),
}

/// One normalized definition record for a character. A character may have
/// several entries (one per source row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub character: char,
    pub kind: EntryKind,
    pub reference: Option<Reference>,
    pub note: Option<String>,
}

impl Entry {
    /// Classify a raw row.
    ///
    /// Primary field: the exclusion sentinel, an `=`-prefixed alias target,
    /// a `*`-prefixed self-annotation, or an IDS expression. Secondary
    /// field: `*`-prefixed pointer text or an IDS reference expression.
    /// The note is stored verbatim.
    pub fn from_row(row: &RawRow) -> DomainResult<Self> {
        let character = single_char(&row.character, &row.character, "character field")?;

        let kind = if row.primary == EXCLUSION_SENTINEL {
            EntryKind::Excluded
        } else if let Some(target) = row.primary.strip_prefix(ALIAS_MARKER) {
            EntryKind::Alias(single_char(target, &row.character, "alias target")?)
        } else if let Some(annotation) = row.primary.strip_prefix(POINTER_MARKER) {
            let annotation = single_char(annotation, &row.character, "shape annotation")?;
            EntryKind::Decomposition(IdsNode::leaf(Leaf::annotated(character, annotation)))
        } else if row.primary.is_empty() {
            return Err(DomainError::InvalidRow {
                character: row.character.clone(),
                reason: "empty primary field".to_string(),
            });
        } else {
            EntryKind::Decomposition(parse_ids(&row.primary)?)
        };

        let reference = if row.secondary.is_empty() {
            None
        } else if let Some(text) = row.secondary.strip_prefix(POINTER_MARKER) {
            Some(Reference::Pointer(text.to_string()))
        } else {
            Some(Reference::Tree(parse_ids(&row.secondary)?))
        };

        let note = if row.note.is_empty() {
            None
        } else {
            Some(row.note.clone())
        };

        Ok(Self {
            character,
            kind,
            reference,
            note,
        })
    }

    pub fn decomposition(&self) -> Option<&IdsNode> {
        match &self.kind {
            EntryKind::Decomposition(tree) => Some(tree),
            _ => None,
        }
    }
}

fn single_char(text: &str, row_character: &str, field: &str) -> DomainResult<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DomainError::InvalidRow {
            character: row_character.to_string(),
            reason: format!("{} must be exactly one character, got '{}'", field, text),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_exclusion_sentinel_when_classifying_then_excluded() {
        let entry = Entry::from_row(&RawRow::new("久", "X", "", "note")).unwrap();
        assert_eq!(entry.kind, EntryKind::Excluded);
        assert!(entry.decomposition().is_none());
        assert_eq!(entry.note.as_deref(), Some("note"));
    }

    #[test]
    fn given_alias_marker_when_classifying_then_alias_target() {
        let entry = Entry::from_row(&RawRow::new("涌", "=湧", "", "")).unwrap();
        assert_eq!(entry.kind, EntryKind::Alias('湧'));
        assert!(entry.note.is_none());
    }

    #[test]
    fn given_annotation_marker_when_classifying_then_self_leaf() {
        let entry = Entry::from_row(&RawRow::new("氵", "*工", "", "")).unwrap();
        let tree = entry.decomposition().unwrap();
        assert_eq!(tree.to_string(), "[氵(工)]");
    }

    #[test]
    fn given_ids_primary_when_classifying_then_parsed_tree() {
        let entry = Entry::from_row(&RawRow::new("江", "⿰氵工", "", "")).unwrap();
        assert_eq!(entry.decomposition().unwrap().to_string(), "⿰[氵][工]");
    }

    #[test]
    fn given_ids_secondary_when_classifying_then_reference_tree() {
        let entry = Entry::from_row(&RawRow::new("江", "⿰氵工", "⿰水工", "")).unwrap();
        match entry.reference {
            Some(Reference::Tree(tree)) => assert_eq!(tree.to_string(), "⿰[水][工]"),
            other => panic!("expected reference tree, got {:?}", other),
        }
    }

    #[test]
    fn given_pointer_secondary_when_classifying_then_verbatim_text() {
        let entry = Entry::from_row(&RawRow::new("江", "⿰氵工", "*GY", "")).unwrap();
        assert_eq!(entry.reference, Some(Reference::Pointer("GY".to_string())));
    }

    #[test]
    fn given_empty_primary_when_classifying_then_invalid_row() {
        let err = Entry::from_row(&RawRow::new("江", "", "", "note")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRow { .. }));
    }

    #[test]
    fn given_multichar_character_field_when_classifying_then_invalid_row() {
        let err = Entry::from_row(&RawRow::new("江水", "X", "", "")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRow { .. }));
    }

    #[test]
    fn given_bad_ids_primary_when_classifying_then_parse_error() {
        let err = Entry::from_row(&RawRow::new("江", "⿰氵", "", "")).unwrap_err();
        assert!(matches!(err, DomainError::UnexpectedEnd { .. }));
    }
}
