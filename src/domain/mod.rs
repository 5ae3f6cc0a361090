//! Domain layer: the IDS data model and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config
//! loading).

pub mod entry;
pub mod error;
pub mod graph;
pub mod operator;
pub mod parser;
pub mod resolver;
pub mod tree;
pub mod unifier;

pub use entry::{Entry, EntryKind, RawRow, Reference};
pub use error::{DomainError, DomainResult};
pub use graph::AliasGraph;
pub use operator::Operator;
pub use parser::{parse_ids, IdsParser};
pub use resolver::{Decomposer, ReplacementMap, EXCLUSION_PLACEHOLDER};
pub use tree::{IdsNode, Leaf, TreeDisplay};
pub use unifier::{VariantGroup, VariantUnifier};
