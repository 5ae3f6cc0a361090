//! abshape: builds a structured dataset describing how CJK ideographs
//! decompose into abstract component shapes (IDS notation).
//!
//! Layers, inner to outer: `domain` (the IDS model and its algorithms),
//! `application` (the build pipeline), `infrastructure` (file I/O), `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{Dataset, DatasetBuilder, OutputRecord};
pub use config::Settings;
pub use domain::{parse_ids, AliasGraph, Decomposer, IdsNode, Leaf, Operator, ReplacementMap};
