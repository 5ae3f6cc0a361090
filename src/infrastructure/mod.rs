//! Infrastructure layer: file reading and artifact writing

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{InfraError, InfraResult};
pub use reader::{apply_glossary, SourceReader};
pub use writer::{render_dataset, write_dataset};
