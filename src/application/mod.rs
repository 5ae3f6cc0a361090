//! Application layer: the build pipeline over the domain model

pub mod dataset;
pub mod error;

pub use dataset::{Dataset, DatasetBuilder, ExtraRow, GetaRow, OracleRow, OutputRecord};
pub use error::{ApplicationError, ApplicationResult};
