//! JSON artifact output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::application::Dataset;
use crate::infrastructure::error::{InfraError, InfraResult};

/// Write the dataset as pretty-printed JSON, creating parent directories as
/// needed.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> InfraResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                InfraError::io(format!("cannot create {}", parent.display()), e)
            })?;
        }
    }

    let file = File::create(path)
        .map_err(|e| InfraError::io(format!("cannot create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dataset).map_err(|e| InfraError::Json {
        context: path.display().to_string(),
        source: e,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| InfraError::io(format!("cannot write {}", path.display()), e))?;

    debug!(path = %path.display(), entries = dataset.entries.len(), "artifact written");
    Ok(())
}

/// Render the dataset as a pretty-printed JSON string.
pub fn render_dataset(dataset: &Dataset) -> InfraResult<String> {
    serde_json::to_string_pretty(dataset).map_err(|e| InfraError::Json {
        context: "in-memory artifact".to_string(),
        source: e,
    })
}
