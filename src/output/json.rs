//! JSON snapshot export and replay
//!
//! Every collected resource is exported as a pretty-printed JSON file under
//! the data directory, keyed by resource name. The same files are the sole
//! input when live retrieval is bypassed. Exports may carry an output-name
//! suffix; replay always reads the unsuffixed name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{OutputError, OutputResult};

/// Export one resource as pretty-printed JSON, creating the data directory
/// if absent. Returns the path written.
pub fn export<T: Serialize>(
    data_dir: &Path,
    resource: &str,
    output_name: Option<&str>,
    data: &T,
) -> OutputResult<PathBuf> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| OutputError::Io(format!("failed to create data directory: {e}")))?;

    let file_name = match output_name {
        Some(name) => format!("{resource}_{name}.json"),
        None => format!("{resource}.json"),
    };
    let path = data_dir.join(file_name);

    let file = File::create(&path)
        .map_err(|e| OutputError::Io(format!("failed to create {}: {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), data)
        .map_err(|e| OutputError::Serialization(e.to_string()))?;

    info!("JSON file created: {}", path.display());
    Ok(path)
}

/// Read one resource snapshot back. A missing file is fatal in replay mode.
pub fn read<T: DeserializeOwned>(data_dir: &Path, resource: &str) -> OutputResult<T> {
    let path = data_dir.join(format!("{resource}.json"));
    let file = File::open(&path)
        .map_err(|_| OutputError::MissingSnapshot(path.display().to_string()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| OutputError::Serialization(format!("{}: {e}", path.display())))
}
