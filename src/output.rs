use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize card document: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub async fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| OutputError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

/// Write `doc` as two-space indented JSON, replacing any existing file.
/// Non-ASCII text is written as UTF-8, not `\u` escapes.
pub async fn write_document(path: &Path, doc: &impl Serialize) -> Result<(), OutputError> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = bytes.len(), "document written");
    Ok(())
}
