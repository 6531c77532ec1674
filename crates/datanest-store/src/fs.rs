//! Filesystem-backed payload sink.
//!
//! Reference adapter used by the CLI: payloads land under
//! `<root>/<backend-dir>/batch-<seq>.<ext>`, one file per payload, so a run
//! can be inspected or replayed into a real back end later. Combined
//! payloads get their context tag recorded next to the body.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::RepositoryError;
use crate::payload::SerializedPayload;
use crate::ports::PayloadSink;

pub struct FsSink {
    root: PathBuf,
    seq: AtomicU64,
}

impl FsSink {
    /// # Errors
    ///
    /// Returns [`RepositoryError::Backend`] if the root directory cannot be
    /// created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| RepositoryError::Backend {
            name: root.display().to_string(),
            operation: "store",
            reason: e.to_string(),
        })?;
        Ok(Self {
            root,
            seq: AtomicU64::new(0),
        })
    }
}

/// Maps a backend identifier (base URI or index name) to a directory name.
fn backend_dir(backend: &str) -> String {
    let mapped: String = backend
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    mapped.trim_matches('-').to_owned()
}

impl PayloadSink for FsSink {
    async fn store(&self, payload: &SerializedPayload) -> Result<(), RepositoryError> {
        let io_err = |e: std::io::Error| RepositoryError::Backend {
            name: payload.backend.clone(),
            operation: "store",
            reason: e.to_string(),
        };

        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let dir = self.root.join(backend_dir(&payload.backend));
        std::fs::create_dir_all(&dir).map_err(io_err)?;

        let name = format!("batch-{seq:05}.{}", payload.format.extension());
        std::fs::write(dir.join(&name), &payload.body).map_err(io_err)?;

        if let Some(context) = &payload.context {
            std::fs::write(dir.join(format!("batch-{seq:05}.context")), context)
                .map_err(io_err)?;
        }
        Ok(())
    }
}
