//! Document Selector: wraps the platform file chooser.
//!
//! Dismissing the chooser is a normal outcome (`PickOutcome::Cancelled`),
//! not an error. Invalidating stale analysis results on a new pick is the
//! upload session's job, not the selector's.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SelectionError;
use crate::models::LocalDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(LocalDocument),
    Cancelled,
}

/// The platform file chooser, restricted to PDF documents.
#[async_trait]
pub trait DocumentPicker: Send + Sync {
    async fn pick(&self) -> Result<PickOutcome, SelectionError>;
}

/// How a picked file is handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickMode {
    /// Hand over the path; bytes are read when the request is sent.
    #[default]
    Locator,
    /// Read the bytes at pick time and hand over the blob.
    Inline,
}

/// Filesystem-backed chooser: the "selection" is a path supplied up front
/// (command line, OS share sheet). No path means the user cancelled.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentPicker {
    path: Option<PathBuf>,
    mode: PickMode,
}

impl FsDocumentPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            mode: PickMode::Locator,
        }
    }

    pub fn with_mode(mut self, mode: PickMode) -> Self {
        self.mode = mode;
        self
    }
}

#[async_trait]
impl DocumentPicker for FsDocumentPicker {
    async fn pick(&self) -> Result<PickOutcome, SelectionError> {
        let Some(path) = self.path.as_deref() else {
            debug!("no document chosen");
            return Ok(PickOutcome::Cancelled);
        };

        if !is_pdf(path) {
            return Err(SelectionError::UnsupportedType {
                path: path.to_path_buf(),
            });
        }

        let unreadable = |source| SelectionError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(unreadable(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        let name = path.file_name().and_then(|n| n.to_str());
        let document = match self.mode {
            PickMode::Locator => LocalDocument::from_locator(name, path),
            PickMode::Inline => {
                let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
                LocalDocument::from_blob(name, bytes)
            }
        };

        debug!(file = document.name(), mode = ?self.mode, "document picked");
        Ok(PickOutcome::Picked(document))
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
