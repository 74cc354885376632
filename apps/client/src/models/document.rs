use std::path::{Path, PathBuf};

use bytes::Bytes;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
/// Sent when the chooser did not report a file name.
pub const DEFAULT_FILE_NAME: &str = "curriculo.pdf";

/// Where the document's bytes live.
///
/// Browser-hosted pickers hand over the bytes themselves; native pickers hand
/// over a location that the transport reads at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Blob(Bytes),
    Locator(PathBuf),
}

/// A document chosen by the user, always a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDocument {
    name: String,
    source: DocumentSource,
}

impl LocalDocument {
    pub fn from_blob(name: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: file_name_or_default(name),
            source: DocumentSource::Blob(bytes.into()),
        }
    }

    pub fn from_locator(name: Option<&str>, locator: impl Into<PathBuf>) -> Self {
        Self {
            name: file_name_or_default(name),
            source: DocumentSource::Locator(locator.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }

    pub fn locator(&self) -> Option<&Path> {
        match &self.source {
            DocumentSource::Locator(path) => Some(path),
            DocumentSource::Blob(_) => None,
        }
    }
}

fn file_name_or_default(name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string()
}
