//! Transfer Encoder: builds the three-part upload payload.
//!
//! The payload is transport-agnostic: it never decides the outer
//! `Content-Type` or boundary, and a locator-backed document stays a
//! reference until the gateway resolves it at send time.

use std::path::PathBuf;

use bytes::Bytes;
use tracing::debug;

use crate::errors::EncodeError;
use crate::models::{DocumentSource, LocalDocument, MatchContext, PDF_MEDIA_TYPE};

pub const FILE_FIELD: &str = "file";
pub const JOB_SKILLS_FIELD: &str = "job_skills";
pub const JOB_TEXT_FIELD: &str = "job_text";

/// The binary part of the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePart {
    /// Bytes already in memory, attached directly under the original name.
    Blob { file_name: String, bytes: Bytes },
    /// A location the transport must read before sending.
    Reference {
        locator: PathBuf,
        file_name: String,
        media_type: &'static str,
    },
}

impl FilePart {
    pub fn file_name(&self) -> &str {
        match self {
            FilePart::Blob { file_name, .. } | FilePart::Reference { file_name, .. } => file_name,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            FilePart::Blob { .. } => PDF_MEDIA_TYPE,
            FilePart::Reference { media_type, .. } => media_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    file: FilePart,
    job_skills: String,
    job_text: String,
}

impl MultipartPayload {
    pub fn file(&self) -> &FilePart {
        &self.file
    }

    /// JSON array of the target skills, in caller order.
    pub fn job_skills(&self) -> &str {
        &self.job_skills
    }

    pub fn job_text(&self) -> &str {
        &self.job_text
    }

    pub fn part_names(&self) -> [&'static str; 3] {
        [FILE_FIELD, JOB_SKILLS_FIELD, JOB_TEXT_FIELD]
    }

    pub fn into_parts(self) -> (FilePart, String, String) {
        (self.file, self.job_skills, self.job_text)
    }
}

pub fn encode(
    document: &LocalDocument,
    context: &MatchContext,
) -> Result<MultipartPayload, EncodeError> {
    let file_name = document.name().to_string();
    let file = match document.source() {
        DocumentSource::Blob(bytes) => FilePart::Blob {
            file_name,
            bytes: bytes.clone(),
        },
        DocumentSource::Locator(path) => FilePart::Reference {
            locator: path.clone(),
            file_name,
            media_type: document.media_type(),
        },
    };

    let job_skills = serde_json::to_string(&context.target_skills)?;

    debug!(
        file = file.file_name(),
        inline = matches!(file, FilePart::Blob { .. }),
        skills = context.target_skills.len(),
        "encoded upload payload"
    );

    Ok(MultipartPayload {
        file,
        job_skills,
        job_text: context.target_text.clone(),
    })
}
