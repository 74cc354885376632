use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{CandidateRecord, LocalDocument};

/// Discriminant of `UploadState`, for observers that only need the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Submitting,
    Analyzed,
    Failed,
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UploadPhase::Idle => "idle",
            UploadPhase::FileSelected => "file_selected",
            UploadPhase::Submitting => "submitting",
            UploadPhase::Analyzed => "analyzed",
            UploadPhase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// A failed submission as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Generic, user-facing text.
    pub message: String,
    /// Diagnostic cause; logged, never displayed.
    pub cause: String,
    /// Resubmitting the same document may succeed. When false the user has
    /// to pick the file again.
    pub retryable: bool,
}

/// The single source of truth for the upload screen.
///
/// The selected document lives in exactly one variant at a time, so there is
/// no separate "current file" to fall out of sync.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    FileSelected {
        document: LocalDocument,
    },
    Submitting {
        document: LocalDocument,
        submission_id: Uuid,
    },
    Analyzed {
        file_name: String,
        record: CandidateRecord,
        analyzed_at: DateTime<Utc>,
    },
    /// Keeps the document so the user can retry without picking again,
    /// when `failure.retryable` allows it.
    Failed {
        document: LocalDocument,
        failure: Failure,
    },
}

impl UploadState {
    pub fn phase(&self) -> UploadPhase {
        match self {
            UploadState::Idle => UploadPhase::Idle,
            UploadState::FileSelected { .. } => UploadPhase::FileSelected,
            UploadState::Submitting { .. } => UploadPhase::Submitting,
            UploadState::Analyzed { .. } => UploadPhase::Analyzed,
            UploadState::Failed { .. } => UploadPhase::Failed,
        }
    }

    pub fn document(&self) -> Option<&LocalDocument> {
        match self {
            UploadState::FileSelected { document }
            | UploadState::Submitting { document, .. }
            | UploadState::Failed { document, .. } => Some(document),
            UploadState::Idle | UploadState::Analyzed { .. } => None,
        }
    }

    /// Name of the file the screen should show as selected or analysed.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            UploadState::Analyzed { file_name, .. } => Some(file_name),
            other => other.document().map(LocalDocument::name),
        }
    }

    pub fn record(&self) -> Option<&CandidateRecord> {
        match self {
            UploadState::Analyzed { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            UploadState::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// A submit from here would send a document.
    pub fn can_submit(&self) -> bool {
        match self {
            UploadState::FileSelected { .. } => true,
            UploadState::Failed { failure, .. } => failure.retryable,
            _ => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, UploadState::Submitting { .. })
    }
}
