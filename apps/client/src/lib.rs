//! TalentVision client: résumé upload and candidate match scoring.
//!
//! The upload pipeline runs selector → encoder → gateway → normalizer, driven
//! by `upload::UploadSession`. `candidates::CandidateDirectory` serves the
//! list and details screens through the same gateway and normalizer.

pub mod candidates;
pub mod config;
pub mod encoder;
pub mod errors;
pub mod gateway;
pub mod jobs;
pub mod models;
pub mod normalizer;
pub mod selector;
pub mod upload;

#[cfg(test)]
mod testing;

pub use candidates::CandidateDirectory;
pub use config::Config;
pub use errors::{EncodeError, GatewayError, SelectionError, UploadError};
pub use gateway::{HttpScoringGateway, ScoringGateway};
pub use models::{CandidateRecord, LocalDocument, MatchContext};
pub use normalizer::{normalize, CandidateView};
pub use selector::{DocumentPicker, FsDocumentPicker, PickMode, PickOutcome};
pub use upload::{UploadPhase, UploadSession, UploadState};
