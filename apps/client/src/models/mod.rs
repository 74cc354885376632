pub mod analysis;
pub mod candidate;
pub mod context;
pub mod document;

pub use analysis::{AnalysisResult, CandidateList, RawCandidate, RawInsights, RawScore};
pub use candidate::{CandidateRecord, Score};
pub use context::MatchContext;
pub use document::{DocumentSource, LocalDocument, DEFAULT_FILE_NAME, PDF_MEDIA_TYPE};
