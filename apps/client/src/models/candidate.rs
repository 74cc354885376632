use serde::{Deserialize, Serialize};

/// Compatibility between a candidate and a job context.
/// `match_ratio` is always within [0, 1]; the display percentage is derived
/// from it on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "match")]
    pub match_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_skills: Option<Vec<String>>,
}

impl Score {
    pub fn percentage(&self) -> u8 {
        crate::normalizer::match_percentage(self.match_ratio)
    }
}

/// Canonical, display-safe candidate. Built only by `normalizer::normalize`,
/// whether the source was a fresh analysis or a stored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// Absent for results that only exist in the upload flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Deduplicated, first-seen order.
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub summary: Option<String>,
    pub score: Option<Score>,
    pub raw_text_preview: Option<String>,
}

impl CandidateRecord {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn match_percentage(&self) -> Option<u8> {
        self.score.as_ref().map(Score::percentage)
    }
}
