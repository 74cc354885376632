use serde::{Deserialize, Serialize};

/// Job-side input for a match: the skills the job asks for and its free text.
/// Passed through to the backend unchanged; either half may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    pub target_skills: Vec<String>,
    pub target_text: String,
}

impl MatchContext {
    pub fn new(target_skills: Vec<String>, target_text: impl Into<String>) -> Self {
        Self {
            target_skills,
            target_text: target_text.into(),
        }
    }
}
