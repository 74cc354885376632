//! Job postings as match context for résumé submissions.
//!
//! Postings are kept client-side only; nothing here talks to the backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::MatchContext;

pub const DEFAULT_SENIORITY: &str = "Não informada";
pub const DEFAULT_OPENINGS: u32 = 1;
pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha pelo menos título, empresa e local.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobDraftError {
    #[error("job draft is missing required fields: {0:?}")]
    MissingFields(Vec<&'static str>),
}

impl JobDraftError {
    pub fn user_message(&self) -> &'static str {
        REQUIRED_FIELDS_MESSAGE
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub seniority: String,
    /// Comma-separated, e.g. "React, TypeScript, SQL".
    pub skills_input: String,
    pub openings: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub seniority: String,
    pub skills: Vec<String>,
    pub openings: u32,
}

impl JobDraft {
    /// Validates the draft and assigns a local id.
    pub fn into_posting(self) -> Result<JobPosting, JobDraftError> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(JobDraftError::MissingFields(missing));
        }

        let seniority = match self.seniority.trim() {
            "" => DEFAULT_SENIORITY.to_string(),
            s => s.to_string(),
        };

        Ok(JobPosting {
            id: format!("local-{}", Uuid::new_v4()),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            seniority,
            skills: parse_skills_input(&self.skills_input),
            openings: parse_openings(&self.openings),
        })
    }
}

impl JobPosting {
    /// Context sent with a résumé to score it against this posting.
    pub fn match_context(&self) -> MatchContext {
        let text = format!(
            "{}\n{}\n{}\nSenioridade: {}",
            self.title, self.company, self.location, self.seniority
        );
        MatchContext::new(self.skills.clone(), text)
    }

    pub fn openings_label(&self) -> String {
        if self.openings == 1 {
            "1 vaga aberta".to_string()
        } else {
            format!("{} vagas abertas", self.openings)
        }
    }
}

/// Splits on commas, trims, drops empties. Order is kept.
pub fn parse_skills_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Leading digits only ("3 vagas" is 3); anything else falls back to one.
fn parse_openings(input: &str) -> u32 {
    let digits: String = input.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(DEFAULT_OPENINGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> JobDraft {
        JobDraft {
            title: "Desenvolvedor(a) Front-end".to_string(),
            company: "Acme".to_string(),
            location: "Remoto".to_string(),
            seniority: String::new(),
            skills_input: "React, TypeScript , ,SQL".to_string(),
            openings: "abc".to_string(),
        }
    }

    #[test]
    fn test_parse_skills_input() {
        assert_eq!(parse_skills_input("React, TypeScript , ,SQL"), ["React", "TypeScript", "SQL"]);
        assert!(parse_skills_input("  , ,").is_empty());
        assert!(parse_skills_input("").is_empty());
    }

    #[test]
    fn test_defaults_applied() {
        let job = draft().into_posting().unwrap();
        assert_eq!(job.seniority, "Não informada");
        assert_eq!(job.openings, 1);
        assert!(job.id.starts_with("local-"));
        assert_eq!(job.openings_label(), "1 vaga aberta");
    }

    #[test]
    fn test_openings_parsing() {
        assert_eq!(parse_openings("3"), 3);
        assert_eq!(parse_openings(" 12 vagas"), 12);
        assert_eq!(parse_openings("0"), 0);
        assert_eq!(parse_openings("-2"), 1);
        assert_eq!(parse_openings(""), 1);
    }

    #[test]
    fn test_missing_required_fields() {
        let err = JobDraft {
            company: "  ".to_string(),
            location: String::new(),
            ..draft()
        }
        .into_posting()
        .unwrap_err();

        assert_eq!(err, JobDraftError::MissingFields(vec!["company", "location"]));
        assert_eq!(err.user_message(), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_match_context_carries_skills_in_order() {
        let job = JobDraft {
            seniority: "Pleno".to_string(),
            openings: "2".to_string(),
            ..draft()
        }
        .into_posting()
        .unwrap();

        let ctx = job.match_context();
        assert_eq!(ctx.target_skills, ["React", "TypeScript", "SQL"]);
        assert!(ctx.target_text.contains("Desenvolvedor(a) Front-end"));
        assert!(ctx.target_text.contains("Senioridade: Pleno"));
        assert_eq!(job.openings_label(), "2 vagas abertas");
    }
}
