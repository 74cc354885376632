use serde::Serialize;

use crate::models::{CandidateRecord, Score};
use crate::normalizer::NAME_PLACEHOLDER;

pub const EMPTY_FIELD: &str = "-";
pub const NO_SKILLS_PLACEHOLDER: &str = "Nenhuma skill informada.";
pub const DEFAULT_INITIAL: &str = "C";

/// Labelled, ready-to-render lines for one candidate.
///
/// Built at display time from a `CandidateRecord`; the percentage is derived
/// here from `match_ratio` and exists nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub name: String,
    pub initial: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
    pub role: Option<String>,
    pub city: Option<String>,
    pub summary: Option<String>,
    /// "86% match"; `None` when there is no score.
    pub match_badge: Option<String>,
    /// "Score (0–1): 0.86"
    pub score_line: Option<String>,
    /// "Similaridade: 0.82 • Cobertura: 0.67"
    pub metrics_line: Option<String>,
    /// Omitted when the backend did not send overlap skills at all.
    pub overlap_line: Option<String>,
    pub missing_line: Option<String>,
}

impl CandidateView {
    pub fn from_record(record: &CandidateRecord) -> Self {
        let score = record.score.as_ref();

        Self {
            name: record.name.clone(),
            initial: initial(record),
            email: or_dash(record.email.as_deref()),
            phone: or_dash(record.phone.as_deref()),
            skills: skills_line(&record.skills),
            experience: record
                .experience_years
                .map(|y| y.to_string())
                .unwrap_or_else(|| EMPTY_FIELD.to_string()),
            role: record.role.clone(),
            city: record.city.clone(),
            summary: record.summary.clone(),
            match_badge: score.map(|s| format!("{}% match", s.percentage())),
            score_line: score.map(|s| format!("Score (0–1): {:.2}", s.match_ratio)),
            metrics_line: score.map(metrics_line),
            overlap_line: score
                .and_then(|s| s.overlap_skills.as_deref())
                .map(|skills| format!("Skills em comum: {}", format_skill_list(skills))),
            missing_line: score
                .and_then(|s| s.missing_skills.as_deref())
                .map(|skills| format!("Skills faltantes: {}", format_skill_list(skills))),
        }
    }

    /// All lines in screen order, labels included, absent sections skipped.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Nome: {}", self.name)];
        if let Some(role) = &self.role {
            lines.push(format!("Cargo: {role}"));
        }
        lines.push(format!("Email: {}", self.email));
        lines.push(format!("Telefone: {}", self.phone));
        if let Some(city) = &self.city {
            lines.push(format!("Cidade: {city}"));
        }
        lines.push(format!("Skills: {}", self.skills));
        lines.push(format!("Anos de exp.: {}", self.experience));
        lines.extend(
            [
                &self.match_badge,
                &self.score_line,
                &self.metrics_line,
                &self.overlap_line,
                &self.missing_line,
                &self.summary,
            ]
            .into_iter()
            .flatten()
            .cloned(),
        );
        lines
    }
}

impl From<&CandidateRecord> for CandidateView {
    fn from(record: &CandidateRecord) -> Self {
        Self::from_record(record)
    }
}

/// Joined by ", ", or "-" for a present-but-empty list.
pub fn format_skill_list(skills: &[String]) -> String {
    if skills.is_empty() {
        EMPTY_FIELD.to_string()
    } else {
        skills.join(", ")
    }
}

fn skills_line(skills: &[String]) -> String {
    if skills.is_empty() {
        NO_SKILLS_PLACEHOLDER.to_string()
    } else {
        skills.join(", ")
    }
}

fn metrics_line(score: &Score) -> String {
    format!(
        "Similaridade: {} • Cobertura: {}",
        two_decimals(score.similarity),
        two_decimals(score.coverage)
    )
}

fn two_decimals(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| EMPTY_FIELD.to_string())
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_FIELD).to_string()
}

fn initial(record: &CandidateRecord) -> String {
    if record.name == NAME_PLACEHOLDER {
        return DEFAULT_INITIAL.to_string();
    }
    record
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| DEFAULT_INITIAL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawCandidate;
    use crate::normalizer::normalize;
    use serde_json::json;

    fn view(value: serde_json::Value) -> CandidateView {
        let raw: RawCandidate = serde_json::from_value(value).unwrap();
        CandidateView::from_record(&normalize(&raw))
    }

    #[test]
    fn test_scored_analysis_renders_all_score_lines() {
        let v = view(json!({
            "name": "ana souza",
            "skills": ["React", "SQL"],
            "score": {
                "match": 0.86,
                "similarity": 0.82,
                "coverage": 0.67,
                "overlap_skills": ["React"],
                "missing_skills": ["SQL"]
            }
        }));

        assert_eq!(v.initial, "A");
        assert_eq!(v.match_badge.as_deref(), Some("86% match"));
        assert_eq!(v.score_line.as_deref(), Some("Score (0–1): 0.86"));
        assert_eq!(
            v.metrics_line.as_deref(),
            Some("Similaridade: 0.82 • Cobertura: 0.67")
        );
        assert_eq!(v.overlap_line.as_deref(), Some("Skills em comum: React"));
        assert_eq!(v.missing_line.as_deref(), Some("Skills faltantes: SQL"));
    }

    #[test]
    fn test_unscored_candidate_has_no_score_lines() {
        let v = view(json!({ "name": "Bruno" }));
        assert!(v.match_badge.is_none());
        assert!(v.score_line.is_none());
        assert!(v.overlap_line.is_none());
        assert!(v.missing_line.is_none());
        assert!(!v.lines().iter().any(|l| l.contains('%')));
    }

    #[test]
    fn test_empty_skill_lists_render_dash_and_absent_lists_are_omitted() {
        let v = view(json!({
            "score": { "match": 0.5, "overlap_skills": [] }
        }));
        assert_eq!(v.overlap_line.as_deref(), Some("Skills em comum: -"));
        assert!(v.missing_line.is_none());
        assert_eq!(
            v.metrics_line.as_deref(),
            Some("Similaridade: - • Cobertura: -")
        );
    }

    #[test]
    fn test_placeholders_for_missing_identity_fields() {
        let v = view(json!({ "skills": [] }));
        assert_eq!(v.name, NAME_PLACEHOLDER);
        assert_eq!(v.initial, DEFAULT_INITIAL);
        assert_eq!(v.email, "-");
        assert_eq!(v.phone, "-");
        assert_eq!(v.experience, "-");
        assert_eq!(v.skills, NO_SKILLS_PLACEHOLDER);
    }

    #[test]
    fn test_experience_years_formatting() {
        assert_eq!(view(json!({ "experienceYears": 5 })).experience, "5");
        assert_eq!(view(json!({ "experienceYears": 2.5 })).experience, "2.5");
    }

    #[test]
    fn test_lines_include_optional_sections_in_order() {
        let v = view(json!({
            "name": "Carla",
            "role": "Dev Front-end",
            "city": "Recife",
            "match": 0.4
        }));
        let lines = v.lines();
        assert_eq!(lines[0], "Nome: Carla");
        assert_eq!(lines[1], "Cargo: Dev Front-end");
        assert!(lines.contains(&"Cidade: Recife".to_string()));
        assert!(lines.contains(&"40% match".to_string()));
    }
}
