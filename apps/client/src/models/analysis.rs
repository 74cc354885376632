//! Wire shapes returned by the scoring/candidate backend.
//!
//! Every field is optional and decoded leniently: a field with an unexpected
//! JSON type decodes as absent instead of failing the whole response. Making
//! sense of what is present is the normalizer's job.

use serde::Deserialize;

/// Response of `POST /parse-resume`. Same shape as a stored candidate.
pub type AnalysisResult = RawCandidate;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCandidate {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Option<Vec<String>>,
    #[serde(
        default,
        rename = "experienceYears",
        alias = "experience_years",
        deserialize_with = "lenient::number"
    )]
    pub experience_years: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    /// Top-level ratio used by the candidate list shape.
    #[serde(default, rename = "match", deserialize_with = "lenient::number")]
    pub match_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub score: Option<RawScore>,
    #[serde(
        default,
        rename = "iaResult",
        alias = "ia_result",
        deserialize_with = "lenient::object"
    )]
    pub insights: Option<RawInsights>,
    #[serde(
        default,
        rename = "raw_text",
        alias = "rawTextPreview",
        deserialize_with = "lenient::string"
    )]
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawScore {
    #[serde(default, rename = "match", deserialize_with = "lenient::number")]
    pub match_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub similarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub coverage: Option<f64>,
    #[serde(default, alias = "overlapSkills", deserialize_with = "lenient::string_list")]
    pub overlap_skills: Option<Vec<String>>,
    #[serde(default, alias = "missingSkills", deserialize_with = "lenient::string_list")]
    pub missing_skills: Option<Vec<String>>,
}

/// The `iaResult` block attached to stored candidates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawInsights {
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub overlap_skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub missing_skills: Option<Vec<String>>,
}

/// Response of `GET /candidates`. Entries that are not JSON objects are
/// skipped; the rest of the list still loads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateList {
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub items: Option<Vec<RawCandidate>>,
}

impl CandidateList {
    pub fn into_items(self) -> Vec<RawCandidate> {
        self.items.unwrap_or_default()
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::warn;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .filter(|n| n.is_finite()))
    }

    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(items.into_iter().filter_map(scalar_to_string).collect()),
            _ => None,
        })
    }

    pub fn object_list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let Value::Array(values) = Value::deserialize(d)? else {
            return Ok(None);
        };
        let total = values.len();
        let items: Vec<T> = values
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
        if items.len() < total {
            warn!(skipped = total - items.len(), total, "skipped malformed list entries");
        }
        Ok(Some(items))
    }

    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(d)?;
        if !value.is_object() {
            return Ok(None);
        }
        Ok(serde_json::from_value(value).ok())
    }

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_resume_response_decodes() {
        let raw: AnalysisResult = serde_json::from_value(json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "phone": null,
            "skills": ["React", "SQL"],
            "experienceYears": 4,
            "score": {
                "match": 0.86,
                "similarity": 0.82,
                "coverage": 0.67,
                "overlap_skills": ["React"],
                "missing_skills": ["SQL"]
            }
        }))
        .unwrap();

        assert_eq!(raw.name.as_deref(), Some("Ana Souza"));
        assert_eq!(raw.phone, None);
        assert_eq!(raw.experience_years, Some(4.0));
        let score = raw.score.unwrap();
        assert_eq!(score.match_ratio, Some(0.86));
        assert_eq!(score.overlap_skills, Some(vec!["React".to_string()]));
    }

    #[test]
    fn test_empty_object_decodes_to_all_absent() {
        let raw: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(raw, RawCandidate::default());
    }

    #[test]
    fn test_null_body_is_rejected() {
        assert!(serde_json::from_str::<AnalysisResult>("null").is_err());
    }

    #[test]
    fn test_wrong_types_decode_as_absent() {
        let raw: RawCandidate = serde_json::from_value(json!({
            "id": 42,
            "name": {"first": "Ana"},
            "skills": "React, SQL",
            "score": [0.5],
            "match": "0.75",
            "experienceYears": true
        }))
        .unwrap();

        assert_eq!(raw.id.as_deref(), Some("42"));
        assert_eq!(raw.name, None);
        assert_eq!(raw.skills, None);
        assert_eq!(raw.score, None);
        assert_eq!(raw.match_ratio, None);
        assert_eq!(raw.experience_years, None);
    }

    #[test]
    fn test_list_shape_with_insights() {
        let list: CandidateList = serde_json::from_value(json!({
            "items": [{
                "id": "c-1",
                "name": "Bruno",
                "match": 0.5,
                "iaResult": {
                    "summary": "Perfil back-end",
                    "overlap_skills": ["SQL"],
                    "missing_skills": []
                }
            }]
        }))
        .unwrap();

        let items = list.into_items();
        assert_eq!(items.len(), 1);
        let insights = items[0].insights.as_ref().unwrap();
        assert_eq!(insights.summary.as_deref(), Some("Perfil back-end"));
        assert_eq!(insights.missing_skills, Some(vec![]));
    }

    #[test]
    fn test_numeric_strings_are_not_numbers() {
        let raw: RawCandidate = serde_json::from_value(json!({
            "score": { "match": "0.75", "similarity": 0.5 },
            "experienceYears": "4"
        }))
        .unwrap();

        let score = raw.score.unwrap();
        assert_eq!(score.match_ratio, None);
        assert_eq!(score.similarity, Some(0.5));
        assert_eq!(raw.experience_years, None);
    }

    #[test]
    fn test_non_object_list_entries_are_skipped() {
        let list: CandidateList = serde_json::from_str(
            r#"{"items": [{"id": 1, "name": "Ana"}, null, "Bruno", 3, [], {"id": "c-2"}]}"#,
        )
        .unwrap();

        let items = list.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.as_deref(), Some("Ana"));
        assert_eq!(items[1].id.as_deref(), Some("c-2"));
    }

    #[test]
    fn test_missing_or_null_items_is_empty_list() {
        let list: CandidateList = serde_json::from_str("{}").unwrap();
        assert!(list.into_items().is_empty());

        let list: CandidateList = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(list.into_items().is_empty());
    }
}
