//! Candidate Record Normalizer: maps any backend candidate shape into one
//! `CandidateRecord`.
//!
//! A freshly analysed résumé and a candidate fetched by id both come through
//! `normalize`, so the details view never cares where its data came from.
//! Missing fields are never an error here; they become placeholders at
//! display time (see `view`) or stay absent.

use tracing::debug;

use crate::models::{CandidateRecord, RawCandidate, RawScore, Score};

pub mod view;

pub use view::CandidateView;

/// Substituted when the backend could not identify a name.
pub const NAME_PLACEHOLDER: &str = "Nome não identificado";

/// Longest raw-text excerpt kept on a record, in characters.
pub const RAW_TEXT_PREVIEW_CHARS: usize = 280;

/// Builds the canonical record. Never fails.
pub fn normalize(raw: &RawCandidate) -> CandidateRecord {
    let score = resolve_score(raw);
    if score.is_none() {
        debug!(id = ?raw.id, "candidate has no numeric match ratio; score omitted");
    }

    CandidateRecord {
        id: clean(raw.id.as_deref()),
        name: clean(raw.name.as_deref()).unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
        email: clean(raw.email.as_deref()),
        phone: clean(raw.phone.as_deref()),
        skills: dedup_skills(raw.skills.as_deref().unwrap_or_default()),
        experience_years: raw.experience_years.filter(|y| *y >= 0.0),
        role: clean(raw.role.as_deref()),
        city: clean(raw.city.as_deref()),
        summary: clean(raw.summary.as_deref()).or_else(|| {
            raw.insights
                .as_ref()
                .and_then(|i| clean(i.summary.as_deref()))
        }),
        score,
        raw_text_preview: clean(raw.raw_text.as_deref()).map(|text| preview(&text)),
    }
}

/// Display percentage for a ratio: `round(ratio * 100)`, halves rounding up.
///
/// The product is snapped to 6 decimals first so that ratios such as 0.865,
/// whose binary form sits just under the half, still round up.
pub fn match_percentage(ratio: f64) -> u8 {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = (ratio * 100.0 * 1e6).round() / 1e6;
    (scaled + 0.5).floor() as u8
}

/// Trims, drops empties and duplicates, keeps first-seen order.
pub fn dedup_skills(skills: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim();
        if !skill.is_empty() && !out.iter().any(|s| s == skill) {
            out.push(skill.to_string());
        }
    }
    out
}

/// A score exists only when a numeric match ratio does: first the analysis
/// `score` block, then the list shape's top-level `match`.
fn resolve_score(raw: &RawCandidate) -> Option<Score> {
    let detail: Option<&RawScore> = raw.score.as_ref();
    let ratio = detail
        .and_then(|s| s.match_ratio)
        .or(raw.match_ratio)
        .and_then(unit_interval)?;
    let insights = raw.insights.as_ref();

    let overlap = detail
        .and_then(|s| s.overlap_skills.as_deref())
        .or_else(|| insights.and_then(|i| i.overlap_skills.as_deref()));
    let missing = detail
        .and_then(|s| s.missing_skills.as_deref())
        .or_else(|| insights.and_then(|i| i.missing_skills.as_deref()));

    Some(Score {
        match_ratio: ratio,
        similarity: detail.and_then(|s| s.similarity).and_then(unit_interval),
        coverage: detail.and_then(|s| s.coverage).and_then(unit_interval),
        overlap_skills: overlap.map(dedup_skills),
        missing_skills: missing.map(dedup_skills),
    })
}

fn unit_interval(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn preview(text: &str) -> String {
    text.chars().take(RAW_TEXT_PREVIEW_CHARS).collect()
}
