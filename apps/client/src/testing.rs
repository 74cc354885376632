//! Shared test doubles: an in-process fake backend and scripted collaborators.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::encoder::MultipartPayload;
use crate::errors::{GatewayError, SelectionError};
use crate::gateway::ScoringGateway;
use crate::models::{AnalysisResult, RawCandidate};
use crate::selector::{DocumentPicker, PickOutcome};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Scenario A response of the scoring service.
pub fn scenario_a_analysis() -> Value {
    json!({
        "name": "Ana Souza",
        "email": "ana.souza@example.com",
        "phone": "+55 11 99999-0000",
        "skills": ["React", "TypeScript"],
        "experienceYears": 4,
        "score": {
            "match": 0.86,
            "similarity": 0.82,
            "coverage": 0.67,
            "overlap_skills": ["React"],
            "missing_skills": ["SQL"]
        }
    })
}

#[derive(Debug, Clone)]
pub struct CapturedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// What the fake `/parse-resume` endpoint saw on the wire.
#[derive(Debug, Clone, Default)]
pub struct CapturedUpload {
    pub requests: Arc<Mutex<Vec<(Option<String>, Vec<CapturedPart>)>>>,
}

impl CapturedUpload {
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> (Option<String>, Vec<CapturedPart>) {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

pub async fn capture_upload(
    State(captured): State<CapturedUpload>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let part_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        parts.push(CapturedPart {
            name,
            file_name,
            content_type: part_type,
            data,
        });
    }

    captured
        .requests
        .lock()
        .unwrap()
        .push((content_type, parts));
    Json(scenario_a_analysis())
}

/// Picker that replays a fixed script of outcomes, then cancels.
#[derive(Default)]
pub struct ScriptedPicker {
    outcomes: Mutex<VecDeque<Result<PickOutcome, SelectionError>>>,
}

impl ScriptedPicker {
    pub fn new(outcomes: Vec<Result<PickOutcome, SelectionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl DocumentPicker for ScriptedPicker {
    async fn pick(&self) -> Result<PickOutcome, SelectionError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PickOutcome::Cancelled))
    }
}

/// Gateway that replays scripted submit results and records payloads.
/// With a gate set, `submit` parks until the gate is notified.
#[derive(Default)]
pub struct ScriptedGateway {
    pub submissions: Mutex<Vec<MultipartPayload>>,
    results: Mutex<VecDeque<Result<AnalysisResult, GatewayError>>>,
    candidates: Mutex<Vec<RawCandidate>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedGateway {
    pub fn new(results: Vec<Result<AnalysisResult, GatewayError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            ..Default::default()
        }
    }

    pub fn gated(results: Vec<Result<AnalysisResult, GatewayError>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(results)
        }
    }

    pub fn with_candidates(candidates: Vec<RawCandidate>) -> Self {
        Self {
            candidates: Mutex::new(candidates),
            ..Default::default()
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl ScoringGateway for ScriptedGateway {
    async fn submit(&self, payload: MultipartPayload) -> Result<AnalysisResult, GatewayError> {
        self.submissions.lock().unwrap().push(payload);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AnalysisResult::default()))
    }

    async fn list_candidates(&self) -> Result<Vec<RawCandidate>, GatewayError> {
        Ok(self.candidates.lock().unwrap().clone())
    }

    async fn get_candidate(&self, id: &str) -> Result<RawCandidate, GatewayError> {
        self.candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned()
            .ok_or(GatewayError::Status {
                status: 404,
                body: "not found".to_string(),
            })
    }
}
