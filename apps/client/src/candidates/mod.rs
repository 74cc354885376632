//! Candidate directory: the list and details screens' view of `/candidates`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::GatewayError;
use crate::gateway::ScoringGateway;
use crate::models::CandidateRecord;
use crate::normalizer::normalize;

pub const EMPTY_DIRECTORY_MESSAGE: &str = "Nenhum candidato ainda";

pub struct CandidateDirectory {
    gateway: Arc<dyn ScoringGateway>,
    candidates: Vec<CandidateRecord>,
    loaded: bool,
}

impl CandidateDirectory {
    pub fn new(gateway: Arc<dyn ScoringGateway>) -> Self {
        Self {
            gateway,
            candidates: Vec::new(),
            loaded: false,
        }
    }

    /// Fetches and normalizes the full list. On failure the previously
    /// loaded list is kept.
    pub async fn load(&mut self) -> Result<&[CandidateRecord], GatewayError> {
        let raw = match self.gateway.list_candidates().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, kept = self.candidates.len(), "failed to load candidates");
                return Err(e);
            }
        };

        self.candidates = raw.iter().map(normalize).collect();
        self.loaded = true;
        info!(count = self.candidates.len(), "candidates loaded");
        Ok(&self.candidates)
    }

    /// Pull-to-refresh.
    pub async fn refresh(&mut self) -> Result<&[CandidateRecord], GatewayError> {
        self.load().await
    }

    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Empty-state text, only once a load has actually returned nothing.
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.loaded && self.candidates.is_empty()).then_some(EMPTY_DIRECTORY_MESSAGE)
    }

    pub async fn details(&self, id: &str) -> Result<CandidateRecord, GatewayError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(GatewayError::InvalidEndpoint("empty candidate id".to_string()));
        }

        let raw = self.gateway.get_candidate(id).await.map_err(|e| {
            if e.is_not_found() {
                info!(id, "candidate not found");
            } else {
                warn!(id, error = %e, "failed to fetch candidate");
            }
            e
        })?;
        Ok(normalize(&raw))
    }
}
