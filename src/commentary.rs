//! Post-game commentary
//!
//! An external text generator may comment on a finished run. The core only
//! hands out one request per game over and never waits for the answer; the
//! host runs the generator however it likes and falls back to fixed text.

use thiserror::Error;

/// Shown when no commentary could be produced
pub const FALLBACK_COMMENTARY: &str = "What a roll! Catch your breath and go again.";

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("commentary generator is not configured")]
    NotConfigured,
    #[error("commentary request failed: {0}")]
    Failed(String),
    #[error("commentary generator returned no text")]
    Empty,
}

/// Something that can write a line about a finished run
pub trait CommentaryGenerator {
    fn generate(&self, score: u64, high_score: u64) -> Result<String, CommentaryError>;
}

/// One game over's worth of commentary to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentaryRequest {
    /// Run number the request belongs to
    pub run: u32,
    pub score: u64,
    pub high_score: u64,
}

/// Ensures at most one request per run. A request waits until the host takes it.
#[derive(Debug, Clone, Default)]
pub struct CommentaryQueue {
    pending: Option<CommentaryRequest>,
    last_run: Option<u32>,
}

impl CommentaryQueue {
    /// Queue a request unless this run already had one
    pub fn request(&mut self, request: CommentaryRequest) -> bool {
        if self.last_run == Some(request.run) {
            return false;
        }
        self.last_run = Some(request.run);
        self.pending = Some(request);
        true
    }

    /// Hand the pending request to the host
    pub fn take(&mut self) -> Option<CommentaryRequest> {
        self.pending.take()
    }
}

/// Run the generator, degrading to the fallback text on any failure
pub fn commentary_or_fallback(
    generator: Option<&dyn CommentaryGenerator>,
    request: &CommentaryRequest,
) -> String {
    let result = generator
        .ok_or(CommentaryError::NotConfigured)
        .and_then(|g| g.generate(request.score, request.high_score))
        .and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(CommentaryError::Empty)
            } else {
                Ok(text.to_string())
            }
        });

    match result {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Using fallback commentary: {}", e);
            FALLBACK_COMMENTARY.to_string()
        }
    }
}
