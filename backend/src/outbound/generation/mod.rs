//! Simulated generation engine.
//!
//! No AI backend exists yet. This adapter waits a fixed latency and then
//! either produces a site named after the prompt or fails with a configured
//! cause, which is enough to drive the lifecycle end to end.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{GenerationBackend, GenerationBackendError};
use crate::domain::{GeneratedSite, GenerationJob};

/// Number of prompt words used to name a generated site.
const SITE_NAME_WORDS: usize = 4;

/// Generation backend that sleeps and then resolves deterministically.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGenerationBackend {
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedGenerationBackend {
    /// Backend that succeeds after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    /// Make every job fail with `cause` once the latency has elapsed.
    pub fn failing_with(mut self, cause: impl Into<String>) -> Self {
        self.failure = Some(cause.into());
        self
    }

    /// Configured latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

/// Latency in whole milliseconds, saturating at `u64::MAX`.
fn latency_millis(latency: Duration) -> u64 {
    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)
}

/// Title-case the leading words of a prompt.
fn site_name(prompt: &str) -> String {
    prompt
        .split_whitespace()
        .take(SITE_NAME_WORDS)
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl GenerationBackend for SimulatedGenerationBackend {
    async fn generate(&self, job: &GenerationJob) -> Result<GeneratedSite, GenerationBackendError> {
        debug!(
            request_id = %job.request_id,
            latency_ms = latency_millis(self.latency),
            "simulating generation"
        );
        tokio::time::sleep(self.latency).await;

        if let Some(cause) = &self.failure {
            warn!(request_id = %job.request_id, %cause, "simulated generation failed");
            return Err(GenerationBackendError::failed(cause.clone()));
        }

        Ok(GeneratedSite {
            name: site_name(job.prompt.as_ref()),
            url: None,
        })
    }
}
