//! Driven port for the engine that turns prompts into websites.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{GeneratedSite, GenerationJob};

define_port_error! {
    /// Errors surfaced by the generation backend.
    pub enum GenerationBackendError {
        /// The backend ran the job and could not produce a site.
        Failed { cause: String } => "{cause}",
        /// The backend could not be reached.
        Unavailable { message: String } => "generation backend unavailable: {message}",
    }
}

/// Produces a website for an accepted generation request.
///
/// Implementations resolve at most once per job and report no partial
/// progress. The lifecycle enforces no timeout; an adapter that needs one
/// applies it itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run the job to completion.
    async fn generate(&self, job: &GenerationJob) -> Result<GeneratedSite, GenerationBackendError>;
}

/// Backend double that succeeds immediately, naming the site after the
/// prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGenerationBackend;

#[async_trait]
impl GenerationBackend for FixtureGenerationBackend {
    async fn generate(&self, job: &GenerationJob) -> Result<GeneratedSite, GenerationBackendError> {
        Ok(GeneratedSite {
            name: job.prompt.to_string(),
            url: None,
        })
    }
}
