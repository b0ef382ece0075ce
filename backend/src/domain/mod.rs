//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities of credit-gated site
//! generation and the services that drive them. Types are immutable where
//! possible and document their invariants and serde contracts in Rustdoc.
//!
//! Public surface:
//! - Account, AccountId, Identity: the session-provided account reference.
//! - Credits: non-negative generation entitlement.
//! - PromptText, PROMPT_SUGGESTIONS: validated prompts and curated examples.
//! - GenerationRequest, GenerationStatus, GenerationOutcome: request state.
//! - GenerationLifecycle: admission and resolution of requests.
//! - ProjectCatalogue, ProjectListing: dashboard read model.
//! - DomainError, ErrorCode: transport-agnostic error payload.

pub mod account;
pub mod credits;
pub mod error;
pub mod generation;
pub mod generation_events;
pub mod generation_lifecycle;
pub mod in_flight;
pub mod ports;
pub mod project_catalogue;
pub mod projects;
pub mod prompt;
pub mod rejection;

pub use self::account::{Account, AccountId, AccountValidationError, Email, Identity};
pub use self::credits::Credits;
pub use self::error::{DomainError, ErrorCode, ErrorValidationError};
pub use self::generation::{
    GeneratedSite, GenerationJob, GenerationOutcome, GenerationRequest, GenerationRequestId,
    GenerationStatus, InvalidTransition,
};
pub use self::generation_events::{
    GenerationEvent, GenerationFailedEvent, GenerationStartedEvent, GenerationSucceededEvent,
};
pub use self::generation_lifecycle::{GenerationLifecycle, PendingGeneration};
pub use self::in_flight::InFlightRegistry;
pub use self::project_catalogue::ProjectCatalogue;
pub use self::projects::{Project, ProjectId, ProjectListing, ProjectStats, ProjectStatus};
pub use self::prompt::{PROMPT_SUGGESTIONS, PromptText, PromptValidationError};
pub use self::rejection::SubmissionRejection;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use sitegen::domain::{DomainError, DomainResult};
///
/// fn top_up(amount: u32) -> DomainResult<u32> {
///     if amount == 0 {
///         return Err(DomainError::invalid_request("top-up amount must be positive"));
///     }
///     Ok(amount)
/// }
///
/// assert!(top_up(0).is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
