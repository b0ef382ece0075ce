//! Notifications emitted as a generation request moves through its states.
//!
//! Events stay transport agnostic. Sinks decide whether they become toasts,
//! WebSocket frames or log lines.

use serde::{Deserialize, Serialize};

use super::{
    Account, AccountId, Credits, GeneratedSite, GenerationOutcome, GenerationRequest,
    GenerationRequestId, Identity, PromptText,
};

/// Emitted as soon as a request enters `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStartedEvent {
    pub account_id: AccountId,
    pub identity: Identity,
    pub request_id: GenerationRequestId,
    pub prompt: PromptText,
}

/// Emitted once the site exists and the credit has been debited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSucceededEvent {
    pub account_id: AccountId,
    pub identity: Identity,
    pub request_id: GenerationRequestId,
    pub site: GeneratedSite,
    pub remaining_credits: Credits,
}

/// Emitted when an accepted request ends without a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationFailedEvent {
    pub account_id: AccountId,
    pub identity: Identity,
    pub request_id: GenerationRequestId,
    /// Human-readable cause.
    pub cause: String,
}

/// Generation lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationEvent {
    Started(GenerationStartedEvent),
    Succeeded(GenerationSucceededEvent),
    Failed(GenerationFailedEvent),
}

impl GenerationEvent {
    /// Build the `Started` event for a freshly accepted request.
    pub fn started(account: &Account, request: &GenerationRequest) -> Self {
        Self::Started(GenerationStartedEvent {
            account_id: *account.id(),
            identity: account.identity().clone(),
            request_id: request.id(),
            prompt: request.prompt().clone(),
        })
    }

    /// Build the terminal event matching `outcome`.
    pub fn resolved(account: &Account, outcome: &GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Succeeded {
                request_id,
                site,
                remaining_credits,
            } => Self::Succeeded(GenerationSucceededEvent {
                account_id: *account.id(),
                identity: account.identity().clone(),
                request_id: *request_id,
                site: site.clone(),
                remaining_credits: *remaining_credits,
            }),
            GenerationOutcome::Failed { request_id, cause } => {
                Self::Failed(GenerationFailedEvent {
                    account_id: *account.id(),
                    identity: account.identity().clone(),
                    request_id: *request_id,
                    cause: cause.clone(),
                })
            }
        }
    }

    /// Account the event concerns.
    pub fn account_id(&self) -> &AccountId {
        match self {
            Self::Started(event) => &event.account_id,
            Self::Succeeded(event) => &event.account_id,
            Self::Failed(event) => &event.account_id,
        }
    }

    /// Request the event concerns.
    pub fn request_id(&self) -> GenerationRequestId {
        match self {
            Self::Started(event) => event.request_id,
            Self::Succeeded(event) => event.request_id,
            Self::Failed(event) => event.request_id,
        }
    }

    /// Stable machine-readable kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Started(_) => "started",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    /// Short notification title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Started(_) => "Generation started!",
            Self::Succeeded(_) => "Website generated successfully!",
            Self::Failed(_) => "Generation failed",
        }
    }

    /// Longer notification body.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Started(_) => {
                "Your website is being created by AI. This usually takes 30-60 seconds."
            }
            Self::Succeeded(_) => "Your new website is ready. Redirecting to dashboard...",
            Self::Failed(_) => {
                "Something went wrong while generating your website. Please try again."
            }
        }
    }
}
