//! Generation request entity and its state machine.
//!
//! ```text
//! Idle --accept--> Pending --success--> Succeeded
//!                  Pending --failure--> Failed
//! ```
//!
//! `Succeeded` and `Failed` are terminal. A request is discarded once it
//! reaches either of them; only the [`GenerationOutcome`] travels outward.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Credits, PromptText};

/// Identifier assigned to each accepted generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationRequestId(Uuid);

impl GenerationRequestId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GenerationRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle state of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// No request in flight.
    Idle,
    /// Accepted and waiting on the generation backend.
    Pending,
    /// Backend produced a site and a credit was debited.
    Succeeded,
    /// Backend failed; no credit was consumed.
    Failed,
}

impl GenerationStatus {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transition is allowed.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Whether `next` is reachable from `self` in one step.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Pending)
                | (Self::Pending, Self::Succeeded)
                | (Self::Pending, Self::Failed)
        )
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected state change on a [`GenerationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("generation request cannot move from {from} to {to}")]
pub struct InvalidTransition {
    /// State the request was in.
    pub from: GenerationStatus,
    /// State that was requested.
    pub to: GenerationStatus,
}

/// One user-initiated attempt to produce a website from a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    id: GenerationRequestId,
    account_id: AccountId,
    prompt: PromptText,
    status: GenerationStatus,
    submitted_at: DateTime<Utc>,
}

impl GenerationRequest {
    /// Create an accepted request, already in [`GenerationStatus::Pending`].
    pub fn pending(
        id: GenerationRequestId,
        account_id: AccountId,
        prompt: PromptText,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            prompt,
            status: GenerationStatus::Pending,
            submitted_at,
        }
    }

    /// Request identifier.
    pub fn id(&self) -> GenerationRequestId {
        self.id
    }

    /// Owning account.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Validated prompt.
    pub fn prompt(&self) -> &PromptText {
        &self.prompt
    }

    /// Current state.
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Submission timestamp.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Move to `next`, refusing anything the state machine does not allow.
    pub fn transition(&mut self, next: GenerationStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Work item handed to the generation backend.
    pub fn job(&self) -> GenerationJob {
        GenerationJob {
            request_id: self.id,
            account_id: self.account_id,
            prompt: self.prompt.clone(),
        }
    }
}

/// Payload sent to the generation backend for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJob {
    /// Request being served.
    pub request_id: GenerationRequestId,
    /// Owning account.
    pub account_id: AccountId,
    /// What to build.
    pub prompt: PromptText,
}

/// Site produced by a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSite {
    /// Project name derived by the backend.
    pub name: String,
    /// Preview or published location, when the backend provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Terminal result of an accepted generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// The backend produced a site and one credit was debited.
    #[serde(rename_all = "camelCase")]
    Succeeded {
        /// Request that finished.
        request_id: GenerationRequestId,
        /// Produced site.
        site: GeneratedSite,
        /// Balance after the debit.
        remaining_credits: Credits,
    },
    /// The request failed; credits are untouched.
    #[serde(rename_all = "camelCase")]
    Failed {
        /// Request that finished.
        request_id: GenerationRequestId,
        /// Human-readable cause.
        cause: String,
    },
}

impl GenerationOutcome {
    /// Request this outcome belongs to.
    pub fn request_id(&self) -> GenerationRequestId {
        match self {
            Self::Succeeded { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }

    /// Terminal status reached.
    pub fn status(&self) -> GenerationStatus {
        match self {
            Self::Succeeded { .. } => GenerationStatus::Succeeded,
            Self::Failed { .. } => GenerationStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn request() -> GenerationRequest {
        let submitted_at = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .expect("valid timestamp");
        GenerationRequest::pending(
            GenerationRequestId::random(),
            AccountId::random(),
            PromptText::new("A bakery site").expect("valid prompt"),
            submitted_at,
        )
    }

    #[rstest]
    #[case(GenerationStatus::Succeeded)]
    #[case(GenerationStatus::Failed)]
    fn pending_requests_reach_either_terminal_state(
        mut request: GenerationRequest,
        #[case] terminal: GenerationStatus,
    ) {
        request.transition(terminal).expect("pending may resolve");
        assert_eq!(request.status(), terminal);
        assert!(request.status().is_terminal());
    }

    #[rstest]
    #[case(GenerationStatus::Succeeded, GenerationStatus::Failed)]
    #[case(GenerationStatus::Failed, GenerationStatus::Succeeded)]
    #[case(GenerationStatus::Succeeded, GenerationStatus::Pending)]
    #[case(GenerationStatus::Failed, GenerationStatus::Idle)]
    fn terminal_states_are_final(
        mut request: GenerationRequest,
        #[case] terminal: GenerationStatus,
        #[case] next: GenerationStatus,
    ) {
        request.transition(terminal).expect("pending may resolve");
        let err = request.transition(next).expect_err("terminal states are final");
        assert_eq!(err, InvalidTransition { from: terminal, to: next });
        assert_eq!(request.status(), terminal);
    }

    #[rstest]
    fn pending_cannot_return_to_idle(mut request: GenerationRequest) {
        assert!(request.transition(GenerationStatus::Idle).is_err());
        assert_eq!(request.status(), GenerationStatus::Pending);
    }

    #[rstest]
    fn job_carries_request_identity(request: GenerationRequest) {
        let job = request.job();
        assert_eq!(job.request_id, request.id());
        assert_eq!(&job.account_id, request.account_id());
        assert_eq!(job.prompt.as_ref(), "A bakery site");
    }

    #[rstest]
    fn failed_outcome_serialises_with_status_tag() {
        let request_id = GenerationRequestId::random();
        let outcome = GenerationOutcome::Failed {
            request_id,
            cause: "backend timed out".to_owned(),
        };
        let json = serde_json::to_value(&outcome).expect("serialise");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["cause"], "backend timed out");
        assert_eq!(json["requestId"], request_id.to_string());
    }
}
