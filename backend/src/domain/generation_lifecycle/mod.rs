//! Credit-gated generation request lifecycle.
//!
//! The lifecycle owns admission and resolution of generation requests:
//! - admission checks the prompt, then claims the per-account in-flight
//!   token, then reads the credit balance while holding it;
//! - an accepted request is `Pending` and resolves on its own Tokio task;
//! - exactly one credit is debited when the backend succeeds, none on
//!   failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::ports::{CreditStore, CreditStoreError, GenerationBackend, NotificationSink};
use crate::domain::{
    Account, AccountId, GeneratedSite, GenerationEvent, GenerationOutcome, GenerationRequest,
    GenerationRequestId, GenerationStatus, InFlightRegistry, PromptText, SubmissionRejection,
};

/// Cause reported when the backend task dies before resolving.
const BACKEND_CRASHED: &str = "generation backend crashed";

/// Domain service driving generation requests from submission to outcome.
pub struct GenerationLifecycle<B, C, N> {
    backend: Arc<B>,
    credits: Arc<C>,
    notifications: Arc<N>,
    in_flight: Arc<InFlightRegistry>,
    clock: Arc<dyn Clock>,
}

impl<B, C, N> GenerationLifecycle<B, C, N> {
    /// Create a lifecycle with its own in-flight registry.
    pub fn new(
        backend: Arc<B>,
        credits: Arc<C>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            credits,
            notifications,
            in_flight: Arc::new(InFlightRegistry::new()),
            clock,
        }
    }

    /// Share `registry` with other lifecycles.
    ///
    /// Sessions that share a registry serialise requests per account between
    /// them.
    pub fn with_in_flight_registry(mut self, registry: Arc<InFlightRegistry>) -> Self {
        self.in_flight = registry;
        self
    }

    /// Registry tracking pending requests.
    pub fn in_flight_registry(&self) -> &Arc<InFlightRegistry> {
        &self.in_flight
    }

    /// `Pending` while the account has a request in flight, `Idle` otherwise.
    ///
    /// Terminal requests are discarded, so neither terminal state is ever
    /// reported here; callers learn about them from the outcome.
    pub fn status(&self, account_id: &AccountId) -> GenerationStatus {
        match self.in_flight.in_flight(account_id) {
            Some(_) => GenerationStatus::Pending,
            None => GenerationStatus::Idle,
        }
    }

    /// Request currently pending for the account.
    pub fn in_flight_request(&self, account_id: &AccountId) -> Option<GenerationRequestId> {
        self.in_flight.in_flight(account_id)
    }
}

impl<B, C, N> GenerationLifecycle<B, C, N>
where
    B: GenerationBackend + 'static,
    C: CreditStore + 'static,
    N: NotificationSink + 'static,
{
    /// Submit a prompt on behalf of `account`.
    ///
    /// Rejections are synchronous and leave no trace: no state changes, no
    /// notification. The in-flight slot is claimed before the balance is read,
    /// so two submissions for one account can never both pass the credit
    /// check; a rejection after the claim releases it again. On acceptance the request is `Pending`, the `Started`
    /// notification has been delivered, and resolution runs in the
    /// background.
    ///
    /// # Errors
    ///
    /// - [`SubmissionRejection::EmptyPrompt`] for blank prompts, whatever the
    ///   balance.
    /// - [`SubmissionRejection::RequestAlreadyInFlight`] while an earlier
    ///   request for the account is pending, without reading the balance.
    /// - [`SubmissionRejection::NoCreditsRemaining`] when the balance is zero
    ///   or the store does not know the account.
    /// - [`SubmissionRejection::CreditStoreUnavailable`] when the balance
    ///   cannot be read.
    pub async fn submit(
        &self,
        prompt: &str,
        account: &Account,
    ) -> Result<PendingGeneration, SubmissionRejection> {
        let prompt = PromptText::new(prompt).map_err(|_| SubmissionRejection::EmptyPrompt)?;
        let account_id = *account.id();

        let request_id = GenerationRequestId::random();
        self.in_flight
            .try_acquire(account_id, request_id)
            .map_err(|existing| {
                info!(%account_id, in_flight = %existing, "generation refused: request in flight");
                SubmissionRejection::RequestAlreadyInFlight {
                    request_id: existing,
                }
            })?;
        // Held across the balance read; an early return frees the slot.
        let token = InFlightToken {
            registry: Arc::clone(&self.in_flight),
            account_id,
            request_id,
        };

        let balance = self
            .credits
            .balance(&account_id)
            .await
            .map_err(map_balance_error)?;
        if balance.is_exhausted() {
            info!(%account_id, "generation refused: no credits remaining");
            return Err(SubmissionRejection::NoCreditsRemaining);
        }

        let request = GenerationRequest::pending(request_id, account_id, prompt, self.clock.utc());
        let submitted_at = request.submitted_at();
        info!(
            %account_id,
            %request_id,
            balance = balance.get(),
            prompt_chars = request.prompt().char_count(),
            "generation request pending"
        );
        self.notifications
            .notify(GenerationEvent::started(account, &request))
            .await;

        let resolution = Resolution {
            backend: Arc::clone(&self.backend),
            credits: Arc::clone(&self.credits),
            notifications: Arc::clone(&self.notifications),
            account: account.clone(),
        };
        let handle = tokio::spawn(resolution.run(request, token));

        Ok(PendingGeneration {
            request_id,
            account_id,
            submitted_at,
            handle,
        })
    }
}

fn map_balance_error(error: CreditStoreError) -> SubmissionRejection {
    match error {
        CreditStoreError::UnknownAccount { .. } | CreditStoreError::Insufficient { .. } => {
            SubmissionRejection::NoCreditsRemaining
        }
        CreditStoreError::Unavailable { message } => {
            warn!(%message, "credit balance unavailable");
            SubmissionRejection::CreditStoreUnavailable { message }
        }
    }
}

/// Handle on an accepted request.
#[derive(Debug)]
pub struct PendingGeneration {
    request_id: GenerationRequestId,
    account_id: AccountId,
    submitted_at: DateTime<Utc>,
    handle: JoinHandle<GenerationOutcome>,
}

impl PendingGeneration {
    /// Identifier of the accepted request.
    pub fn request_id(&self) -> GenerationRequestId {
        self.request_id
    }

    /// Owning account.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// When the request was accepted.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Wait for the terminal outcome.
    pub async fn outcome(self) -> GenerationOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(request_id = %self.request_id, error = %err, "resolution task aborted");
                GenerationOutcome::Failed {
                    request_id: self.request_id,
                    cause: BACKEND_CRASHED.to_owned(),
                }
            }
        }
    }
}

/// Holds an account's in-flight slot and frees it when dropped.
struct InFlightToken {
    registry: Arc<InFlightRegistry>,
    account_id: AccountId,
    request_id: GenerationRequestId,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        self.registry.release(&self.account_id, self.request_id);
    }
}

/// Everything the background task needs to resolve one request.
struct Resolution<B, C, N> {
    backend: Arc<B>,
    credits: Arc<C>,
    notifications: Arc<N>,
    account: Account,
}

impl<B, C, N> Resolution<B, C, N>
where
    B: GenerationBackend + 'static,
    C: CreditStore + 'static,
    N: NotificationSink + 'static,
{
    async fn run(self, mut request: GenerationRequest, token: InFlightToken) -> GenerationOutcome {
        let outcome = match self.generate(&request).await {
            Ok(site) => self.settle(&request, site).await,
            Err(cause) => GenerationOutcome::Failed {
                request_id: request.id(),
                cause,
            },
        };

        if let Err(err) = request.transition(outcome.status()) {
            error!(request_id = %request.id(), error = %err, "generation request state corrupted");
        }
        drop(token);

        match &outcome {
            GenerationOutcome::Succeeded {
                remaining_credits, ..
            } => info!(
                account_id = %request.account_id(),
                request_id = %request.id(),
                remaining = remaining_credits.get(),
                "generation succeeded"
            ),
            GenerationOutcome::Failed { cause, .. } => warn!(
                account_id = %request.account_id(),
                request_id = %request.id(),
                %cause,
                "generation failed"
            ),
        }

        self.notifications
            .notify(GenerationEvent::resolved(&self.account, &outcome))
            .await;
        outcome
    }

    /// Run the backend on its own task so a panic becomes a failure.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedSite, String> {
        let backend = Arc::clone(&self.backend);
        let job = request.job();
        match tokio::spawn(async move { backend.generate(&job).await }).await {
            Ok(result) => result.map_err(|err| err.to_string()),
            Err(err) => {
                error!(request_id = %request.id(), error = %err, "generation backend task died");
                Err(BACKEND_CRASHED.to_owned())
            }
        }
    }

    /// Debit the credit for a produced site.
    async fn settle(&self, request: &GenerationRequest, site: GeneratedSite) -> GenerationOutcome {
        match self.credits.debit_one(request.account_id()).await {
            Ok(remaining_credits) => GenerationOutcome::Succeeded {
                request_id: request.id(),
                site,
                remaining_credits,
            },
            Err(err) => {
                warn!(
                    account_id = %request.account_id(),
                    request_id = %request.id(),
                    error = %err,
                    "credit debit refused after generation"
                );
                GenerationOutcome::Failed {
                    request_id: request.id(),
                    cause: format!("credit debit failed: {err}"),
                }
            }
        }
    }
}
