//! Synchronous reasons a generation submission is refused.

use super::GenerationRequestId;

/// Local validation rejection returned by `submit`.
///
/// None of these are retried automatically; each is cleared by caller action
/// (fix the prompt, top up credits, or wait for the in-flight request).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionRejection {
    /// Prompt was empty or whitespace only.
    #[error("prompt must not be empty")]
    EmptyPrompt,
    /// The account has no credits left.
    #[error("no credits remaining")]
    NoCreditsRemaining,
    /// Another request for the account is still pending.
    #[error("generation request {request_id} is still pending")]
    RequestAlreadyInFlight {
        /// Request holding the account's in-flight token.
        request_id: GenerationRequestId,
    },
    /// The balance could not be read from the credit store.
    #[error("credit balance unavailable: {message}")]
    CreditStoreUnavailable {
        /// Store-provided detail.
        message: String,
    },
}

impl SubmissionRejection {
    /// Short notification title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "Describe your website",
            Self::NoCreditsRemaining => "No credits remaining",
            Self::RequestAlreadyInFlight { .. } => "Generation in progress",
            Self::CreditStoreUnavailable { .. } => "Credits unavailable",
        }
    }

    /// Longer notification body.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "Tell us what you want to build before generating.",
            Self::NoCreditsRemaining => {
                "Purchase more credits to continue generating websites."
            }
            Self::RequestAlreadyInFlight { .. } => {
                "Your current website is still being generated. Please wait for it to finish."
            }
            Self::CreditStoreUnavailable { .. } => {
                "We could not check your credit balance. Please try again shortly."
            }
        }
    }
}
