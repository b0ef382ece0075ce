//! Domain-level error payload.
//!
//! Transport agnostic: adapters map the [`ErrorCode`] onto whatever envelope
//! they speak.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::SubmissionRejection;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The account lacks the credits the operation needs.
    PaymentRequired,
    /// The operation collides with work already in progress.
    Conflict,
    /// A collaborator is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use sitegen::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::conflict("busy");
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl DomainError {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::PaymentRequired`].
    pub fn payment_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PaymentRequired, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

impl From<SubmissionRejection> for DomainError {
    fn from(value: SubmissionRejection) -> Self {
        let message = value.to_string();
        match value {
            SubmissionRejection::EmptyPrompt => Self::invalid_request(message),
            SubmissionRejection::NoCreditsRemaining => Self::payment_required(message),
            SubmissionRejection::RequestAlreadyInFlight { request_id } => Self::conflict(message)
                .with_details(json!({
                    "requestId": request_id,
                    "code": "request_in_flight",
                })),
            SubmissionRejection::CreditStoreUnavailable { .. } => {
                Self::service_unavailable(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::GenerationRequestId;

    #[rstest]
    fn try_new_rejects_empty_messages() {
        let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
        assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
    }

    #[rstest]
    #[case(SubmissionRejection::EmptyPrompt, ErrorCode::InvalidRequest)]
    #[case(SubmissionRejection::NoCreditsRemaining, ErrorCode::PaymentRequired)]
    #[case(
        SubmissionRejection::CreditStoreUnavailable { message: "down".to_owned() },
        ErrorCode::ServiceUnavailable
    )]
    fn rejections_map_to_codes(#[case] rejection: SubmissionRejection, #[case] code: ErrorCode) {
        assert_eq!(DomainError::from(rejection).code(), code);
    }

    #[rstest]
    fn in_flight_rejection_carries_request_id() {
        let request_id = GenerationRequestId::random();
        let error = DomainError::from(SubmissionRejection::RequestAlreadyInFlight { request_id });

        assert_eq!(error.code(), ErrorCode::Conflict);
        let details = error.details().expect("details attached");
        assert_eq!(details["requestId"], request_id.to_string());
    }

    #[rstest]
    fn serialises_code_in_snake_case() {
        let json = serde_json::to_value(DomainError::payment_required("no credits remaining"))
            .expect("serialise");
        assert_eq!(json["code"], "payment_required");
        assert!(json.get("details").is_none());
    }
}
