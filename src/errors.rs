use thiserror::Error;

use crate::domain::entities::verification_status::VerificationStatus;

/// Errors returned when verifying a receipt.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The receipt data could not be encoded into the request body. Nothing
    /// was sent.
    #[error("failed to serialize verifyReceipt request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The callout could not be sent, or its response body could not be read.
    #[error("verifyReceipt callout failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON, or did not have the expected shape.
    #[error("failed to parse verifyReceipt response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The endpoint responded with a non-zero status.
    #[error("{} (status {})", .0.message(), .0.code())]
    Rejected(VerificationStatus),
}

impl VerificationError {
    /// Status code reported by the endpoint, if the endpoint rejected the
    /// receipt.
    pub fn code(&self) -> Option<i64> {
        match self {
            VerificationError::Rejected(status) => Some(status.code()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<VerificationStatus> {
        match self {
            VerificationError::Rejected(status) => Some(*status),
            _ => None,
        }
    }

    pub fn is_environment_mismatch(&self) -> bool {
        self.status()
            .is_some_and(|status| status.is_environment_mismatch())
    }
}
