use async_trait::async_trait;

use crate::{
    domain::entities::{
        environment::Environment,
        receipt::{Receipt, VerifiedReceipt},
    },
    errors::VerificationError,
};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Verifies a receipt against a single environment and returns it in the
    /// current multi-purchase shape. A legacy-shaped receipt is reported as a
    /// decode error.
    async fn verify_receipt(
        &self,
        receipt_data: &str,
        environment: Environment,
    ) -> Result<Receipt, VerificationError>;

    /// Same as [`ReceiptRepository::verify_receipt`], but accepts either
    /// receipt shape.
    async fn verify_receipt_any_shape(
        &self,
        receipt_data: &str,
        environment: Environment,
    ) -> Result<VerifiedReceipt, VerificationError>;
}
