use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    config::ReceiptVerifierConfig,
    data::{
        datasources::verify_receipt_datasource::VerifyReceiptDatasourceImpl,
        repositories::receipt_repository_impl::ReceiptRepositoryImpl,
    },
    domain::{
        entities::{
            environment::Environment,
            receipt::{Receipt, VerifiedReceipt},
            verification_status::VerificationStatus,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::VerificationError,
};

pub struct ReceiptVerifierUtil<R: ReceiptRepository> {
    receipt_repository: R,
}

impl<R: ReceiptRepository> ReceiptVerifierUtil<R> {
    /// Wraps a custom repository, e.g. a stub for tests in downstream crates.
    pub fn with_repository(receipt_repository: R) -> Self {
        Self { receipt_repository }
    }

    /// Given base64-encoded receipt data, verifies it against either the
    /// sandbox (`use_sandbox` true) or the production endpoint. Returns the
    /// receipt if the endpoint reports status 0, or an error otherwise.
    ///
    /// No fallback between environments is attempted; see
    /// [`Self::verify_receipt_with_environment_fallback`].
    pub async fn verify_receipt(
        &self,
        receipt_data: &str,
        use_sandbox: bool,
    ) -> Result<Receipt, VerificationError> {
        self.receipt_repository
            .verify_receipt(receipt_data, Environment::from_sandbox_flag(use_sandbox))
            .await
    }

    /// Like [`Self::verify_receipt`], but also accepts the flat legacy receipt
    /// shape.
    pub async fn verify_receipt_any_shape(
        &self,
        receipt_data: &str,
        use_sandbox: bool,
    ) -> Result<VerifiedReceipt, VerificationError> {
        self.receipt_repository
            .verify_receipt_any_shape(receipt_data, Environment::from_sandbox_flag(use_sandbox))
            .await
    }

    /// Base64-encodes raw receipt bytes (as read from the app's receipt file)
    /// before verifying them.
    pub async fn verify_receipt_bytes(
        &self,
        receipt: &[u8],
        use_sandbox: bool,
    ) -> Result<Receipt, VerificationError> {
        self.verify_receipt(&STANDARD.encode(receipt), use_sandbox)
            .await
    }

    /// Verifies against production first and, if the endpoint reports a
    /// sandbox receipt (21007), once more against the sandbox. Any other
    /// outcome of the first attempt is returned as-is.
    pub async fn verify_receipt_with_environment_fallback(
        &self,
        receipt_data: &str,
    ) -> Result<Receipt, VerificationError> {
        let environment = Environment::Production;
        match self
            .receipt_repository
            .verify_receipt(receipt_data, environment)
            .await
        {
            Err(VerificationError::Rejected(VerificationStatus::SandboxReceiptOnProduction)) => {
                tracing::debug!("sandbox receipt sent to production, retrying against sandbox");
                self.receipt_repository
                    .verify_receipt(receipt_data, environment.other())
                    .await
            }
            result => result,
        }
    }
}

impl ReceiptVerifierUtil<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl>> {
    pub fn new(config: ReceiptVerifierConfig) -> Result<Self, VerificationError> {
        Ok(Self {
            receipt_repository: ReceiptRepositoryImpl::new(config)?,
        })
    }
}
