use std::time::Duration;

use crate::constants::{APPLE_PRODUCTION_VERIFY_RECEIPT_URL, APPLE_SANDBOX_VERIFY_RECEIPT_URL};

/// Settings for a receipt verifier instance.
///
/// The defaults target Apple's public endpoints with no request timeout
/// beyond the HTTP client's own and no shared secret.
#[derive(Clone)]
pub struct ReceiptVerifierConfig {
    pub production_url: String,
    pub sandbox_url: String,
    /// Applied to the whole request, including reading the response body.
    pub timeout: Option<Duration>,
    /// App-specific shared secret, sent as `password`. Only needed for
    /// receipts containing auto-renewable subscriptions.
    pub shared_secret: Option<String>,
}

impl Default for ReceiptVerifierConfig {
    fn default() -> Self {
        Self {
            production_url: APPLE_PRODUCTION_VERIFY_RECEIPT_URL.to_owned(),
            sandbox_url: APPLE_SANDBOX_VERIFY_RECEIPT_URL.to_owned(),
            timeout: None,
            shared_secret: None,
        }
    }
}

impl ReceiptVerifierConfig {
    pub fn with_urls(mut self, production_url: &str, sandbox_url: &str) -> Self {
        self.production_url = production_url.to_owned();
        self.sandbox_url = sandbox_url.to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_shared_secret(mut self, shared_secret: &str) -> Self {
        self.shared_secret = Some(shared_secret.to_owned());
        self
    }
}

// Hand-written so the shared secret never ends up in logs.
impl std::fmt::Debug for ReceiptVerifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptVerifierConfig")
            .field("production_url", &self.production_url)
            .field("sandbox_url", &self.sandbox_url)
            .field("timeout", &self.timeout)
            .field(
                "shared_secret",
                &self.shared_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
