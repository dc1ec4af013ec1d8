use crate::config::ReceiptVerifierConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Receipts issued while testing (Xcode, TestFlight, sandbox accounts).
    Sandbox,
    /// Receipts issued by the live App Store.
    Production,
}

impl Environment {
    pub fn from_sandbox_flag(use_sandbox: bool) -> Self {
        if use_sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    /// The other environment, used when the endpoint reports that a receipt
    /// was sent to the wrong one.
    pub fn other(self) -> Self {
        match self {
            Environment::Sandbox => Environment::Production,
            Environment::Production => Environment::Sandbox,
        }
    }

    pub(crate) fn verify_receipt_url(self, config: &ReceiptVerifierConfig) -> &str {
        match self {
            Environment::Sandbox => &config.sandbox_url,
            Environment::Production => &config.production_url,
        }
    }
}
