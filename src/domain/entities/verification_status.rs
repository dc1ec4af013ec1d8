/// Failure status reported by the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationStatus {
    /// 21000
    UnreadableJson,
    /// 21002
    MalformedData,
    /// 21003
    AuthenticationError,
    /// 21004
    UnmatchedSecret,
    /// 21005
    ServerUnavailable,
    /// 21006
    SubscriptionExpired,
    /// 21007
    SandboxReceiptOnProduction,
    /// 21008
    ProductionReceiptOnSandbox,
    /// 21009
    InternalDataAccess,
    /// 21010
    AccountNotFound,

    Unknown(i64),
}

pub const UNREADABLE_JSON: i64 = 21000;
pub const MALFORMED_DATA: i64 = 21002;
pub const AUTHENTICATION_ERROR: i64 = 21003;
pub const UNMATCHED_SECRET: i64 = 21004;
pub const SERVER_UNAVAILABLE: i64 = 21005;
pub const SUBSCRIPTION_EXPIRED: i64 = 21006;
pub const SANDBOX_RECEIPT_ON_PRODUCTION: i64 = 21007;
pub const PRODUCTION_RECEIPT_ON_SANDBOX: i64 = 21008;
pub const INTERNAL_DATA_ACCESS: i64 = 21009;
pub const ACCOUNT_NOT_FOUND: i64 = 21010;

impl VerificationStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            UNREADABLE_JSON => Self::UnreadableJson,
            MALFORMED_DATA => Self::MalformedData,
            AUTHENTICATION_ERROR => Self::AuthenticationError,
            UNMATCHED_SECRET => Self::UnmatchedSecret,
            SERVER_UNAVAILABLE => Self::ServerUnavailable,
            SUBSCRIPTION_EXPIRED => Self::SubscriptionExpired,
            SANDBOX_RECEIPT_ON_PRODUCTION => Self::SandboxReceiptOnProduction,
            PRODUCTION_RECEIPT_ON_SANDBOX => Self::ProductionReceiptOnSandbox,
            INTERNAL_DATA_ACCESS => Self::InternalDataAccess,
            ACCOUNT_NOT_FOUND => Self::AccountNotFound,
            other => Self::Unknown(other),
        }
    }

    /// The numeric status code as returned by the endpoint.
    pub fn code(&self) -> i64 {
        match self {
            Self::UnreadableJson => UNREADABLE_JSON,
            Self::MalformedData => MALFORMED_DATA,
            Self::AuthenticationError => AUTHENTICATION_ERROR,
            Self::UnmatchedSecret => UNMATCHED_SECRET,
            Self::ServerUnavailable => SERVER_UNAVAILABLE,
            Self::SubscriptionExpired => SUBSCRIPTION_EXPIRED,
            Self::SandboxReceiptOnProduction => SANDBOX_RECEIPT_ON_PRODUCTION,
            Self::ProductionReceiptOnSandbox => PRODUCTION_RECEIPT_ON_SANDBOX,
            Self::InternalDataAccess => INTERNAL_DATA_ACCESS,
            Self::AccountNotFound => ACCOUNT_NOT_FOUND,
            Self::Unknown(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UnreadableJson => "The App Store could not read the JSON object you provided.",
            Self::MalformedData => "The data in the receipt-data property was malformed.",
            Self::AuthenticationError => "The receipt could not be authenticated.",
            Self::UnmatchedSecret => {
                "The shared secret you provided does not match the shared secret on file for your account."
            }
            Self::ServerUnavailable => "The receipt server is not currently available.",
            Self::SubscriptionExpired => {
                "This receipt is valid but the subscription has expired. When this status code is returned to your server, the receipt data is also decoded and returned as part of the response."
            }
            Self::SandboxReceiptOnProduction => {
                "This receipt is a sandbox receipt, but it was sent to the production service for verification."
            }
            Self::ProductionReceiptOnSandbox => {
                "This receipt is a production receipt, but it was sent to the sandbox service for verification."
            }
            Self::InternalDataAccess => "Internal data access error. Try again later.",
            Self::AccountNotFound => "The user account cannot be found or has been deleted.",
            Self::Unknown(_) => "An unknown error occurred.",
        }
    }

    /// True for 21007 and 21008, where the same receipt should be retried
    /// against the other environment's endpoint.
    pub fn is_environment_mismatch(&self) -> bool {
        matches!(
            self,
            Self::SandboxReceiptOnProduction | Self::ProductionReceiptOnSandbox
        )
    }
}
