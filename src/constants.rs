/// App Store verifyReceipt endpoint for receipts issued in the sandbox
/// environment (TestFlight, Xcode, sandbox testers).
pub const APPLE_SANDBOX_VERIFY_RECEIPT_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

/// App Store verifyReceipt endpoint for receipts issued in production.
pub const APPLE_PRODUCTION_VERIFY_RECEIPT_URL: &str =
    "https://buy.itunes.apple.com/verifyReceipt";
