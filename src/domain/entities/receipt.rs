use serde::Serialize;

/// A receipt validated by the App Store, in the current multi-purchase shape.
///
/// All values are passed through exactly as returned by the verifyReceipt
/// endpoint. Dates and counts are left as strings; interpreting them is up to
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub bundle_id: String,
    pub application_version: String,
    pub original_application_version: String,
    /// In-app purchases contained in the receipt, in the order returned.
    pub in_app: Vec<PurchaseReceipt>,
}

/// A single in-app purchase transaction within a [`Receipt`].
///
/// Fields the endpoint omits (for example `expires_date` on a consumable) are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub quantity: String,
    pub product_id: String,
    pub transaction_id: String,
    pub original_transaction_id: String,
    pub purchase_date: String,
    pub original_purchase_date: String,
    pub expires_date: String,
    pub app_item_id: String,
    pub version_external_identifier: String,
    pub web_order_line_item_id: String,
}

/// A receipt in the older flat, single-purchase shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegacyReceipt {
    pub bundle_id: String,
    pub bundle_version: String,
    pub item_id: String,
    pub app_item_id: String,
    pub product_id: String,
    pub quantity: String,
    pub transaction_id: String,
    pub original_transaction_id: String,
    pub purchase_date: String,
    pub original_purchase_date: String,
    pub version_external_identifier: String,
    pub unique_identifier: String,
}

/// Either receipt shape, as detected from the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerifiedReceipt {
    Current(Receipt),
    Legacy(LegacyReceipt),
}

impl VerifiedReceipt {
    pub fn bundle_id(&self) -> &str {
        match self {
            VerifiedReceipt::Current(r) => &r.bundle_id,
            VerifiedReceipt::Legacy(r) => &r.bundle_id,
        }
    }
}
