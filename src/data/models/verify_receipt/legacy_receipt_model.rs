use serde::Deserialize;

/// Flat, single-purchase receipt returned for transaction receipts created
/// before iOS 7.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyReceiptModel {
    /// Bundle identifier. Only present in this shape, so it is what tells the
    /// two shapes apart.
    pub(crate) bid: String,
    /// Bundle version string.
    pub(crate) bvrs: Option<String>,
    pub(crate) item_id: Option<String>,
    pub(crate) app_item_id: Option<String>,
    pub(crate) product_id: Option<String>,
    pub(crate) quantity: Option<String>,
    pub(crate) transaction_id: Option<String>,
    pub(crate) original_transaction_id: Option<String>,
    pub(crate) purchase_date: Option<String>,
    pub(crate) original_purchase_date: Option<String>,
    pub(crate) version_external_identifier: Option<String>,
    pub(crate) unique_identifier: Option<String>,
}
