use serde::{Deserialize, Deserializer};

use super::legacy_receipt_model::LegacyReceiptModel;

/// The `receipt` object of a successful response, in whichever shape the
/// endpoint used. The current shape is recognised by its `in_app` field, the
/// legacy one by `bid`. An object with neither is an error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ReceiptPayloadModel {
    Current(ReceiptModel),
    Legacy(LegacyReceiptModel),
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptModel {
    /// The bundle identifier for the app to which the receipt belongs.
    pub(crate) bundle_id: Option<String>,
    /// The app's version number (CFBundleVersion).
    pub(crate) application_version: Option<String>,
    /// An array that contains the in-app purchase receipt fields for all
    /// in-app purchase transactions. Required, but `null` means no purchases.
    #[serde(deserialize_with = "deserialize_nullable_list")]
    pub(crate) in_app: Vec<InAppModel>,
    /// The version of the app that the user originally purchased.
    pub(crate) original_application_version: Option<String>,
}

fn deserialize_nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
#[derive(Debug, Deserialize)]
pub(crate) struct InAppModel {
    pub(crate) quantity: Option<String>,
    pub(crate) product_id: Option<String>,
    pub(crate) transaction_id: Option<String>,
    pub(crate) original_transaction_id: Option<String>,
    pub(crate) purchase_date: Option<String>,
    pub(crate) original_purchase_date: Option<String>,
    /// Only present for auto-renewable subscriptions.
    pub(crate) expires_date: Option<String>,
    pub(crate) app_item_id: Option<String>,
    pub(crate) version_external_identifier: Option<String>,
    /// Only present for auto-renewable subscriptions.
    pub(crate) web_order_line_item_id: Option<String>,
}
