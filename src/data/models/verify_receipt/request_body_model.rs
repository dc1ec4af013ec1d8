use serde::Serialize;

/// Body of a verifyReceipt request.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct RequestBodyModel<'a> {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
    /// The app's shared secret. Omitted entirely when not configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_receipt_data_as_only_field() {
        let body = RequestBodyModel {
            receipt_data: "MIIT...==",
            password: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"receipt-data":"MIIT...=="}"#
        );
    }

    #[test]
    fn includes_password_when_present() {
        let body = RequestBodyModel {
            receipt_data: "",
            password: Some("s3cret"),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "receipt-data": "", "password": "s3cret" })
        );
    }
}
