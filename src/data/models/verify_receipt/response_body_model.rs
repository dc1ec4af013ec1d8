use serde::{de::Error as _, Deserialize, Deserializer};

/// Body of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// The receipt is kept as raw JSON here and only decoded into a typed model
/// once the status is known to be zero, so that a rejected response never
/// fails on (or exposes) its receipt payload.
#[derive(Debug, Deserialize)]
pub struct ResponseBodyModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error. Accepted as an integer or an integral float (`21007.0`).
    #[serde(deserialize_with = "deserialize_status")]
    pub(crate) status: i64,
    /// A JSON representation of the receipt that was sent for verification.
    pub(crate) receipt: Option<serde_json::Value>,
}

fn deserialize_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStatus {
        Integer(i64),
        Float(f64),
    }

    match RawStatus::deserialize(deserializer)? {
        RawStatus::Integer(code) => Ok(code),
        RawStatus::Float(code) if code.fract() == 0.0 && code.abs() <= i64::MAX as f64 => {
            Ok(code as i64)
        }
        RawStatus::Float(code) => Err(D::Error::custom(format!(
            "status {code} is not an integer"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_status_without_receipt() {
        let m: ResponseBodyModel = serde_json::from_str(r#"{"status":21008}"#).unwrap();
        assert_eq!(m.status, 21008);
        assert!(m.receipt.is_none());
    }

    #[test]
    fn decodes_float_encoded_status() {
        let m: ResponseBodyModel = serde_json::from_str(r#"{"status":21007.0}"#).unwrap();
        assert_eq!(m.status, 21007);
        let m: ResponseBodyModel = serde_json::from_str(r#"{"status":0.0}"#).unwrap();
        assert_eq!(m.status, 0);
    }

    #[test]
    fn fractional_or_string_status_is_an_error() {
        assert!(serde_json::from_str::<ResponseBodyModel>(r#"{"status":21007.5}"#).is_err());
        assert!(serde_json::from_str::<ResponseBodyModel>(r#"{"status":"0"}"#).is_err());
    }

    #[test]
    fn missing_status_is_an_error() {
        assert!(serde_json::from_str::<ResponseBodyModel>(r#"{"receipt":{}}"#).is_err());
    }

    #[test]
    fn html_body_is_an_error() {
        assert!(
            serde_json::from_str::<ResponseBodyModel>("<html>internal server error</html>")
                .is_err()
        );
    }
}
