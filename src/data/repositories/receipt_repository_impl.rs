use async_trait::async_trait;
use serde::de::Error as _;

use crate::{
    config::ReceiptVerifierConfig,
    data::{
        datasources::verify_receipt_datasource::{
            VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
        },
        models::verify_receipt::{
            legacy_receipt_model::LegacyReceiptModel,
            receipt_model::{InAppModel, ReceiptModel, ReceiptPayloadModel},
            response_body_model::ResponseBodyModel,
        },
    },
    domain::{
        entities::{
            environment::Environment,
            receipt::{LegacyReceipt, PurchaseReceipt, Receipt, VerifiedReceipt},
            verification_status::VerificationStatus,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::VerificationError,
};

pub struct ReceiptRepositoryImpl<D: VerifyReceiptDatasource> {
    verify_receipt_datasource: D,
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<D> {
    async fn verify_receipt(
        &self,
        receipt_data: &str,
        environment: Environment,
    ) -> Result<Receipt, VerificationError> {
        match self.verify_receipt_any_shape(receipt_data, environment).await? {
            VerifiedReceipt::Current(receipt) => Ok(receipt),
            VerifiedReceipt::Legacy(_) => {
                tracing::warn!(?environment, "verifyReceipt returned a legacy receipt");
                Err(VerificationError::Decode(serde_json::Error::missing_field(
                    "in_app",
                )))
            }
        }
    }

    async fn verify_receipt_any_shape(
        &self,
        receipt_data: &str,
        environment: Environment,
    ) -> Result<VerifiedReceipt, VerificationError> {
        let response = self
            .verify_receipt_datasource
            .verify_receipt(receipt_data, environment)
            .await?;
        VerifiedReceipt::from_response(response, environment)
    }
}

impl ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl> {
    pub(crate) fn new(config: ReceiptVerifierConfig) -> Result<Self, VerificationError> {
        Ok(Self {
            verify_receipt_datasource: VerifyReceiptDatasourceImpl::new(config)?,
        })
    }
}

impl VerifiedReceipt {
    fn from_response(
        m: ResponseBodyModel,
        environment: Environment,
    ) -> Result<Self, VerificationError> {
        tracing::debug!(status = m.status, ?environment, "verifyReceipt responded");
        if m.status != 0 {
            // Whatever receipt came with a rejection is dropped unread.
            let status = VerificationStatus::from_code(m.status);
            tracing::debug!(
                code = status.code(),
                reason = status.message(),
                ?environment,
                "receipt rejected by verifyReceipt"
            );
            return Err(VerificationError::Rejected(status));
        }
        let receipt = m
            .receipt
            .ok_or_else(|| VerificationError::Decode(serde_json::Error::missing_field("receipt")))?;
        let payload: ReceiptPayloadModel =
            serde_json::from_value(receipt).map_err(VerificationError::Decode)?;
        Ok(match payload {
            ReceiptPayloadModel::Current(r) => VerifiedReceipt::Current(r.into()),
            ReceiptPayloadModel::Legacy(r) => VerifiedReceipt::Legacy(r.into()),
        })
    }
}

impl From<ReceiptModel> for Receipt {
    fn from(m: ReceiptModel) -> Self {
        Receipt {
            bundle_id: m.bundle_id.unwrap_or_default(),
            application_version: m.application_version.unwrap_or_default(),
            original_application_version: m.original_application_version.unwrap_or_default(),
            in_app: m.in_app.into_iter().map(PurchaseReceipt::from).collect(),
        }
    }
}

impl From<InAppModel> for PurchaseReceipt {
    fn from(m: InAppModel) -> Self {
        PurchaseReceipt {
            quantity: m.quantity.unwrap_or_default(),
            product_id: m.product_id.unwrap_or_default(),
            transaction_id: m.transaction_id.unwrap_or_default(),
            original_transaction_id: m.original_transaction_id.unwrap_or_default(),
            purchase_date: m.purchase_date.unwrap_or_default(),
            original_purchase_date: m.original_purchase_date.unwrap_or_default(),
            expires_date: m.expires_date.unwrap_or_default(),
            app_item_id: m.app_item_id.unwrap_or_default(),
            version_external_identifier: m.version_external_identifier.unwrap_or_default(),
            web_order_line_item_id: m.web_order_line_item_id.unwrap_or_default(),
        }
    }
}

impl From<LegacyReceiptModel> for LegacyReceipt {
    fn from(m: LegacyReceiptModel) -> Self {
        LegacyReceipt {
            bundle_id: m.bid,
            bundle_version: m.bvrs.unwrap_or_default(),
            item_id: m.item_id.unwrap_or_default(),
            app_item_id: m.app_item_id.unwrap_or_default(),
            product_id: m.product_id.unwrap_or_default(),
            quantity: m.quantity.unwrap_or_default(),
            transaction_id: m.transaction_id.unwrap_or_default(),
            original_transaction_id: m.original_transaction_id.unwrap_or_default(),
            purchase_date: m.purchase_date.unwrap_or_default(),
            original_purchase_date: m.original_purchase_date.unwrap_or_default(),
            version_external_identifier: m.version_external_identifier.unwrap_or_default(),
            unique_identifier: m.unique_identifier.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    /// Returns a canned response body and records which environments were
    /// asked for.
    struct FakeDatasource {
        body: serde_json::Value,
        calls: Mutex<Vec<(String, Environment)>>,
    }

    impl FakeDatasource {
        fn new(body: serde_json::Value) -> Self {
            Self {
                body,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VerifyReceiptDatasource for FakeDatasource {
        async fn verify_receipt(
            &self,
            receipt_data: &str,
            environment: Environment,
        ) -> Result<ResponseBodyModel, VerificationError> {
            self.calls
                .lock()
                .unwrap()
                .push((receipt_data.to_owned(), environment));
            serde_json::from_value(self.body.clone()).map_err(VerificationError::Decode)
        }
    }

    fn repository(body: serde_json::Value) -> ReceiptRepositoryImpl<FakeDatasource> {
        ReceiptRepositoryImpl {
            verify_receipt_datasource: FakeDatasource::new(body),
        }
    }

    #[tokio::test]
    async fn status_zero_returns_fields_verbatim() {
        let repo = repository(serde_json::json!({
            "status": 0,
            "receipt": {
                "bundle_id": "com.example.app",
                "application_version": "1.0",
                "original_application_version": "0.9",
                "in_app": [
                    {
                        "quantity": "1",
                        "product_id": "com.example.app.monthly",
                        "transaction_id": "1000000000000002",
                        "original_transaction_id": "1000000000000001",
                        "purchase_date": "2024-03-01 10:00:00 Etc/GMT",
                        "original_purchase_date": "2024-02-01 10:00:00 Etc/GMT",
                        "expires_date": "2024-04-01 10:00:00 Etc/GMT",
                        "app_item_id": "0",
                        "version_external_identifier": "0",
                        "web_order_line_item_id": "230000000000001"
                    },
                    {
                        "quantity": "3",
                        "product_id": "com.example.app.coins",
                        "transaction_id": "1000000000000003",
                        "original_transaction_id": "1000000000000003",
                        "purchase_date": "2024-03-02 11:00:00 Etc/GMT",
                        "original_purchase_date": "2024-03-02 11:00:00 Etc/GMT"
                    }
                ]
            }
        }));

        let receipt = repo
            .verify_receipt("blob", Environment::Sandbox)
            .await
            .unwrap();

        assert_eq!(receipt.bundle_id, "com.example.app");
        assert_eq!(receipt.application_version, "1.0");
        assert_eq!(receipt.original_application_version, "0.9");
        assert_eq!(receipt.in_app.len(), 2);
        assert_eq!(
            receipt.in_app[0],
            PurchaseReceipt {
                quantity: "1".to_owned(),
                product_id: "com.example.app.monthly".to_owned(),
                transaction_id: "1000000000000002".to_owned(),
                original_transaction_id: "1000000000000001".to_owned(),
                purchase_date: "2024-03-01 10:00:00 Etc/GMT".to_owned(),
                original_purchase_date: "2024-02-01 10:00:00 Etc/GMT".to_owned(),
                expires_date: "2024-04-01 10:00:00 Etc/GMT".to_owned(),
                app_item_id: "0".to_owned(),
                version_external_identifier: "0".to_owned(),
                web_order_line_item_id: "230000000000001".to_owned(),
            }
        );
        assert_eq!(receipt.in_app[1].product_id, "com.example.app.coins");
        assert_eq!(receipt.in_app[1].expires_date, "");
        assert_eq!(
            repo.verify_receipt_datasource.calls.lock().unwrap().as_slice(),
            &[("blob".to_owned(), Environment::Sandbox)]
        );
    }

    #[tokio::test]
    async fn non_zero_status_discards_receipt() {
        let repo = repository(serde_json::json!({
            "status": 21006,
            "receipt": {
                "bundle_id": "com.example.app",
                "application_version": "1.0",
                "in_app": [],
                "original_application_version": "1.0"
            }
        }));

        let err = repo
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VerificationError::Rejected(VerificationStatus::SubscriptionExpired)
        ));
        assert_eq!(err.code(), Some(21006));
    }

    #[tokio::test]
    async fn non_zero_status_ignores_malformed_receipt() {
        let repo = repository(serde_json::json!({ "status": 21003, "receipt": "garbage" }));

        let err = repo
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(21003));
    }

    #[tokio::test]
    async fn status_zero_without_receipt_is_a_decode_error() {
        let repo = repository(serde_json::json!({ "status": 0 }));

        let err = repo
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap_err();

        assert!(matches!(err, VerificationError::Decode(_)));
    }

    #[tokio::test]
    async fn legacy_shape_is_only_accepted_by_any_shape() {
        let body = serde_json::json!({
            "status": 0,
            "receipt": {
                "bid": "com.example.app",
                "bvrs": "1.2",
                "item_id": "521129812",
                "product_id": "com.example.app.coins",
                "quantity": "1",
                "transaction_id": "1000000046178817",
                "original_transaction_id": "1000000046178817",
                "purchase_date": "2012-04-30 15:05:55 Etc/GMT",
                "original_purchase_date": "2012-04-30 15:05:55 Etc/GMT",
                "unique_identifier": "0000b0090000"
            }
        });

        let err = repository(body.clone())
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Decode(_)));

        let verified = repository(body)
            .verify_receipt_any_shape("blob", Environment::Production)
            .await
            .unwrap();
        let VerifiedReceipt::Legacy(legacy) = verified else {
            panic!("expected legacy receipt");
        };
        assert_eq!(legacy.bundle_id, "com.example.app");
        assert_eq!(legacy.bundle_version, "1.2");
        assert_eq!(legacy.unique_identifier, "0000b0090000");
        assert_eq!(legacy.version_external_identifier, "");
    }

    #[tokio::test]
    async fn empty_receipt_object_is_a_decode_error_for_any_shape() {
        let err = repository(serde_json::json!({ "status": 0, "receipt": {} }))
            .verify_receipt_any_shape("blob", Environment::Production)
            .await
            .unwrap_err();

        assert!(matches!(err, VerificationError::Decode(_)));
    }

    #[tokio::test]
    async fn bad_purchase_is_a_decode_error_for_both_operations() {
        let body = serde_json::json!({
            "status": 0,
            "receipt": {
                "bundle_id": "com.example.app",
                "application_version": "1.0",
                "in_app": [{ "quantity": 1 }],
                "original_application_version": "1.0"
            }
        });

        let err = repository(body.clone())
            .verify_receipt_any_shape("blob", Environment::Production)
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Decode(_)));

        let err = repository(body)
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Decode(_)));
        assert!(!err.to_string().contains("missing field `in_app`"));
    }

    #[tokio::test]
    async fn null_in_app_returns_receipt_without_purchases() {
        let repo = repository(serde_json::json!({
            "status": 0,
            "receipt": {
                "bundle_id": "com.example.app",
                "application_version": "1.0",
                "in_app": null,
                "original_application_version": "1.0"
            }
        }));

        let receipt = repo
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap();

        assert_eq!(receipt.bundle_id, "com.example.app");
        assert!(receipt.in_app.is_empty());
    }

    #[tokio::test]
    async fn float_encoded_status_is_classified() {
        let err = repository(serde_json::json!({ "status": 21007.0 }))
            .verify_receipt("blob", Environment::Production)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(21007));
        assert!(err.is_environment_mismatch());
    }

    /// Records the level of every event emitted while installed.
    struct LevelRecorder(Arc<Mutex<Vec<tracing::Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn rejection_is_logged_at_debug_only() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(LevelRecorder(levels.clone()));

        let result = tracing::subscriber::with_default(subscriber, || {
            VerifiedReceipt::from_response(
                ResponseBodyModel {
                    status: 21002,
                    receipt: None,
                },
                Environment::Production,
            )
        });

        assert_eq!(result.unwrap_err().code(), Some(21002));
        let levels = levels.lock().unwrap();
        assert!(!levels.is_empty());
        assert!(levels.iter().all(|level| *level == tracing::Level::DEBUG));
    }
}
