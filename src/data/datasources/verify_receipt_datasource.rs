use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::{
    config::ReceiptVerifierConfig,
    data::models::verify_receipt::{
        request_body_model::RequestBodyModel, response_body_model::ResponseBodyModel,
    },
    domain::entities::environment::Environment,
    errors::VerificationError,
};

#[async_trait]
pub trait VerifyReceiptDatasource: Send + Sync {
    /// Verify Receipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// receipt_data:
    ///   The Base64-encoded receipt data, forwarded as-is.
    /// environment:
    ///   Selects the sandbox or production endpoint. No fallback between the
    ///   two is attempted here.
    async fn verify_receipt(
        &self,
        receipt_data: &str,
        environment: Environment,
    ) -> Result<ResponseBodyModel, VerificationError>;
}

pub struct VerifyReceiptDatasourceImpl {
    client: reqwest::Client,
    config: ReceiptVerifierConfig,
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn verify_receipt(
        &self,
        receipt_data: &str,
        environment: Environment,
    ) -> Result<ResponseBodyModel, VerificationError> {
        let url = environment.verify_receipt_url(&self.config);
        let body = serde_json::to_vec(&RequestBodyModel {
            receipt_data,
            password: self.config.shared_secret.as_deref(),
        })
        .map_err(VerificationError::Serialization)?;
        self.callout(url, environment, body).await
    }
}

impl VerifyReceiptDatasourceImpl {
    pub(crate) fn new(config: ReceiptVerifierConfig) -> Result<Self, VerificationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    async fn callout(
        &self,
        url: &str,
        environment: Environment,
        body: Vec<u8>,
    ) -> Result<ResponseBodyModel, VerificationError> {
        tracing::debug!(url, ?environment, "sending verifyReceipt callout");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url, error = %e, "verifyReceipt callout failed to send");
                VerificationError::Transport(e)
            })?;

        // The endpoint reports failures through the JSON status, so the HTTP
        // status line is only logged.
        let http_status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(url, error = %e, "failed to read verifyReceipt response body");
            VerificationError::Transport(e)
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(
                url,
                %http_status,
                error = %e,
                "verifyReceipt response was not valid JSON"
            );
            VerificationError::Decode(e)
        })
    }
}
