use std::time::Duration;

use async_trait::async_trait;

use crate::client::flow::ContactForm;
use crate::client::{ClientError, Result};
use crate::features::contacts::dtos::ContactReceiptDto;
use crate::shared::types::ApiResponse;

/// What the API hands back for an accepted submission
pub type SubmissionReceipt = ContactReceiptDto;

/// Transport that delivers one form submission to the contact API
#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<SubmissionReceipt>;
}

/// `ContactApi` over HTTP
pub struct HttpContactApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpContactApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("contact-form/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/contact", self.base_url)
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, form: &ContactForm) -> Result<SubmissionReceipt> {
        let url = self.endpoint();
        tracing::debug!("Posting contact form to {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Contact API unreachable: {}", e);
                ClientError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<ApiResponse<SubmissionReceipt>>(&body);

        match parsed {
            Ok(ApiResponse {
                success: true,
                data: Some(receipt),
                ..
            }) if status.is_success() => {
                tracing::info!("Contact form accepted: id={}", receipt.id);
                Ok(receipt)
            }
            Ok(envelope) => {
                let message = envelope
                    .message
                    .unwrap_or_else(|| format!("HTTP {}", status));
                tracing::warn!("Contact API error: HTTP {} - {}", status, message);
                Err(ClientError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
            Err(e) if status.is_success() => Err(ClientError::Serialization(e)),
            Err(_) => {
                tracing::warn!("Contact API error: HTTP {} - {}", status, body);
                Err(ClientError::Rejected {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}
