//! Card payments through the Stripe REST API

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Payment gateway unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payment gateway rejected the request: {0}")]
    Rejected(String),
}

/// The parts of a gateway payment intent the server uses
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: String,
    /// Minor currency units
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens an intent for `amount` minor units, tagged with the order id
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        order_id: Uuid,
    ) -> Result<PaymentIntent, GatewayError>;

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, GatewayError>;

    /// Refunds `amount` minor units, or everything when `None`
    async fn refund(&self, intent_id: &str, amount: Option<i64>) -> Result<(), GatewayError>;
}

pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: &str, secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.api_base)
    }

    /// Turns a non-2xx response into [`GatewayError::Rejected`] with Stripe's message
    async fn parse<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {status}"));
            log::error!("Stripe request failed: {message}");
            return Err(GatewayError::Rejected(message));
        }

        serde_json::from_value(body)
            .map_err(|e| GatewayError::Rejected(format!("Unexpected Stripe response: {e}")))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        order_id: Uuid,
    ) -> Result<PaymentIntent, GatewayError> {
        let amount = amount.to_string();
        let order_id = order_id.to_string();

        let response = self
            .client
            .post(self.url("payment_intents"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", currency),
                ("metadata[order_id]", order_id.as_str()),
                ("automatic_payment_methods[enabled]", "true"),
            ])
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("payment_intents/{intent_id}")))
            .basic_auth(&self.secret_key, None::<&str>)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn refund(&self, intent_id: &str, amount: Option<i64>) -> Result<(), GatewayError> {
        let mut form = vec![("payment_intent", intent_id.to_string())];
        if let Some(amount) = amount {
            form.push(("amount", amount.to_string()));
        }

        let response = self
            .client
            .post(self.url("refunds"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;

        let _: Value = Self::parse(response).await?;
        Ok(())
    }
}
