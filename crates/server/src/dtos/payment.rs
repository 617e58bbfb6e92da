use chrono::{DateTime, Utc};
use database::entities::payments;
use models::payment::{PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub order_id: Uuid,
    pub amount: Decimal,
    /// ISO 4217 code, defaults to `eur`
    pub currency: Option<String>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RefundRequest {
    /// Partial refund amount; the whole payment when absent
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub gateway_intent_id: Option<String>,
    /// Only on creation of a card payment, for the client to confirm it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentResponse {
    pub fn new(payment: payments::Model, client_secret: Option<String>) -> Self {
        Self {
            id: payment.id,
            order_id: payment.order_id,
            amount: payment.amount,
            currency: payment.currency,
            payment_method: payment.payment_method,
            status: payment.status,
            gateway_intent_id: payment.gateway_intent_id,
            client_secret,
            created_at: payment.created_at,
        }
    }
}
