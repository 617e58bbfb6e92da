use crate::{
    auth::CurrentUser,
    dtos::payment::{CreatePaymentRequest, PaymentResponse, RefundRequest},
    error::{AppError, AppResult},
    extract::AppJson,
    integrations::PaymentGateway,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::{
    entities::payments,
    services::{OrderService, PaymentService},
};
use models::payment::{
    DEFAULT_CURRENCY, PaymentMethod, PaymentStatus, to_minor_units,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

fn gateway(state: &AppState) -> AppResult<&Arc<dyn PaymentGateway>> {
    state.payments.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Card payments are not configured".to_string())
    })
}

fn minor_units(amount: Decimal) -> AppResult<i64> {
    to_minor_units(amount)
        .ok_or_else(|| AppError::BadRequest(format!("Amount {amount} is out of range")))
}

/// Loads a payment the caller may act on through its order
async fn load_visible(
    state: &AppState,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<payments::Model> {
    let payment = PaymentService::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {id} not found")))?;

    if !user.is_admin() {
        let order = OrderService::find(&state.db, payment.order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", payment.order_id)))?;
        user.require_owner_or_admin(order.user_id)?;
    }

    Ok(payment)
}

/// Pay for an order
///
/// Card payments open a gateway intent and come back `pending` with the
/// client secret needed to confirm them; cash is recorded as settled.
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Non-positive amount, or rejected by the gateway"),
        (status = 403, description = "Not the order owner"),
        (status = 404, description = "Order not found"),
        (status = 502, description = "Gateway unreachable"),
        (status = 503, description = "Card payments not configured")
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<CreatePaymentRequest>,
) -> AppResult<Json<PaymentResponse>> {
    let order = OrderService::find(&state.db, request.order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", request.order_id)))?;
    user.require_owner_or_admin(order.user_id)?;

    if request.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Payment amount must be positive".to_string(),
        ));
    }

    let currency = request
        .currency
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
        .to_lowercase();

    match request.payment_method {
        PaymentMethod::Card => {
            let gateway = gateway(&state)?;
            let intent = gateway
                .create_intent(minor_units(request.amount)?, &currency, order.id)
                .await?;

            let payment = PaymentService::create(
                &state.db,
                order.id,
                request.amount,
                currency,
                PaymentMethod::Card,
                Some(intent.id),
                PaymentStatus::from_intent_status(&intent.status),
            )
            .await?;

            Ok(Json(PaymentResponse::new(payment, intent.client_secret)))
        }
        PaymentMethod::Cash => {
            let payment = PaymentService::create(
                &state.db,
                order.id,
                request.amount,
                currency,
                PaymentMethod::Cash,
                None,
                PaymentStatus::Succeeded,
            )
            .await?;

            Ok(Json(PaymentResponse::new(payment, None)))
        }
    }
}

/// Get one payment
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment found", body = PaymentResponse),
        (status = 403, description = "Not the order owner"),
        (status = 404, description = "Payment not found")
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentResponse>> {
    let payment = load_visible(&state, &user, id).await?;
    Ok(Json(PaymentResponse::new(payment, None)))
}

/// Refresh a card payment's status from the gateway
#[utoipa::path(
    post,
    path = "/api/payments/{id}/confirm",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Current payment status", body = PaymentResponse),
        (status = 403, description = "Not the order owner"),
        (status = 404, description = "Payment not found"),
        (status = 503, description = "Card payments not configured")
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentResponse>> {
    let mut payment = load_visible(&state, &user, id).await?;

    let Some(intent_id) = payment.gateway_intent_id.as_deref() else {
        return Ok(Json(PaymentResponse::new(payment, None)));
    };

    let intent = gateway(&state)?.retrieve_intent(intent_id).await?;
    let status = PaymentStatus::from_intent_status(&intent.status);

    if status != payment.status {
        PaymentService::set_status(&state.db, id, status).await?;
        log::info!("Payment {id} moved from {} to {status}", payment.status);
        payment.status = status;
    }

    Ok(Json(PaymentResponse::new(payment, None)))
}

/// Refund a settled payment, in full or in part
#[utoipa::path(
    post,
    path = "/api/payments/{id}/refund",
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body = RefundRequest,
    responses(
        (status = 200, description = "Payment refunded", body = PaymentResponse),
        (status = 400, description = "Payment not settled, or amount above the payment"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Payment not found")
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn refund_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<RefundRequest>,
) -> AppResult<Json<PaymentResponse>> {
    user.require_admin()?;

    let mut payment = PaymentService::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {id} not found")))?;

    if payment.status != PaymentStatus::Succeeded {
        return Err(AppError::BadRequest(format!(
            "Only succeeded payments can be refunded, this one is {}",
            payment.status
        )));
    }
    if let Some(amount) = request.amount
        && (amount <= Decimal::ZERO || amount > payment.amount)
    {
        return Err(AppError::BadRequest(format!(
            "Refund amount must be between 0 and {}",
            payment.amount
        )));
    }

    if let Some(intent_id) = payment.gateway_intent_id.as_deref() {
        let amount = request.amount.map(minor_units).transpose()?;
        gateway(&state)?.refund(intent_id, amount).await?;
    }

    PaymentService::set_status(&state.db, id, PaymentStatus::Refunded).await?;
    log::info!("Payment {id} refunded by {}", user.id);
    payment.status = PaymentStatus::Refunded;

    Ok(Json(PaymentResponse::new(payment, None)))
}
