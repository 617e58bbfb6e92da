//! Menu, stock, pricing and business advice from a language model
//!
//! Each handler gathers the relevant data, serializes it into the prompt and
//! passes the model's JSON object back untouched.

use crate::{
    auth::CurrentUser,
    dtos::ai::{ForecastRequest, PricingRequest, RecommendationRequest},
    error::{AppError, AppResult},
    extract::AppJson,
    integrations::LanguageModel,
    state::AppState,
};
use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use database::services::{InventoryService, MenuService, OrderService, StatsService};
use serde_json::{Value, json};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an assistant for a restaurant's management team. \
    Always answer with a single JSON object and nothing else.";

/// How many past orders feed a recommendation
const HISTORY_LIMIT: u64 = 20;
/// How far back sales history goes for a forecast
const FORECAST_HISTORY_DAYS: i64 = 30;
const MAX_FORECAST_DAYS: u32 = 30;
const DEFAULT_FORECAST_DAYS: u32 = 7;

fn advisor(state: &AppState) -> AppResult<Arc<dyn LanguageModel>> {
    state
        .advisor
        .clone()
        .ok_or_else(|| AppError::ServiceUnavailable("AI service is not configured".to_string()))
}

/// Dishes suggested from the caller's order history
#[utoipa::path(
    post,
    path = "/api/ai/recommendations",
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "`recommended_items` with `name`, `reason`, `confidence_score`, plus `insights`", body = Object),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Model call failed"),
        (status = 503, description = "AI service not configured")
    ),
    security(("jwt" = [])),
    tag = "AI"
)]
pub async fn recommendations(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<RecommendationRequest>,
) -> AppResult<Json<Value>> {
    let advisor = advisor(&state)?;

    let history = OrderService::recent_for_user(&state.db, user.id, HISTORY_LIMIT).await?;
    let menu = MenuService::list_available(&state.db).await?;

    let prompt = format!(
        "Recommend dishes from the menu for this customer, based on their past orders \
         (favourite categories, price range, how often they order) and preferences.\n\
         Order history: {}\nPreferences: {}\nMenu: {}\n\
         Answer with `recommended_items` (array of objects with `name`, `reason`, \
         `confidence_score` between 0 and 1) and `insights` (string).",
        json!(history),
        request.preferences.unwrap_or_default(),
        json!(menu),
    );

    Ok(Json(advisor.complete_json(SYSTEM_PROMPT, &prompt).await?))
}

/// Expected demand per item over the coming days
#[utoipa::path(
    post,
    path = "/api/ai/inventory/forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "`predictions` with `item_name`, `predicted_demand`, `confidence`, `trend`, plus `alerts`", body = Object),
        (status = 400, description = "days_ahead outside 1..=30"),
        (status = 403, description = "Admin only"),
        (status = 502, description = "Model call failed"),
        (status = 503, description = "AI service not configured")
    ),
    security(("jwt" = [])),
    tag = "AI"
)]
pub async fn inventory_forecast(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<ForecastRequest>,
) -> AppResult<Json<Value>> {
    user.require_admin()?;

    let days_ahead = request.days_ahead.unwrap_or(DEFAULT_FORECAST_DAYS);
    if !(1..=MAX_FORECAST_DAYS).contains(&days_ahead) {
        return Err(AppError::BadRequest(format!(
            "days_ahead must be between 1 and {MAX_FORECAST_DAYS}"
        )));
    }
    let advisor = advisor(&state)?;

    let now = Utc::now();
    let sales = OrderService::list_between(
        &state.db,
        now - Duration::days(FORECAST_HISTORY_DAYS),
        now,
    )
    .await?;
    let stock: Vec<Value> = InventoryService::levels(&state.db)
        .await?
        .into_iter()
        .map(|(name, levels)| {
            json!({
                "item_name": name,
                "current_stock": levels.current,
                "min_stock_level": levels.min,
                "max_stock_level": levels.max,
            })
        })
        .collect();

    let prompt = format!(
        "Predict demand for the next {days_ahead} days from the last \
         {FORECAST_HISTORY_DAYS} days of sales, considering weekday patterns and \
         trends per item, and flag stock that will run short.\n\
         Sales: {}\nStock: {}\n\
         Answer with `predictions` (array of objects with `item_name`, \
         `predicted_demand`, `confidence`, `trend`) and `alerts` (array of strings).",
        json!(sales),
        json!(stock),
    );

    Ok(Json(advisor.complete_json(SYSTEM_PROMPT, &prompt).await?))
}

/// Suggested menu prices
#[utoipa::path(
    post,
    path = "/api/ai/pricing/optimize",
    request_body = PricingRequest,
    responses(
        (status = 200, description = "`optimized_prices`, `reasoning`, `expected_impact`", body = Object),
        (status = 403, description = "Admin only"),
        (status = 502, description = "Model call failed"),
        (status = 503, description = "AI service not configured")
    ),
    security(("jwt" = [])),
    tag = "AI"
)]
pub async fn optimize_pricing(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<PricingRequest>,
) -> AppResult<Json<Value>> {
    user.require_admin()?;
    let advisor = advisor(&state)?;

    let menu = MenuService::list_available(&state.db).await?;

    let prompt = format!(
        "Suggest prices for these menu items balancing profit, competitiveness and \
         demand elasticity.\nMenu: {}\nMarket data: {}\n\
         Answer with `optimized_prices` (array of objects with `item_name`, \
         `current_price`, `optimized_price`, `change`, `reasoning`), `reasoning` \
         and `expected_impact`.",
        json!(menu),
        request.market_data.unwrap_or_else(|| json!({})),
    );

    Ok(Json(advisor.complete_json(SYSTEM_PROMPT, &prompt).await?))
}

/// Observations and next steps from today's numbers
#[utoipa::path(
    get,
    path = "/api/ai/insights",
    responses(
        (status = 200, description = "`insights`, `recommendations`, `priority_actions`", body = Object),
        (status = 403, description = "Admin only"),
        (status = 502, description = "Model call failed"),
        (status = 503, description = "AI service not configured")
    ),
    security(("jwt" = [])),
    tag = "AI"
)]
pub async fn business_insights(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Value>> {
    user.require_admin()?;
    let advisor = advisor(&state)?;

    let stats = StatsService::dashboard(&state.db).await?;
    let today = StatsService::today_summary(&state.db).await?;

    let prompt = format!(
        "Give actionable insights on sales performance, customer behaviour and \
         opportunities from these figures.\nOverall: {}\nToday: {}\n\
         Answer with `insights` (array of objects with `category`, `description`, \
         `impact`), `recommendations` (array of strings) and `priority_actions` \
         (array of strings).",
        json!(stats),
        json!(today),
    );

    Ok(Json(advisor.complete_json(SYSTEM_PROMPT, &prompt).await?))
}
