use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecommendationRequest {
    /// Free text such as dietary restrictions
    pub preferences: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ForecastRequest {
    /// 1 to 30, defaults to 7
    pub days_ahead: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PricingRequest {
    #[schema(value_type = Object)]
    pub market_data: Option<Value>,
}
