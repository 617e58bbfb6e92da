use crate::{auth::CurrentUser, error::AppResult, state::AppState};
use axum::{Json, extract::State};
use database::services::StatsService;
use models::report::DashboardStats;

/// Headline numbers for the admin dashboard
#[utoipa::path(
    get,
    path = "/api/stats/dashboard",
    responses(
        (status = 200, description = "Order, client and revenue totals", body = DashboardStats),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only")
    ),
    security(("jwt" = [])),
    tag = "Stats"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    user.require_admin()?;
    Ok(Json(StatsService::dashboard(&state.db).await?))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::StatusCode;
    use models::user::UserRole;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_dashboard_is_admin_only() {
        let app = TestApp::with_db(|db| db);

        let (status, _) = app.get("/api/stats/dashboard", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = app.token(Uuid::new_v4(), UserRole::Staff);
        let (status, _) = app.get("/api/stats/dashboard", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
