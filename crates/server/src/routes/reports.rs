use crate::{
    auth::CurrentUser,
    dtos::report::{DailyReportQuery, PeriodReportQuery},
    error::AppResult,
    extract::AppQuery,
    integrations::pdf,
    state::AppState,
};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use database::services::OrderService;
use models::report::{SalesSummary, day_bounds};

async fn render(
    state: &AppState,
    title: String,
    filename: String,
    (from, to): (DateTime<Utc>, DateTime<Utc>),
) -> AppResult<Response> {
    let orders = OrderService::list_between(&state.db, from, to).await?;
    let summary = SalesSummary::from_orders(&orders);
    let bytes = pdf::sales_report(&title, &summary, &orders, Utc::now())?;

    log::info!(
        "Rendered {title}: {} orders, revenue {}",
        summary.total_orders,
        summary.total_revenue
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Sales report for one day
#[utoipa::path(
    get,
    path = "/api/reports/daily",
    params(DailyReportQuery),
    responses(
        (status = 200, description = "Daily report", content_type = "application/pdf", body = Vec<u8>),
        (status = 403, description = "Admin only")
    ),
    security(("jwt" = [])),
    tag = "Reports"
)]
pub async fn daily_report(
    State(state): State<AppState>,
    user: CurrentUser,
    AppQuery(query): AppQuery<DailyReportQuery>,
) -> AppResult<Response> {
    user.require_admin()?;

    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    render(
        &state,
        format!("Daily sales report {date}"),
        format!("report-{date}"),
        day_bounds(date),
    )
    .await
}

/// Sales report over the last day, week or month
#[utoipa::path(
    get,
    path = "/api/reports/period",
    params(PeriodReportQuery),
    responses(
        (status = 200, description = "Period report", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Unknown period"),
        (status = 403, description = "Admin only")
    ),
    security(("jwt" = [])),
    tag = "Reports"
)]
pub async fn period_report(
    State(state): State<AppState>,
    user: CurrentUser,
    AppQuery(query): AppQuery<PeriodReportQuery>,
) -> AppResult<Response> {
    user.require_admin()?;

    let today = Utc::now().date_naive();
    let period = query.period;
    render(
        &state,
        format!("Sales report, {period} ending {today}"),
        format!("report-{period}-{today}"),
        period.bounds(today),
    )
    .await
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use database::entities::orders;
    use models::user::UserRole;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_daily_report_is_pdf() {
        let app = TestApp::with_db(|db| db.append_query_results([Vec::<orders::Model>::new()]));
        let token = app.token(Uuid::new_v4(), UserRole::Admin);

        let (status, bytes) = app
            .request(Method::GET, "/api/reports/daily?date=2025-06-01", Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_reports_are_admin_only() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Staff);

        let (status, _) = app.get("/api/reports/period?period=week", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_period() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Admin);

        let (status, _) = app.get("/api/reports/period?period=decade", Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
