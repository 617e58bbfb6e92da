use crate::{
    auth::CurrentUser,
    dtos::table::{AvailabilityQuery, AvailabilityResponse, CreateTableRequest},
    error::AppResult,
    extract::{AppJson, AppQuery},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use booking::parse_requested_time;
use database::services::TableService;
use models::table::{DiningTable, TableUpdate};
use uuid::Uuid;

/// List all tables by number
#[utoipa::path(
    get,
    path = "/api/tables",
    responses(
        (status = 200, description = "All tables", body = [DiningTable])
    ),
    tag = "Tables"
)]
pub async fn list_tables(State(state): State<AppState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.validator.store().find_tables().await?;
    Ok(Json(tables))
}

/// Which tables can be booked around a given time
#[utoipa::path(
    get,
    path = "/api/tables/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Every table with its availability", body = AvailabilityResponse),
        (status = 400, description = "Unparsable date")
    ),
    tag = "Tables"
)]
pub async fn table_availability(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    // An unencoded `+02:00` offset arrives as ` 02:00` after query decoding
    let date = parse_requested_time(&query.date)
        .or_else(|e| parse_requested_time(&query.date.replace(' ', "+")).map_err(|_| e))?;
    let tables = state.availability.list_availability(date).await?;

    Ok(Json(AvailabilityResponse {
        date,
        tables: tables.into_iter().map(Into::into).collect(),
    }))
}

/// Add a table
#[utoipa::path(
    post,
    path = "/api/tables",
    request_body = CreateTableRequest,
    responses(
        (status = 200, description = "Table created", body = DiningTable),
        (status = 400, description = "No seats"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Table number taken")
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn create_table(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<CreateTableRequest>,
) -> AppResult<Json<DiningTable>> {
    user.require_admin()?;
    let table = TableService::create(&state.db, request.number, request.seats).await?;
    Ok(Json(table.into()))
}

/// Change a table
///
/// Lowering the seat count below the party size of an active reservation on
/// the table is refused.
#[utoipa::path(
    put,
    path = "/api/tables/{id}",
    params(("id" = Uuid, Path, description = "Table ID")),
    request_body = TableUpdate,
    responses(
        (status = 200, description = "Table updated", body = DiningTable),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Table not found"),
        (status = 409, description = "Seats below an active reservation, or number taken")
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn update_table(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(changes): AppJson<TableUpdate>,
) -> AppResult<Json<DiningTable>> {
    user.require_admin()?;
    let table = TableService::update(&state.db, id, changes).await?;
    Ok(Json(table.into()))
}

/// Remove a table that has no active reservations
#[utoipa::path(
    delete,
    path = "/api/tables/{id}",
    params(("id" = Uuid, Path, description = "Table ID")),
    responses(
        (status = 204, description = "Table deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Table not found"),
        (status = 409, description = "Table has active reservations")
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn delete_table(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    user.require_admin()?;
    TableService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::StatusCode;
    use models::user::UserRole;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_availability_marks_booked_table() {
        let app = TestApp::with_db(|db| db);
        let booked = app.add_table(1, 4).await;
        let free = app.add_table(2, 2).await;
        let token = app.token(Uuid::new_v4(), UserRole::Client);

        let (status, _) = app
            .post(
                "/api/reservations",
                Some(&token),
                json!({"table_id": booked.id, "date": "2025-06-01T19:00:00Z", "guests": 2}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .get("/api/tables/availability?date=2025-06-01T19:00:00", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        let tables = body["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0]["table"]["id"], json!(booked.id));
        assert_eq!(tables[0]["available"], false);
        assert_eq!(tables[1]["table"]["id"], json!(free.id));
        assert_eq!(tables[1]["available"], true);
    }

    #[tokio::test]
    async fn test_availability_accepts_unencoded_offset() {
        let app = TestApp::with_db(|db| db);
        let table = app.add_table(1, 4).await;
        let token = app.token(Uuid::new_v4(), UserRole::Client);

        let (status, _) = app
            .post(
                "/api/reservations",
                Some(&token),
                json!({"table_id": table.id, "date": "2025-06-01T19:00:00Z", "guests": 2}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .get("/api/tables/availability?date=2025-06-01T21:00:00+02:00", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2025-06-01T19:00:00Z");
        assert_eq!(body["tables"][0]["available"], false);
    }

    #[tokio::test]
    async fn test_availability_rejects_bad_date() {
        let app = TestApp::with_db(|db| db);

        let (status, body) = app
            .get("/api/tables/availability?date=tomorrow", None)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_list_tables_in_number_order() {
        let app = TestApp::with_db(|db| db);
        app.add_table(3, 6).await;
        app.add_table(1, 2).await;

        let (status, body) = app.get("/api/tables", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["number"], 1);
        assert_eq!(body[1]["number"], 3);
    }

    #[tokio::test]
    async fn test_create_table_requires_admin() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Staff);

        let (status, _) = app
            .post("/api/tables", Some(&token), json!({"number": 9, "seats": 4}))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
