use crate::{
    auth::CurrentUser,
    dtos::reservation::{CreateReservationRequest, UpdateReservationRequest},
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use booking::{BookingError, ReservationFilter, Reschedule, parse_requested_time};
use models::reservation::{Reservation, ReservationStatus};
use uuid::Uuid;

async fn load_visible(state: &AppState, user: &CurrentUser, id: Uuid) -> AppResult<Reservation> {
    let reservation = state
        .validator
        .store()
        .find_reservation(id)
        .await?
        .ok_or(BookingError::ReservationNotFound(id))?;

    user.require_owner_or_admin(reservation.user_id)?;
    Ok(reservation)
}

/// Book a table
#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created as pending", body = Reservation),
        (status = 400, description = "Bad date, empty party or party larger than the table"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Table not found"),
        (status = 409, description = "Table already booked within an hour, or duplicate booking")
    ),
    security(("jwt" = [])),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<CreateReservationRequest>,
) -> AppResult<Json<Reservation>> {
    let requested_time = parse_requested_time(&request.date)?;

    let reservation = state
        .validator
        .validate_and_create(request.table_id, requested_time, request.guests, user.id)
        .await?;

    Ok(Json(reservation))
}

/// List reservations: all of them for admins, the caller's own otherwise
#[utoipa::path(
    get,
    path = "/api/reservations",
    responses(
        (status = 200, description = "Reservations ordered by date", body = [Reservation]),
        (status = 401, description = "Not authenticated")
    ),
    security(("jwt" = [])),
    tag = "Reservations"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Reservation>>> {
    let mut filter = ReservationFilter::default();
    if !user.is_admin() {
        filter = filter.user(user.id);
    }

    let reservations = state.validator.store().find_reservations(&filter).await?;
    Ok(Json(reservations))
}

/// Get one reservation
#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation found", body = Reservation),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    ),
    security(("jwt" = [])),
    tag = "Reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(load_visible(&state, &user, id).await?))
}

/// Reschedule a reservation and/or change its status
///
/// A new table, time or party size is validated like a fresh booking, not
/// counting the reservation itself. Only admins may confirm. Either every
/// requested change is applied or none is.
#[utoipa::path(
    put,
    path = "/api/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 400, description = "Invalid change or status transition"),
        (status = 403, description = "Not the owner, or confirming without admin rights"),
        (status = 404, description = "Reservation or table not found"),
        (status = 409, description = "New slot conflicts with another reservation")
    ),
    security(("jwt" = [])),
    tag = "Reservations"
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<UpdateReservationRequest>,
) -> AppResult<Json<Reservation>> {
    let reservation = load_visible(&state, &user, id).await?;

    if request.status == Some(ReservationStatus::Confirmed)
        && reservation.status != ReservationStatus::Confirmed
        && !user.is_admin()
    {
        return Err(AppError::Forbidden(
            "Only an admin can confirm a reservation".to_string(),
        ));
    }

    let changes = Reschedule {
        table_id: request.table_id,
        date: request
            .date
            .as_deref()
            .map(parse_requested_time)
            .transpose()?,
        guests: request.guests,
    };

    let reservation = state
        .validator
        .update(id, changes, request.status)
        .await?;

    Ok(Json(reservation))
}

/// Delete a reservation
#[utoipa::path(
    delete,
    path = "/api/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    ),
    security(("jwt" = [])),
    tag = "Reservations"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    load_visible(&state, &user, id).await?;

    if !state.validator.store().delete_reservation(id).await? {
        return Err(BookingError::ReservationNotFound(id).into());
    }

    log::info!("Reservation {id} deleted by {}", user.id);
    Ok(StatusCode::NO_CONTENT)
}
