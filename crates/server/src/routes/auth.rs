use crate::{
    auth::{
        CurrentUser,
        password::{hash_password, verify_password},
    },
    dtos::auth::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::UserService;
use models::user::UserRole;

/// Create an account
///
/// Anyone may register a client account; staff and admin accounts can only
/// be created by an admin. Other callers asking for them get a client account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 401, description = "A bearer token was sent but is invalid")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    caller: Option<CurrentUser>,
    AppJson(request): AppJson<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".to_string()));
    }

    let mut role = request.role.unwrap_or_default();
    if role != UserRole::Client && !caller.as_ref().is_some_and(CurrentUser::is_admin) {
        log::warn!("Non-admin registration asked for role {role}, downgraded to client");
        role = UserRole::Client;
    }

    let password_hash = hash_password(&request.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;

    let user = UserService::create(&state.db, email, password_hash, request.name, role).await?;
    Ok(Json(user.into()))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = TokenResponse),
        (status = 401, description = "Wrong email or password")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = UserService::find_by_email(&state.db, request.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &user.password_hash) {
        log::warn!("Failed login for {}", user.email);
        return Err(invalid());
    }

    let access_token = state
        .jwt
        .issue(user.id, user.role)
        .map_err(|e| AppError::Internal(format!("Token signing failed: {e}")))?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TestApp, user_model};
    use axum::http::StatusCode;
    use database::entities::users;
    use models::user::UserRole;
    use sea_orm::MockExecResult;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_returns_bearer_token() {
        let user = user_model("alice@example.com", "s3cret", UserRole::Client);
        let app = TestApp::with_db(|db| db.append_query_results([vec![user.clone()]]));

        let (status, body) = app
            .post(
                "/api/auth/login",
                None,
                json!({"email": "alice@example.com", "password": "s3cret"}),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        assert_eq!(body["user"]["email"], "alice@example.com");
        let claims = app.state.jwt.verify(body["access_token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = user_model("alice@example.com", "s3cret", UserRole::Client);
        let app = TestApp::with_db(|db| db.append_query_results([vec![user]]));

        let (status, body) = app
            .post(
                "/api/auth/login",
                None,
                json!({"email": "alice@example.com", "password": "guess"}),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_register_downgrades_role_for_anonymous_caller() {
        let app = TestApp::with_db(|db| {
            db.append_query_results([Vec::<users::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
        });

        let (status, body) = app
            .post(
                "/api/auth/register",
                None,
                json!({
                    "email": "mallory@example.com",
                    "password": "pw",
                    "name": "Mallory",
                    "role": "admin"
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "client");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let existing = user_model("alice@example.com", "s3cret", UserRole::Client);
        let app = TestApp::with_db(|db| db.append_query_results([vec![existing]]));

        let (status, _) = app
            .post(
                "/api/auth/register",
                None,
                json!({"email": "alice@example.com", "password": "pw", "name": "Alice"}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
