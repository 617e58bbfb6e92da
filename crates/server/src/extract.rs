use crate::error::AppError;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// [`Json`] body whose rejection renders as an [`AppError`]
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// [`Query`] string whose rejection renders as an [`AppError`]
#[derive(Debug)]
pub struct AppQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use models::user::UserRole;
    use serde_json::{Value, json};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Admin);

        let (status, body) = app
            .post(
                "/api/tables",
                Some(&token),
                json!({"number": "seven", "seats": 4}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().unwrap().contains("number"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_json_error() {
        let app = TestApp::with_db(|db| db);
        let token = app.token(Uuid::new_v4(), UserRole::Client);

        let (status, body) = app
            .request(Method::POST, "/api/reservations", Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_missing_query_field_is_json_error() {
        let app = TestApp::with_db(|db| db);

        let (status, body) = app.get("/api/tables/availability", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().unwrap().contains("date"));
    }
}
