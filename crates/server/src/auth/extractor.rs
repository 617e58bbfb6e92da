use super::{
    CurrentUser,
    jwt::{TokenError, bearer_token},
};
use crate::{error::AppError, state::AppState};
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

/// Validates the bearer token; handlers taking a [`CurrentUser`] reject
/// anonymous requests with 401
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = state.jwt.verify(token).map_err(|e| {
            log::warn!("Rejected token on {}: {e:?}", parts.uri);
            match e {
                TokenError::Expired => AppError::Unauthorized("Token expired".to_string()),
                TokenError::Invalid => AppError::Unauthorized("Invalid token".to_string()),
            }
        })?;

        let user = CurrentUser {
            id: claims.sub,
            role: claims.role,
        };
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}

/// Anonymous requests yield `None`; a present but bad token is still a 401
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(None);
        }

        <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
