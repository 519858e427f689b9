use admin::entities::admin_session::AdminSessionId;
use admin::services::admin_auth::AuthenticateSession;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kanau::processor::Processor;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const ADMIN_AUTHORIZATION_HEADER: &str = "x-admin-authorization";

/// Verified admin identity. Extracting this from a request performs the
/// session lookup; handlers that take it are admin-only. The identity
/// travels with the request instead of living in any ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminContext {
    pub admin_id: Uuid,
    pub session_id: AdminSessionId,
}

impl FromRequestParts<AppState> for AdminContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(ADMIN_AUTHORIZATION_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let session_id =
            AdminSessionId::try_from_ascii_string(token).map_err(|_| ApiError::Unauthorized)?;

        let admin_id = state
            .auth
            .process(AuthenticateSession { session_id })
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self {
            admin_id,
            session_id,
        })
    }
}
