use admin::services::admin_auth::{AdminLogin, AdminLoginResult, AdminLogout};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kanau::processor::Processor;

use crate::error::ApiError;
use crate::extract::AdminContext;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".to_owned(),
        ));
    }

    let result = state
        .auth
        .process(AdminLogin {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    match result {
        AdminLoginResult::Success(session_id) => Ok(Json(LoginResponse {
            token: session_id.to_ascii_string(),
        })),
        AdminLoginResult::WrongCredential => Err(ApiError::Unauthorized),
    }
}

pub async fn logout_handler(
    admin: AdminContext,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state
        .auth
        .process(AdminLogout {
            session_id: admin.session_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
