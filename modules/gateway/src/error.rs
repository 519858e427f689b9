use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

/// HTTP-facing error. Domain errors map onto 400/404; everything
/// unexpected collapses to a bare 500 with no internal detail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal server error")]
    Internal,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidTransition(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(m) | Self::NotFound(m) | Self::InvalidTransition(m) => m.clone(),
            Self::Unauthorized => "Unauthorized".to_owned(),
            Self::Internal => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                message: self.message(),
            }),
        )
            .into_response()
    }
}

impl From<tracking::Error> for ApiError {
    fn from(e: tracking::Error) -> Self {
        match e {
            tracking::Error::Validation(m) => Self::Validation(m),
            tracking::Error::NotFound => Self::NotFound("Shipment not found".to_owned()),
            tracking::Error::InvalidTransition => Self::InvalidTransition(
                "Shipment is already delivered and can no longer be updated".to_owned(),
            ),
            tracking::Error::Database(e) => {
                error!("database error: {e}");
                Self::Internal
            }
        }
    }
}

impl From<intake::Error> for ApiError {
    fn from(e: intake::Error) -> Self {
        match e {
            intake::Error::Validation(m) => Self::Validation(m),
            intake::Error::Database(e) => {
                error!("database error: {e}");
                Self::Internal
            }
        }
    }
}

impl From<framework::Error> for ApiError {
    fn from(e: framework::Error) -> Self {
        error!("internal error: {e}");
        Self::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_the_documented_status_codes() {
        assert_eq!(
            ApiError::from(tracking::Error::validation("weight is required")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(tracking::Error::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(tracking::Error::InvalidTransition).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_leak_nothing() {
        let err = ApiError::from(tracking::Error::Database(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }
}
