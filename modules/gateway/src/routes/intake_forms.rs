use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kanau::processor::Processor;
use rust_decimal::Decimal;

use intake::services::intake::{SubmitContact, SubmitQuote};

use crate::api::{ContactMessageDto, QuoteRequestDto};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct QuoteFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub weight: Option<Decimal>,
    pub message: Option<String>,
}

pub async fn quote_handler(
    State(state): State<AppState>,
    Json(payload): Json<QuoteFormRequest>,
) -> Result<(StatusCode, Json<QuoteRequestDto>), ApiError> {
    let quote = state
        .intake
        .process(SubmitQuote {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            origin: payload.origin,
            destination: payload.destination,
            weight: payload.weight,
            message: payload.message,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(QuoteRequestDto::from(&quote))))
}

#[derive(Debug, serde::Deserialize)]
pub struct ContactFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

pub async fn contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<ContactFormRequest>,
) -> Result<(StatusCode, Json<ContactMessageDto>), ApiError> {
    let message = state
        .intake
        .process(SubmitContact {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ContactMessageDto::from(&message))))
}
