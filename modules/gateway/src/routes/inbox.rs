use axum::extract::State;
use axum::Json;
use kanau::processor::Processor;

use intake::services::intake::{ListInboxMessages, ListInboxQuotes};

use crate::api::{ContactMessageDto, QuoteRequestDto};
use crate::error::ApiError;
use crate::extract::AdminContext;
use crate::state::AppState;

pub async fn quotes_handler(
    _admin: AdminContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<QuoteRequestDto>>, ApiError> {
    let quotes = state.intake.process(ListInboxQuotes).await?;
    Ok(Json(quotes.iter().map(QuoteRequestDto::from).collect()))
}

pub async fn contact_handler(
    _admin: AdminContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessageDto>>, ApiError> {
    let messages = state.intake.process(ListInboxMessages).await?;
    Ok(Json(messages.iter().map(ContactMessageDto::from).collect()))
}
