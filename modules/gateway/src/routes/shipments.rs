use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

use tracking::entities::shipment::{Party, ShipmentStatus};
use tracking::services::shipments::{CreateShipment, DeleteShipmentById, ListAllShipments};
use tracking::services::transition::ApplyStatus;

use crate::api::ShipmentDto;
use crate::error::ApiError;
use crate::extract::AdminContext;
use crate::state::AppState;

/// Request fields are optional at the serde level so an absent field
/// surfaces as a 400 validation message instead of a deserialization
/// failure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl From<PartyRequest> for Party {
    fn from(p: PartyRequest) -> Self {
        Self {
            name: p.name,
            phone: p.phone,
            email: p.email,
            address: p.address,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    #[serde(default)]
    pub sender: PartyRequest,
    #[serde(default)]
    pub receiver: PartyRequest,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub weight: Option<Decimal>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub message: Option<String>,
}

pub async fn create_handler(
    _admin: AdminContext,
    State(state): State<AppState>,
    Json(payload): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<ShipmentDto>), ApiError> {
    let created = state
        .shipments
        .process(CreateShipment {
            sender: payload.sender.into(),
            receiver: payload.receiver.into(),
            origin: payload.origin,
            destination: payload.destination,
            weight: payload
                .weight
                .ok_or_else(|| ApiError::Validation("weight is required".to_owned()))?,
            quantity: payload.quantity.unwrap_or(1),
            price: payload
                .price
                .ok_or_else(|| ApiError::Validation("price is required".to_owned()))?,
            estimated_delivery: payload.estimated_delivery,
            city: payload.city,
            country: payload.country,
            message: payload.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ShipmentDto::from(&created))))
}

pub async fn list_handler(
    _admin: AdminContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<ShipmentDto>>, ApiError> {
    let shipments = state.shipments.process(ListAllShipments).await?;
    Ok(Json(shipments.iter().map(ShipmentDto::from).collect()))
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

fn parse_status(raw: &str) -> Result<ShipmentStatus, ApiError> {
    serde_json::from_value(serde_json::Value::String(raw.to_owned()))
        .map_err(|_| ApiError::Validation(format!("unknown status: {raw}")))
}

pub async fn status_handler(
    _admin: AdminContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ShipmentDto>, ApiError> {
    let status = payload
        .status
        .as_deref()
        .ok_or_else(|| ApiError::Validation("status is required".to_owned()))
        .and_then(parse_status)?;

    let updated = state
        .transitions
        .process(ApplyStatus {
            shipment_id: id,
            status,
            city: payload.city,
            country: payload.country,
            message: payload.message,
            lat: payload.lat,
            lng: payload.lng,
        })
        .await?;

    Ok(Json(ShipmentDto::from(&updated)))
}

pub async fn delete_handler(
    _admin: AdminContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.shipments.process(DeleteShipmentById { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_parse_to_the_enum() {
        assert_eq!(parse_status("In Transit").unwrap(), ShipmentStatus::InTransit);
        assert_eq!(parse_status("Delivered").unwrap(), ShipmentStatus::Delivered);
        assert_eq!(
            parse_status("Out for Delivery").unwrap(),
            ShipmentStatus::OutForDelivery
        );
    }

    #[test]
    fn unknown_status_string_is_a_validation_error() {
        assert!(matches!(
            parse_status("Lost in the mail"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let payload: CreateShipmentRequest = serde_json::from_str("{}").unwrap();
        assert!(payload.origin.is_empty());
        assert!(payload.weight.is_none());
        assert!(payload.sender.name.is_empty());
    }
}
