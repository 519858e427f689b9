//! Wire representations. Entities stay snake_case internally; the JSON
//! surface is camelCase with RFC 3339 timestamps, matching the tracking
//! frontend.

use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::PrimitiveDateTime;
use uuid::Uuid;

use intake::entities::contact_message::ContactMessage;
use intake::entities::quote_request::QuoteRequest;
use tracking::entities::shipment::{Party, Shipment, ShipmentStatus};
use tracking::entities::tracking_event::TrackingEvent;
use tracking::services::query::TrackingRecord;

pub fn to_rfc3339(t: PrimitiveDateTime) -> String {
    t.assume_utc().format(&Rfc3339).unwrap_or_default()
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PartyDto {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<&Party> for PartyDto {
    fn from(p: &Party) -> Self {
        Self {
            name: p.name.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDto {
    pub id: Uuid,
    pub tracking_number: String,
    pub sender: PartyDto,
    pub receiver: PartyDto,
    pub origin: String,
    pub destination: String,
    pub weight: Decimal,
    pub quantity: i32,
    pub price: Decimal,
    pub estimated_delivery: String,
    pub status: ShipmentStatus,
    pub is_delivered: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Shipment> for ShipmentDto {
    fn from(s: &Shipment) -> Self {
        Self {
            id: s.id,
            tracking_number: s.tracking_number.clone(),
            sender: PartyDto::from(&s.sender.0),
            receiver: PartyDto::from(&s.receiver.0),
            origin: s.origin.clone(),
            destination: s.destination.clone(),
            weight: s.weight,
            quantity: s.quantity,
            price: s.price,
            estimated_delivery: s.estimated_delivery.clone(),
            status: s.status,
            is_delivered: s.is_delivered(),
            created_at: to_rfc3339(s.created_at),
            updated_at: to_rfc3339(s.updated_at),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEventDto {
    pub id: i64,
    pub status: ShipmentStatus,
    pub city: String,
    pub country: String,
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: String,
}

impl From<&TrackingEvent> for TrackingEventDto {
    fn from(e: &TrackingEvent) -> Self {
        Self {
            id: e.id,
            status: e.status,
            city: e.city.clone(),
            country: e.country.clone(),
            message: e.message.clone(),
            lat: e.lat,
            lng: e.lng,
            created_at: to_rfc3339(e.created_at),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TrackingResponse {
    pub shipment: ShipmentDto,
    pub history: Vec<TrackingEventDto>,
}

impl From<&TrackingRecord> for TrackingResponse {
    fn from(record: &TrackingRecord) -> Self {
        Self {
            shipment: ShipmentDto::from(&record.shipment),
            history: record.history.iter().map(TrackingEventDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub origin: String,
    pub destination: String,
    pub weight: Option<Decimal>,
    pub message: Option<String>,
    pub created_at: String,
}

impl From<&QuoteRequest> for QuoteRequestDto {
    fn from(q: &QuoteRequest) -> Self {
        Self {
            id: q.id,
            name: q.name.clone(),
            email: q.email.clone(),
            phone: q.phone.clone(),
            origin: q.origin.clone(),
            destination: q.destination.clone(),
            weight: q.weight,
            message: q.message.clone(),
            created_at: to_rfc3339(q.created_at),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: String,
}

impl From<&ContactMessage> for ContactMessageDto {
    fn from(c: &ContactMessage) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
            subject: c.subject.clone(),
            message: c.message.clone(),
            created_at: to_rfc3339(c.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;
    use time::macros::datetime;

    fn party() -> Party {
        Party {
            name: "Ada Obi".into(),
            phone: "+234801".into(),
            email: "ada@example.com".into(),
            address: "Lagos".into(),
        }
    }

    fn shipment(status: ShipmentStatus) -> Shipment {
        Shipment {
            id: Uuid::nil(),
            tracking_number: "DV-3F9A0C12B7".into(),
            sender: Json(party()),
            receiver: Json(party()),
            origin: "Lagos".into(),
            destination: "Accra".into(),
            weight: Decimal::new(5, 0),
            quantity: 1,
            price: Decimal::new(50, 0),
            estimated_delivery: "6-10 business days".into(),
            status,
            created_at: datetime!(2025-01-15 08:30:00),
            updated_at: datetime!(2025-01-15 08:30:00),
        }
    }

    #[test]
    fn shipment_dto_uses_camel_case_and_derives_is_delivered() {
        let dto = ShipmentDto::from(&shipment(ShipmentStatus::InTransit));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["trackingNumber"], "DV-3F9A0C12B7");
        assert_eq!(json["status"], "In Transit");
        assert_eq!(json["isDelivered"], false);
        assert_eq!(json["estimatedDelivery"], "6-10 business days");
        assert_eq!(json["createdAt"], "2025-01-15T08:30:00Z");

        let dto = ShipmentDto::from(&shipment(ShipmentStatus::Delivered));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["isDelivered"], true);
    }

    #[test]
    fn event_dto_keeps_optional_coordinates_null() {
        let event = TrackingEvent {
            id: 1,
            shipment_id: Uuid::nil(),
            status: ShipmentStatus::Pending,
            city: "Lagos".into(),
            country: "Nigeria".into(),
            message: None,
            lat: None,
            lng: None,
            created_at: datetime!(2025-01-15 08:30:00),
        };
        let json = serde_json::to_value(TrackingEventDto::from(&event)).unwrap();
        assert!(json["lat"].is_null());
        assert!(json["lng"].is_null());
        assert_eq!(json["city"], "Lagos");
    }

    #[test]
    fn timestamps_format_as_utc_rfc3339() {
        assert_eq!(
            to_rfc3339(datetime!(2025-06-01 23:59:59)),
            "2025-06-01T23:59:59Z"
        );
    }
}
