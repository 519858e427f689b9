use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use time::PrimitiveDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::entities::shipment::ShipmentStatus;

/// One immutable entry of a shipment's history. Rows are append-only; the
/// monotonic id makes insertion order the chronological order.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize)]
pub struct TrackingEvent {
    pub id: i64,
    pub shipment_id: Uuid,
    pub status: ShipmentStatus,
    pub city: String,
    pub country: String,
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: PrimitiveDateTime,
}

const EVENT_COLUMNS: &str =
    "id, shipment_id, status, city, country, message, lat, lng, created_at";

#[derive(Debug, Clone)]
pub struct NewTrackingEvent {
    pub shipment_id: Uuid,
    pub status: ShipmentStatus,
    pub city: String,
    pub country: String,
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Appends one event. Caller owns the connection so the append commits
/// together with the status write it records.
#[instrument(skip_all, name = "SQL:AppendTrackingEvent", err)]
pub async fn append_event(
    conn: &mut sqlx::PgConnection,
    new: &NewTrackingEvent,
) -> Result<TrackingEvent, sqlx::Error> {
    sqlx::query_as::<_, TrackingEvent>(&format!(
        r#"
        INSERT INTO "logistics"."tracking_event"
            (shipment_id, status, city, country, message, lat, lng)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(new.shipment_id)
    .bind(new.status)
    .bind(&new.city)
    .bind(&new.country)
    .bind(&new.message)
    .bind(new.lat)
    .bind(new.lng)
    .fetch_one(&mut *conn)
    .await
}

#[derive(Debug, Clone, Copy)]
pub struct ListEventsForShipment {
    pub shipment_id: Uuid,
}

impl Processor<ListEventsForShipment, Result<Vec<TrackingEvent>, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:ListEventsForShipment", err)]
    async fn process(
        &self,
        input: ListEventsForShipment,
    ) -> Result<Vec<TrackingEvent>, sqlx::Error> {
        sqlx::query_as::<_, TrackingEvent>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM "logistics"."tracking_event"
            WHERE shipment_id = $1
            ORDER BY id ASC
            "#
        ))
        .bind(input.shipment_id)
        .fetch_all(self.db())
        .await
    }
}
