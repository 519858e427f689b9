use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use sqlx::types::Json;
use time::PrimitiveDateTime;
use tracing::instrument;
use uuid::Uuid;

/// One side of a shipment (sender or receiver). Free-form contact data,
/// stored as a JSONB document on the shipment row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Party {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Shipment {
    pub id: Uuid,
    pub tracking_number: String,
    pub sender: Json<Party>,
    pub receiver: Json<Party>,
    pub origin: String,
    pub destination: String,
    pub weight: Decimal,
    pub quantity: i32,
    pub price: Decimal,
    pub estimated_delivery: String,
    pub status: ShipmentStatus,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl Shipment {
    /// Derived, never stored: a shipment is delivered iff its status is the
    /// terminal one. Keeping this computed avoids a second source of truth.
    pub fn is_delivered(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Fixed status vocabulary. Stored as text (snake_case) in Postgres,
/// serialized with the human-facing labels on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Customs Clearance")]
    CustomsClearance,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
}

impl ShipmentStatus {
    /// Delivered is terminal: once set, the shipment accepts no transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Pending is assigned by the system at creation and is not a valid
    /// target for an admin-driven update.
    pub fn is_admin_assignable(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::CustomsClearance => "Customs Clearance",
            Self::OnHold => "On Hold",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        };
        f.write_str(label)
    }
}

const SHIPMENT_COLUMNS: &str = "id, tracking_number, sender, receiver, origin, destination, \
     weight, quantity, price, estimated_delivery, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct NewShipment {
    pub tracking_number: String,
    pub sender: Party,
    pub receiver: Party,
    pub origin: String,
    pub destination: String,
    pub weight: Decimal,
    pub quantity: i32,
    pub price: Decimal,
    pub estimated_delivery: String,
}

/// Inserts a shipment with status Pending. Runs on a caller-owned
/// connection so the initial tracking event commits in the same transaction.
#[instrument(skip_all, name = "SQL:InsertShipment", err)]
pub async fn insert_shipment(
    conn: &mut sqlx::PgConnection,
    new: &NewShipment,
) -> Result<Shipment, sqlx::Error> {
    sqlx::query_as::<_, Shipment>(&format!(
        r#"
        INSERT INTO "logistics"."shipment"
            (tracking_number, sender, receiver, origin, destination,
             weight, quantity, price, estimated_delivery, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {SHIPMENT_COLUMNS}
        "#
    ))
    .bind(&new.tracking_number)
    .bind(Json(&new.sender))
    .bind(Json(&new.receiver))
    .bind(&new.origin)
    .bind(&new.destination)
    .bind(new.weight)
    .bind(new.quantity)
    .bind(new.price)
    .bind(&new.estimated_delivery)
    .bind(ShipmentStatus::Pending)
    .fetch_one(&mut *conn)
    .await
}

/// Loads the row with `FOR UPDATE` so the terminal-lock check and the
/// status write observe the same state.
#[instrument(skip_all, name = "SQL:LockShipment", err)]
pub async fn lock_shipment(
    conn: &mut sqlx::PgConnection,
    id: Uuid,
) -> Result<Option<Shipment>, sqlx::Error> {
    sqlx::query_as::<_, Shipment>(&format!(
        r#"
        SELECT {SHIPMENT_COLUMNS}
        FROM "logistics"."shipment"
        WHERE id = $1
        FOR UPDATE
        "#
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

#[instrument(skip_all, name = "SQL:UpdateShipmentStatus", err)]
pub async fn update_shipment_status(
    conn: &mut sqlx::PgConnection,
    id: Uuid,
    status: ShipmentStatus,
) -> Result<Shipment, sqlx::Error> {
    sqlx::query_as::<_, Shipment>(&format!(
        r#"
        UPDATE "logistics"."shipment"
        SET status = $2, updated_at = (now() at time zone 'utc')
        WHERE id = $1
        RETURNING {SHIPMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .fetch_one(&mut *conn)
    .await
}

#[derive(Debug, Clone)]
pub struct FindShipmentByTrackingNumber {
    pub tracking_number: String,
}

impl Processor<FindShipmentByTrackingNumber, Result<Option<Shipment>, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:FindShipmentByTrackingNumber", err)]
    async fn process(
        &self,
        input: FindShipmentByTrackingNumber,
    ) -> Result<Option<Shipment>, sqlx::Error> {
        sqlx::query_as::<_, Shipment>(&format!(
            r#"
            SELECT {SHIPMENT_COLUMNS}
            FROM "logistics"."shipment"
            WHERE tracking_number = $1
            "#
        ))
        .bind(&input.tracking_number)
        .fetch_optional(self.db())
        .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListShipments;

impl Processor<ListShipments, Result<Vec<Shipment>, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:ListShipments", err)]
    async fn process(&self, _input: ListShipments) -> Result<Vec<Shipment>, sqlx::Error> {
        sqlx::query_as::<_, Shipment>(&format!(
            r#"
            SELECT {SHIPMENT_COLUMNS}
            FROM "logistics"."shipment"
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(self.db())
        .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteShipment {
    pub id: Uuid,
}

impl Processor<DeleteShipment, Result<bool, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:DeleteShipment", err)]
    async fn process(&self, input: DeleteShipment) -> Result<bool, sqlx::Error> {
        // The event log is owned by the shipment; the FK cascade removes it.
        let delete_result = sqlx::query(
            r#"
            DELETE FROM "logistics"."shipment"
            WHERE id = $1
            "#,
        )
        .bind(input.id)
        .execute(self.db())
        .await?;
        Ok(delete_result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_is_the_only_terminal_status() {
        for status in [
            ShipmentStatus::Pending,
            ShipmentStatus::InTransit,
            ShipmentStatus::CustomsClearance,
            ShipmentStatus::OnHold,
            ShipmentStatus::OutForDelivery,
        ] {
            assert!(!status.is_terminal(), "{status} must not be terminal");
        }
        assert!(ShipmentStatus::Delivered.is_terminal());
    }

    #[test]
    fn pending_is_not_admin_assignable() {
        assert!(!ShipmentStatus::Pending.is_admin_assignable());
        assert!(ShipmentStatus::InTransit.is_admin_assignable());
        assert!(ShipmentStatus::Delivered.is_admin_assignable());
    }

    #[test]
    fn status_wire_labels_match_the_public_vocabulary() {
        let labels = [
            (ShipmentStatus::Pending, "Pending"),
            (ShipmentStatus::InTransit, "In Transit"),
            (ShipmentStatus::CustomsClearance, "Customs Clearance"),
            (ShipmentStatus::OnHold, "On Hold"),
            (ShipmentStatus::OutForDelivery, "Out for Delivery"),
            (ShipmentStatus::Delivered, "Delivered"),
        ];
        for (status, label) in labels {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{label}\""));
            assert_eq!(status.to_string(), label);
            let parsed: ShipmentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        assert!(serde_json::from_str::<ShipmentStatus>("\"Lost\"").is_err());
        // The admin UI of an earlier iteration sent this misspelling.
        assert!(serde_json::from_str::<ShipmentStatus>("\"Custom Clearance\"").is_err());
    }
}
