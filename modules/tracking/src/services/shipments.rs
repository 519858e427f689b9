use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tracing::instrument;
use uuid::Uuid;

use crate::entities::shipment::{
    self, DeleteShipment, ListShipments, NewShipment, Party, Shipment, ShipmentStatus,
};
use crate::entities::tracking_event::{self, NewTrackingEvent};
use crate::utils::tracking_number::generate_tracking_number;
use crate::Error;

#[derive(Clone)]
pub struct ShipmentService {
    pub db: DatabaseProcessor,
}

#[derive(Debug, Clone)]
pub struct CreateShipment {
    pub sender: Party,
    pub receiver: Party,
    pub origin: String,
    pub destination: String,
    pub weight: Decimal,
    pub quantity: i32,
    pub price: Decimal,
    pub estimated_delivery: Option<String>,
    /// Location of the initial Pending event, normally the origin city.
    pub city: String,
    pub country: String,
    pub message: Option<String>,
}

const DEFAULT_ESTIMATED_DELIVERY: &str = "6-10 business days";

impl CreateShipment {
    fn validate(&self) -> Result<(), Error> {
        validate_party("sender", &self.sender)?;
        validate_party("receiver", &self.receiver)?;
        require("origin", &self.origin)?;
        require("destination", &self.destination)?;
        require("city", &self.city)?;
        require("country", &self.country)?;
        if self.weight <= Decimal::ZERO {
            return Err(Error::validation("weight must be a positive number"));
        }
        if self.quantity < 1 {
            return Err(Error::validation("quantity must be a positive integer"));
        }
        if self.price < Decimal::ZERO {
            return Err(Error::validation("price must not be negative"));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn validate_party(side: &str, party: &Party) -> Result<(), Error> {
    require(&format!("{side} name"), &party.name)?;
    require(&format!("{side} phone"), &party.phone)?;
    require(&format!("{side} email"), &party.email)?;
    require(&format!("{side} address"), &party.address)
}

impl Processor<CreateShipment, Result<Shipment, Error>> for ShipmentService {
    /// Creates the shipment and its initial Pending event in one
    /// transaction so no reader sees a shipment with an empty history.
    #[instrument(skip_all, err)]
    async fn process(&self, input: CreateShipment) -> Result<Shipment, Error> {
        input.validate()?;

        let new = NewShipment {
            tracking_number: generate_tracking_number(),
            sender: input.sender,
            receiver: input.receiver,
            origin: input.origin,
            destination: input.destination,
            weight: input.weight,
            quantity: input.quantity,
            price: input.price,
            estimated_delivery: input
                .estimated_delivery
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ESTIMATED_DELIVERY.to_owned()),
        };

        let mut tx = self.db.begin().await.map_err(Error::Database)?;
        let created = shipment::insert_shipment(&mut *tx, &new).await?;
        tracking_event::append_event(
            &mut *tx,
            &NewTrackingEvent {
                shipment_id: created.id,
                status: ShipmentStatus::Pending,
                city: input.city,
                country: input.country,
                message: input.message.filter(|s| !s.trim().is_empty()),
                lat: None,
                lng: None,
            },
        )
        .await?;
        tx.commit().await.map_err(Error::Database)?;

        Ok(created)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListAllShipments;

impl Processor<ListAllShipments, Result<Vec<Shipment>, Error>> for ShipmentService {
    #[instrument(skip_all, err)]
    async fn process(&self, _input: ListAllShipments) -> Result<Vec<Shipment>, Error> {
        Ok(self.db.process(ListShipments).await?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteShipmentById {
    pub id: Uuid,
}

impl Processor<DeleteShipmentById, Result<(), Error>> for ShipmentService {
    /// Irreversible; the event log is deleted with the shipment.
    #[instrument(skip_all, err)]
    async fn process(&self, input: DeleteShipmentById) -> Result<(), Error> {
        let deleted = self.db.process(DeleteShipment { id: input.id }).await?;
        if deleted {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party() -> Party {
        Party {
            name: "Ada Obi".into(),
            phone: "+2348012345678".into(),
            email: "ada@example.com".into(),
            address: "12 Marina Rd, Lagos".into(),
        }
    }

    fn valid_input() -> CreateShipment {
        CreateShipment {
            sender: party(),
            receiver: party(),
            origin: "Lagos".into(),
            destination: "Accra".into(),
            weight: Decimal::new(5, 0),
            quantity: 1,
            price: Decimal::new(50, 0),
            estimated_delivery: None,
            city: "Lagos".into(),
            country: "Nigeria".into(),
            message: None,
        }
    }

    #[test]
    fn valid_creation_input_passes_validation() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let mut input = valid_input();
        input.sender.phone = "  ".into();
        assert!(matches!(input.validate(), Err(Error::Validation(_))));

        let mut input = valid_input();
        input.destination = String::new();
        assert!(matches!(input.validate(), Err(Error::Validation(_))));

        let mut input = valid_input();
        input.country = String::new();
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn non_positive_cargo_numbers_are_rejected() {
        let mut input = valid_input();
        input.weight = Decimal::ZERO;
        assert!(matches!(input.validate(), Err(Error::Validation(_))));

        let mut input = valid_input();
        input.quantity = 0;
        assert!(matches!(input.validate(), Err(Error::Validation(_))));

        let mut input = valid_input();
        input.price = Decimal::new(-1, 0);
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn zero_price_is_allowed() {
        let mut input = valid_input();
        input.price = Decimal::ZERO;
        assert!(input.validate().is_ok());
    }
}
