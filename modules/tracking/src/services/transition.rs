use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use tracing::instrument;
use uuid::Uuid;

use crate::entities::shipment::{self, Shipment, ShipmentStatus};
use crate::entities::tracking_event::{self, NewTrackingEvent};
use crate::Error;

/// Gatekeeper for all status mutation. Every accepted change writes the
/// shipment row and appends one history event in the same transaction.
#[derive(Clone)]
pub struct StatusTransitionService {
    pub db: DatabaseProcessor,
}

#[derive(Debug, Clone)]
pub struct ApplyStatus {
    pub shipment_id: Uuid,
    pub status: ShipmentStatus,
    pub city: String,
    pub country: String,
    pub message: Option<String>,
    /// Optional explicit coordinates. Nothing is geocoded here; the
    /// tracking view skips events without coordinates.
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// The transition rule, separated from persistence:
/// a Delivered shipment is locked, and Pending can never be re-assigned.
pub fn check_transition(current: ShipmentStatus, requested: ShipmentStatus) -> Result<(), Error> {
    if current.is_terminal() {
        return Err(Error::InvalidTransition);
    }
    if !requested.is_admin_assignable() {
        return Err(Error::validation(
            "Pending is assigned at creation and cannot be applied as an update",
        ));
    }
    Ok(())
}

impl ApplyStatus {
    fn validate(&self) -> Result<(), Error> {
        if self.city.trim().is_empty() {
            return Err(Error::validation("city is required"));
        }
        if self.country.trim().is_empty() {
            return Err(Error::validation("country is required"));
        }
        Ok(())
    }
}

/// An accepted transition: the new status plus the single history event
/// that records it. The executor writes both or neither.
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    pub status: ShipmentStatus,
    pub event: NewTrackingEvent,
}

/// Decides a transition without touching the database. Exactly one event
/// comes out of every accepted plan.
pub fn plan_transition(current: ShipmentStatus, input: ApplyStatus) -> Result<TransitionPlan, Error> {
    input.validate()?;
    check_transition(current, input.status)?;
    Ok(TransitionPlan {
        status: input.status,
        event: NewTrackingEvent {
            shipment_id: input.shipment_id,
            status: input.status,
            city: input.city,
            country: input.country,
            message: input.message.filter(|s| !s.trim().is_empty()),
            lat: input.lat,
            lng: input.lng,
        },
    })
}

impl Processor<ApplyStatus, Result<Shipment, Error>> for StatusTransitionService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: ApplyStatus) -> Result<Shipment, Error> {
        let mut tx = self.db.begin().await.map_err(Error::Database)?;

        // Row lock first: an unknown id is NotFound before any field check,
        // and the terminal check and the write see the same state.
        let current = shipment::lock_shipment(&mut *tx, input.shipment_id)
            .await?
            .ok_or(Error::NotFound)?;
        let plan = plan_transition(current.status, input)?;

        let updated =
            shipment::update_shipment_status(&mut *tx, current.id, plan.status).await?;
        tracking_event::append_event(&mut *tx, &plan.event).await?;
        tx.commit().await.map_err(Error::Database)?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShipmentStatus::*;

    #[test]
    fn fresh_shipment_accepts_every_admin_status() {
        for status in [InTransit, CustomsClearance, OnHold, OutForDelivery, Delivered] {
            assert!(check_transition(Pending, status).is_ok());
        }
    }

    #[test]
    fn delivered_shipment_rejects_any_further_transition() {
        for status in [InTransit, CustomsClearance, OnHold, OutForDelivery, Delivered] {
            assert!(matches!(
                check_transition(Delivered, status),
                Err(Error::InvalidTransition)
            ));
        }
    }

    #[test]
    fn pending_cannot_be_reapplied() {
        assert!(matches!(
            check_transition(InTransit, Pending),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn blank_location_is_rejected_before_any_database_work() {
        let input = ApplyStatus {
            shipment_id: Uuid::new_v4(),
            status: InTransit,
            city: " ".into(),
            country: "Ghana".into(),
            message: None,
            lat: None,
            lng: None,
        };
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    fn apply(status: ShipmentStatus) -> ApplyStatus {
        ApplyStatus {
            shipment_id: Uuid::nil(),
            status,
            city: "Lagos".into(),
            country: "Nigeria".into(),
            message: None,
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn accepted_plan_carries_exactly_one_event_for_the_new_status() {
        let plan = plan_transition(Pending, apply(InTransit)).unwrap();
        assert_eq!(plan.status, InTransit);
        assert_eq!(plan.event.status, InTransit);
        assert_eq!(plan.event.city, "Lagos");
    }

    #[test]
    fn history_grows_by_one_event_per_successful_transition_in_applied_order() {
        // Creation writes the initial Pending event; each accepted plan
        // appends its single event after it.
        let mut current = Pending;
        let mut history = vec![Pending];
        for step in [InTransit, OutForDelivery, Delivered] {
            let plan = plan_transition(current, apply(step)).unwrap();
            history.push(plan.event.status);
            current = plan.status;
        }
        assert_eq!(history, vec![Pending, InTransit, OutForDelivery, Delivered]);

        // A rejected transition leaves the history untouched.
        assert!(plan_transition(current, apply(OnHold)).is_err());
        assert_eq!(history.len(), 4);
    }

    /// The tracked journey from the admin's point of view: Lagos origin,
    /// a transit hop, delivery, then a rejected late update.
    #[test]
    fn delivery_locks_the_shipment_for_good() {
        let mut current = Pending;
        for step in [InTransit, Delivered] {
            check_transition(current, step).unwrap();
            current = step;
        }
        assert!(current.is_terminal());
        assert!(matches!(
            check_transition(current, OnHold),
            Err(Error::InvalidTransition)
        ));
    }
}
