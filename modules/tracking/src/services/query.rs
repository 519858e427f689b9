use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use tracing::instrument;

use crate::entities::shipment::{FindShipmentByTrackingNumber, Shipment};
use crate::entities::tracking_event::{ListEventsForShipment, TrackingEvent};
use crate::Error;

/// Read side of the tracking number lookup. Public tracking page and admin
/// detail view share this contract; authorization happens upstream.
#[derive(Clone)]
pub struct TrackingQueryService {
    pub db: DatabaseProcessor,
}

#[derive(Debug, Clone)]
pub struct ResolveTracking {
    pub tracking_number: String,
}

#[derive(Debug, Clone)]
pub struct TrackingRecord {
    pub shipment: Shipment,
    /// Oldest first, matching the order the transitions were applied.
    pub history: Vec<TrackingEvent>,
}

impl Processor<ResolveTracking, Result<TrackingRecord, Error>> for TrackingQueryService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: ResolveTracking) -> Result<TrackingRecord, Error> {
        let shipment = self
            .db
            .process(FindShipmentByTrackingNumber {
                tracking_number: input.tracking_number,
            })
            .await?
            .ok_or(Error::NotFound)?;

        let history = self
            .db
            .process(ListEventsForShipment {
                shipment_id: shipment.id,
            })
            .await?;

        Ok(TrackingRecord { shipment, history })
    }
}
