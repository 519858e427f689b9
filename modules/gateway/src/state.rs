use admin::services::admin_auth::AdminAuthService;
use framework::sqlx::DatabaseProcessor;
use intake::services::intake::IntakeService;
use tracking::services::query::TrackingQueryService;
use tracking::services::shipments::ShipmentService;
use tracking::services::transition::StatusTransitionService;

#[derive(Clone)]
pub struct AppState {
    pub shipments: ShipmentService,
    pub transitions: StatusTransitionService,
    pub tracking: TrackingQueryService,
    pub intake: IntakeService,
    pub auth: AdminAuthService,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let db = DatabaseProcessor::from_pool(pool);
        Self {
            shipments: ShipmentService { db: db.clone() },
            transitions: StatusTransitionService { db: db.clone() },
            tracking: TrackingQueryService { db: db.clone() },
            intake: IntakeService { db: db.clone() },
            auth: AdminAuthService { db },
        }
    }
}
