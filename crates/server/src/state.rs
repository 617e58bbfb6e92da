use crate::{
    auth::JwtKeys,
    config::Config,
    integrations::{LanguageModel, OpenAiClient, PaymentGateway, StripeGateway},
};
use booking::{AvailabilityReporter, ReservationStore, ReservationValidator};
use database::services::PgReservationStore;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handles every handler can reach
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub validator: ReservationValidator,
    pub availability: AvailabilityReporter,
    pub jwt: JwtKeys,
    /// `None` when no gateway key is configured
    pub payments: Option<Arc<dyn PaymentGateway>>,
    /// `None` when no model key is configured
    pub advisor: Option<Arc<dyn LanguageModel>>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: &Config) -> Self {
        let store: Arc<dyn ReservationStore> =
            Arc::new(PgReservationStore::new(Arc::clone(&db)));

        let payments = config.stripe_secret_key.clone().map(|key| {
            Arc::new(StripeGateway::new(&config.stripe_api_base, key)) as Arc<dyn PaymentGateway>
        });
        let advisor = config.openai_api_key.clone().map(|key| {
            Arc::new(OpenAiClient::new(
                &config.openai_api_base,
                key,
                config.openai_model.clone(),
            )) as Arc<dyn LanguageModel>
        });

        Self::with_parts(
            db,
            store,
            JwtKeys::new(&config.jwt_secret, config.jwt_expiration_minutes),
            payments,
            advisor,
        )
    }

    /// Assembles a state from explicit collaborators
    pub fn with_parts(
        db: Arc<DatabaseConnection>,
        store: Arc<dyn ReservationStore>,
        jwt: JwtKeys,
        payments: Option<Arc<dyn PaymentGateway>>,
        advisor: Option<Arc<dyn LanguageModel>>,
    ) -> Self {
        Self {
            db,
            validator: ReservationValidator::new(Arc::clone(&store)),
            availability: AvailabilityReporter::new(store),
            jwt,
            payments,
            advisor,
        }
    }
}
