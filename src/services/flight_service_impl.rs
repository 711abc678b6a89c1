//! Amadeus-backed implementation of the `FlightService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

use super::flight_service::{FlightError, FlightService};
use crate::clients::AmadeusClient;
use crate::models::{FlightOffer, FlightOrder, FlightSearch};

pub struct AmadeusFlightService {
    client: Arc<AmadeusClient>,
    currency: String,
}

impl AmadeusFlightService {
    #[must_use]
    pub fn new(client: Arc<AmadeusClient>, currency: impl Into<String>) -> Self {
        Self {
            client,
            currency: currency.into(),
        }
    }
}

#[async_trait]
impl FlightService for AmadeusFlightService {
    #[instrument(skip(self), fields(origin = %search.origin, destination = %search.destination))]
    async fn search(&self, search: &FlightSearch) -> Result<Vec<FlightOffer>, FlightError> {
        let token = self.client.access_token().await?;
        let offers = self
            .client
            .flight_offers(&token, search, &self.currency)
            .await?;

        info!(count = offers.data.len(), "Flight search complete");
        Ok(offers.data)
    }

    async fn create_order(&self, body: Value) -> Result<FlightOrder, FlightError> {
        if !body.get("data").is_some_and(Value::is_object) {
            return Err(FlightError::Validation(
                "Request body must contain a data object".to_string(),
            ));
        }

        let token = self.client.access_token().await?;
        let order: FlightOrder = self.client.create_flight_order(&token, &body).await?.into();

        info!(
            order_id = %order.id,
            booking_reference = %order.booking_reference,
            "Flight order created"
        );
        Ok(order)
    }
}
