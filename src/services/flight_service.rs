//! Domain service for flight search and flight orders.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::clients::AmadeusError;
use crate::models::{FlightOffer, FlightOrder, FlightSearch};

#[derive(Debug, Error)]
pub enum FlightError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] AmadeusError),
}

#[async_trait]
pub trait FlightService: Send + Sync {
    async fn search(&self, search: &FlightSearch) -> Result<Vec<FlightOffer>, FlightError>;

    /// Forwards a `{"data": {...}}` order body and reshapes the answer.
    async fn create_order(&self, body: Value) -> Result<FlightOrder, FlightError>;
}
