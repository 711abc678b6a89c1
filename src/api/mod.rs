use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{FlightService, HotelService};
use crate::state::SharedState;

mod error;
mod flights;
mod hotels;
mod observability;
mod payments;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use observability::REQUEST_ID_HEADER;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn hotels(&self) -> &Arc<dyn HotelService> {
        &self.shared.hotel_service
    }

    #[must_use]
    pub fn flights(&self) -> &Arc<dyn FlightService> {
        &self.shared.flight_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config)?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new().nest("/api", api_router(state)).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(observability::logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer.allow_methods(Any).allow_headers(Any)),
    )
}

fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/hotels/destinations", get(hotels::get_destinations))
        .route("/hotels/list", get(hotels::list_hotels))
        .route(
            "/hotels/search",
            get(hotels::search_hotels_get).post(hotels::search_hotels_post),
        )
        .route("/hotels/check-availability", get(hotels::check_availability))
        .route("/hotels/offers/{hotel_id}", get(hotels::get_offers))
        .route("/hotels/book/{hotel_id}", post(hotels::book_hotel))
        .route("/hotels/details/{hotel_id}", get(hotels::get_details))
        .route("/hotels/{hotel_id}", get(hotels::get_details))
        .route("/flights/search", post(flights::search_flights))
        .route(
            "/flights/booking/flight-orders",
            post(flights::create_flight_order),
        )
        .route("/payments/process", post(payments::process_payment))
        .route("/system/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
}
