use std::sync::Arc;

use crate::clients::{AmadeusClient, AmadeusCredentials};
use crate::config::Config;
use crate::services::{
    AmadeusFlightService, AmadeusHotelService, DestinationCatalog, FlightService, HotelService,
    MockPaymentGateway,
};

/// Shared HTTP client for every upstream call, so connections are pooled.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Jetset/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub amadeus: Arc<AmadeusClient>,

    pub hotel_service: Arc<dyn HotelService>,

    pub flight_service: Arc<dyn FlightService>,

    pub payments: Arc<MockPaymentGateway>,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.amadeus.request_timeout_seconds)?;

        let credentials = match (&config.amadeus.api_key, &config.amadeus.api_secret) {
            (Some(api_key), Some(api_secret)) => Some(AmadeusCredentials {
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
            }),
            _ => {
                tracing::warn!("Amadeus credentials missing, upstream calls will fail");
                None
            }
        };

        let amadeus = Arc::new(
            AmadeusClient::with_shared_client(http_client, &config.amadeus.base_url, credentials)
                .map_err(|e| anyhow::anyhow!("Failed to create Amadeus client: {e}"))?,
        );

        let catalog = Arc::new(DestinationCatalog::with_ttl_hours(
            config.search.destination_cache_hours,
        ));

        let hotel_service = Arc::new(AmadeusHotelService::new(
            amadeus.clone(),
            catalog,
            config.search.clone(),
        )) as Arc<dyn HotelService>;

        let flight_service = Arc::new(AmadeusFlightService::new(
            amadeus.clone(),
            config.search.default_currency.clone(),
        )) as Arc<dyn FlightService>;

        let payments = Arc::new(MockPaymentGateway::new(
            config.search.default_currency.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            amadeus,
            hotel_service,
            flight_service,
            payments,
        })
    }
}
