//! Amadeus-backed implementation of the `HotelService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::booking::BookingStub;
use super::destinations::DestinationCatalog;
use super::hotel_service::{HotelError, HotelSearchQuery, HotelService, OffersQuery};
use super::{fallback, normalizer};
use crate::clients::{AmadeusClient, AmadeusCollection, HotelOffersQuery};
use crate::config::SearchConfig;
use crate::models::{
    Booking, BookingRequest, Destination, Hotel, HotelDetails, HotelOffers, HotelOffersEntry,
    HotelSearchResults, ResultSource,
};

pub struct AmadeusHotelService {
    client: Arc<AmadeusClient>,
    catalog: Arc<DestinationCatalog>,
    booking: BookingStub,
    settings: SearchConfig,
}

impl AmadeusHotelService {
    #[must_use]
    pub fn new(
        client: Arc<AmadeusClient>,
        catalog: Arc<DestinationCatalog>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            booking: BookingStub::new(settings.default_currency.clone()),
            client,
            catalog,
            settings,
        }
    }

    fn offers_query(&self, hotel_ids: Vec<String>, query: &HotelSearchQuery) -> HotelOffersQuery {
        HotelOffersQuery {
            hotel_ids,
            check_in: query.check_in,
            check_out: query.check_out,
            adults: query.adults,
            children: None,
            currency: self.settings.default_currency.clone(),
            best_rate_only: true,
        }
    }

    async fn search_upstream(
        &self,
        query: &HotelSearchQuery,
        city: &Destination,
    ) -> Result<Vec<Hotel>, HotelError> {
        let token = self.client.access_token().await?;

        let lookup = self
            .client
            .hotels_by_city(&token, &query.city_code, self.settings.lookup_radius_km)
            .await?;
        if lookup.data.is_empty() {
            return Ok(Vec::new());
        }

        let records = normalizer::prioritize_hotels(lookup.data, self.settings.max_hotels);
        let ids = records.iter().map(|r| r.hotel_id.clone()).collect();

        let offers = self
            .client
            .hotel_offers(&token, &self.offers_query(ids, query))
            .await?;

        Ok(normalizer::normalize_search(
            records,
            offers.data,
            &query.city_code,
            city,
            &self.settings.default_currency,
        ))
    }

    async fn offers_upstream(
        &self,
        hotel_id: &str,
        query: &OffersQuery,
    ) -> Result<HotelOffers, HotelError> {
        let token = self.client.access_token().await?;

        let response = self
            .client
            .hotel_offers(
                &token,
                &HotelOffersQuery {
                    hotel_ids: vec![hotel_id.to_string()],
                    check_in: query.check_in,
                    check_out: query.check_out,
                    adults: query.adults,
                    children: Some(query.children),
                    currency: self.settings.default_currency.clone(),
                    best_rate_only: false,
                },
            )
            .await?;

        let Some(entry) = response.data.into_iter().next() else {
            info!(hotel_id, "No offers found");
            return Ok(HotelOffers::empty());
        };

        Ok(HotelOffers {
            hotel: entry.hotel,
            offers: entry.offers.into_iter().map(normalizer::enrich_offer).collect(),
            source: Some(ResultSource::Amadeus),
        })
    }
}

#[async_trait]
impl HotelService for AmadeusHotelService {
    async fn destinations(&self) -> Vec<Destination> {
        self.catalog.list().await.as_ref().clone()
    }

    async fn list_hotels(&self, city_code: &str) -> Result<Value, HotelError> {
        let token = self.client.access_token().await?;
        Ok(self
            .client
            .hotels_by_city_raw(&token, city_code, self.settings.lookup_radius_km)
            .await?)
    }

    #[instrument(skip(self), fields(city_code = %query.city_code))]
    async fn search(&self, query: &HotelSearchQuery) -> Result<HotelSearchResults, HotelError> {
        let city = self.catalog.city_info(&query.city_code).await;

        let reason = match self.search_upstream(query, &city).await {
            Ok(hotels) if !hotels.is_empty() => {
                info!(count = hotels.len(), "Hotel search served from Amadeus");
                return Ok(HotelSearchResults::from_hotels(hotels, ResultSource::Amadeus));
            }
            Ok(_) => "no hotels returned".to_string(),
            Err(err) if !self.settings.fallback_enabled => return Err(err),
            Err(err) => err.to_string(),
        };

        if !self.settings.fallback_enabled {
            info!(%reason, "Hotel search empty, fallback disabled");
            return Ok(HotelSearchResults::empty());
        }

        warn!(%reason, "Hotel search falling back to generated hotels");
        metrics::counter!("search_fallbacks_total", "kind" => "hotels").increment(1);

        let hotels = fallback::generate_hotels(
            &mut rand::rng(),
            &query.city_code,
            &city,
            &self.settings.default_currency,
        );
        Ok(HotelSearchResults::from_hotels(hotels, ResultSource::Fallback))
    }

    #[instrument(skip(self, query))]
    async fn offers(&self, hotel_id: &str, query: &OffersQuery) -> Result<HotelOffers, HotelError> {
        match self.offers_upstream(hotel_id, query).await {
            Ok(offers) => Ok(offers),
            Err(err) if self.settings.fallback_enabled => {
                warn!(error = %err, "Hotel offers falling back to generated offers");
                metrics::counter!("search_fallbacks_total", "kind" => "offers").increment(1);

                Ok(HotelOffers {
                    hotel: None,
                    offers: fallback::generate_offers(
                        &mut rand::rng(),
                        hotel_id,
                        query.check_in,
                        query.check_out,
                        &self.settings.default_currency,
                    ),
                    source: Some(ResultSource::Fallback),
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn details(&self, hotel_id: &str) -> Result<HotelDetails, HotelError> {
        let lookup = async {
            let token = self.client.access_token().await?;
            self.client
                .hotels_by_ids(&token, &[hotel_id.to_string()])
                .await
        };

        let record = lookup
            .await
            .map_err(|err| {
                warn!(hotel_id, error = %err, "Hotel details lookup failed");
                HotelError::NotFound(format!("Hotel not found: {}", err.detail()))
            })?
            .data
            .into_iter()
            .next()
            .ok_or_else(|| HotelError::NotFound("Hotel not found".to_string()))?;

        Ok(normalizer::hotel_details(record))
    }

    async fn check_availability(
        &self,
        query: &HotelSearchQuery,
    ) -> Result<Option<AmadeusCollection<HotelOffersEntry>>, HotelError> {
        let token = self.client.access_token().await?;

        let lookup = self
            .client
            .hotels_by_city(&token, &query.city_code, self.settings.lookup_radius_km)
            .await?;
        let hotel_id = lookup
            .data
            .into_iter()
            .next()
            .map(|hotel| hotel.hotel_id)
            .ok_or_else(|| HotelError::NotFound("No hotels found in this location".to_string()))?;

        let offers = self
            .client
            .hotel_offers(&token, &self.offers_query(vec![hotel_id], query))
            .await?;

        Ok((!offers.data.is_empty()).then_some(offers))
    }

    async fn book(&self, hotel_id: &str, request: BookingRequest) -> Result<Booking, HotelError> {
        let Some((offer_id, guests, payments)) = request.into_parts() else {
            return Err(HotelError::Validation(
                "Missing required booking information: offerId, guests and payments are required"
                    .to_string(),
            ));
        };

        let booking = self
            .booking
            .confirm(&mut rand::rng(), hotel_id, &offer_id, &guests, &payments);

        info!(
            booking_id = %booking.booking_id,
            hotel_id,
            offer_id = %booking.offer_id,
            "Hotel booking confirmed"
        );
        Ok(booking)
    }
}
