//! Domain service for hotel search, offers, details and booking.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::clients::{AmadeusCollection, AmadeusError};
use crate::models::{
    Booking, BookingRequest, Destination, HotelDetails, HotelOffers, HotelOffersEntry,
    HotelSearchResults,
};

#[derive(Debug, Error)]
pub enum HotelError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] AmadeusError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelSearchQuery {
    pub city_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffersQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
}

#[async_trait]
pub trait HotelService: Send + Sync {
    async fn destinations(&self) -> Vec<Destination>;

    /// Raw by-city lookup payload.
    async fn list_hotels(&self, city_code: &str) -> Result<Value, HotelError>;

    /// Lookup, offers and normalization, with generated hotels substituted
    /// when fallback is enabled and Amadeus fails or returns nothing.
    async fn search(&self, query: &HotelSearchQuery) -> Result<HotelSearchResults, HotelError>;

    async fn offers(&self, hotel_id: &str, query: &OffersQuery) -> Result<HotelOffers, HotelError>;

    async fn details(&self, hotel_id: &str) -> Result<HotelDetails, HotelError>;

    /// Best-rate offers for the first hotel in the city, `None` when it has
    /// nothing for the dates.
    async fn check_availability(
        &self,
        query: &HotelSearchQuery,
    ) -> Result<Option<AmadeusCollection<HotelOffersEntry>>, HotelError>;

    async fn book(&self, hotel_id: &str, request: BookingRequest) -> Result<Booking, HotelError>;
}
