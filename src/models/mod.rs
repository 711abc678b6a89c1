pub mod booking;
pub mod destination;
pub mod flight;
pub mod hotel;
pub mod offer;
pub mod payment;

pub use booking::{Booking, BookingRequest, BookingStatus, GuestDetails, PaymentDetails};
pub use destination::Destination;
pub use flight::{AmadeusFlightOrder, AssociatedRecord, FlightOffer, FlightOrder, FlightSearch, TripType};
pub use hotel::{
    Address, Contact, GeoCode, Hotel, HotelDetails, HotelRecord, HotelSearchResults, Media,
    ResultSource,
};
pub use offer::{
    CancellationPolicy, EnrichedOffer, HotelOffer, HotelOffers, HotelOffersEntry, OfferPolicies,
    OfferPrice, OfferRoom, TypeEstimated,
};
pub use payment::{Payment, PaymentRequest, PaymentStatus};

use serde::{Deserialize, Serialize};

/// Free-text block as Amadeus returns it (`{"text": ..., "lang": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
        }
    }
}
