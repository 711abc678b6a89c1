pub const DEFAULT_CURRENCY: &str = "USD";

pub mod cache {

    pub const DESTINATIONS_TTL_HOURS: u64 = 24;
}

pub mod amadeus {

    pub const TEST_BASE_URL: &str = "https://test.api.amadeus.com";

    pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

    pub const HOTELS_BY_CITY_PATH: &str = "/v1/reference-data/locations/hotels/by-city";

    pub const HOTELS_BY_IDS_PATH: &str = "/v1/reference-data/locations/hotels/by-hotels";

    pub const HOTEL_OFFERS_PATH: &str = "/v3/shopping/hotel-offers";

    pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

    pub const FLIGHT_ORDERS_PATH: &str = "/v1/booking/flight-orders";

    pub const VND_JSON: &str = "application/vnd.amadeus+json";
}

pub mod defaults {

    pub const TRAVELERS: u32 = 2;

    pub const OFFER_ADULTS: u32 = 1;

    pub const ROOM_DESCRIPTION: &str = "Standard Room";

    pub const CANCELLATION_POLICY: &str = "Cancellation policy not available";

    pub const BED_TYPE: &str = "Standard";

    pub const AMENITIES: &[&str] = &["WiFi", "Room Service", "Restaurant"];

    pub const UNKNOWN_COUNTRY: &str = "Unknown";

    pub const ADDRESS_UNAVAILABLE: &str = "Address unavailable";

    pub const PHONE_UNAVAILABLE: &str = "Phone unavailable";

    pub const EMAIL_UNAVAILABLE: &str = "Email unavailable";

    pub const NO_DESCRIPTION: &str = "No description available";

    pub const PLACEHOLDER_IMAGE: &str = "https://source.unsplash.com/random/300x200/?hotel,";
}

pub mod limits {

    pub const MAX_HOTELS: usize = 15;

    pub const MAX_FLIGHT_OFFERS: u32 = 20;

    pub const MAX_TRAVELERS: u32 = 9;
}
