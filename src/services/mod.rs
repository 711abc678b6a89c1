pub mod booking;
pub use booking::BookingStub;

pub mod destinations;
pub use destinations::DestinationCatalog;

pub mod fallback;
pub mod normalizer;

pub mod hotel_service;
pub mod hotel_service_impl;
pub use hotel_service::{HotelError, HotelSearchQuery, HotelService, OffersQuery};
pub use hotel_service_impl::AmadeusHotelService;

pub mod flight_service;
pub mod flight_service_impl;
pub use flight_service::{FlightError, FlightService};
pub use flight_service_impl::AmadeusFlightService;

pub mod payment;
pub use payment::{MockPaymentGateway, PaymentError};
