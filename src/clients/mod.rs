pub mod amadeus;

pub use amadeus::{
    AmadeusClient, AmadeusCollection, AmadeusCredentials, AmadeusError, HotelOffersQuery,
    UpstreamIssue,
};
