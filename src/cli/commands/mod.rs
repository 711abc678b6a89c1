mod destinations;
mod init;
mod offers;
mod search;

pub use destinations::cmd_destinations;
pub use init::cmd_init;
pub use offers::cmd_offers;
pub use search::cmd_search_hotels;
