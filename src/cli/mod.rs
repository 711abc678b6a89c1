//! Command-line interface for jetset.

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Jetset - travel search backend
/// Hotel and flight search on top of the Amadeus API
#[derive(Parser)]
#[command(name = "jetset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Search hotels in a city
    #[command(alias = "s")]
    Search {
        /// IATA city code, e.g. PAR
        city: String,
        /// Check-in date (YYYY-MM-DD)
        check_in: NaiveDate,
        /// Check-out date (YYYY-MM-DD)
        check_out: NaiveDate,
        /// Number of adults
        #[arg(long, default_value = "2")]
        adults: u32,
    },

    /// List popular destinations
    #[command(alias = "dest")]
    Destinations,

    /// Show room offers for a hotel
    Offers {
        /// Amadeus hotel id, e.g. HLPAR266
        hotel_id: String,
        /// Check-in date (YYYY-MM-DD)
        check_in: NaiveDate,
        /// Check-out date (YYYY-MM-DD)
        check_out: NaiveDate,
        /// Number of adults
        #[arg(long, default_value = "1")]
        adults: u32,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
