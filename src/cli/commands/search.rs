use anyhow::Context;
use chrono::NaiveDate;

use crate::config::Config;
use crate::models::ResultSource;
use crate::services::HotelSearchQuery;
use crate::state::SharedState;

pub async fn cmd_search_hotels(
    config: &Config,
    city: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    adults: u32,
) -> anyhow::Result<()> {
    if check_out <= check_in {
        anyhow::bail!("Check-out must be after check-in");
    }

    let state = SharedState::new(config.clone())?;
    let query = HotelSearchQuery {
        city_code: city.trim().to_ascii_uppercase(),
        check_in,
        check_out,
        adults,
    };

    println!(
        "Searching hotels in {} from {} to {} for {} adult(s)",
        query.city_code, check_in, check_out, adults
    );

    let results = state
        .hotel_service
        .search(&query)
        .await
        .context("Hotel search failed")?;

    if results.data.is_empty() {
        println!("No hotels found for this search");
        return Ok(());
    }

    if results.source == Some(ResultSource::Fallback) {
        println!("(Amadeus unavailable, showing generated placeholder hotels)");
    }

    println!();
    println!("{:-<70}", "");
    for hotel in &results.data {
        println!("• {} [{}]", hotel.name, hotel.hotel_id);
        println!(
            "  {} | rating: {} | from: {}",
            hotel.location,
            hotel.rating.as_deref().unwrap_or("-"),
            hotel.formatted_price.as_deref().unwrap_or("n/a")
        );
    }
    println!();
    println!(
        "To see rooms: jetset offers <hotel-id> {} {}",
        check_in, check_out
    );

    Ok(())
}
