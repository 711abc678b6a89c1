use anyhow::Context;
use chrono::NaiveDate;

use crate::config::Config;
use crate::models::ResultSource;
use crate::services::OffersQuery;
use crate::state::SharedState;

pub async fn cmd_offers(
    config: &Config,
    hotel_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    adults: u32,
) -> anyhow::Result<()> {
    if check_out <= check_in {
        anyhow::bail!("Check-out must be after check-in");
    }

    let state = SharedState::new(config.clone())?;
    let query = OffersQuery {
        check_in,
        check_out,
        adults,
        children: 0,
    };

    let offers = state
        .hotel_service
        .offers(hotel_id, &query)
        .await
        .with_context(|| format!("Failed to get offers for {hotel_id}"))?;

    if offers.offers.is_empty() {
        println!("No offers available for {hotel_id} on these dates");
        return Ok(());
    }

    if let Some(hotel) = &offers.hotel {
        println!("{} [{}]", hotel.name, hotel.hotel_id);
    }
    if offers.source == Some(ResultSource::Fallback) {
        println!("(Amadeus unavailable, showing generated placeholder offers)");
    }

    println!("{:-<70}", "");
    for offer in &offers.offers {
        println!("• {} | {}", offer.offer.id, offer.formatted_price);
        println!("  {} | bed: {}", offer.room_description, offer.bed_type);
        println!("  {}", offer.cancellation_policy);
    }

    Ok(())
}
