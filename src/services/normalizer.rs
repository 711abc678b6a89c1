//! Reshapes Amadeus payloads into what the frontend renders.

use std::collections::HashMap;

use crate::constants::defaults;
use crate::models::{
    Address, Destination, EnrichedOffer, Hotel, HotelDetails, HotelOffer, HotelOffersEntry,
    HotelRecord, ResultSource,
};

/// Real properties first, sandbox test properties after, original order
/// otherwise preserved. At most `limit` are kept.
#[must_use]
pub fn prioritize_hotels(hotels: Vec<HotelRecord>, limit: usize) -> Vec<HotelRecord> {
    let (test, mut real): (Vec<_>, Vec<_>) =
        hotels.into_iter().partition(HotelRecord::is_test_property);
    real.extend(test);
    real.truncate(limit);
    real
}

/// `"$<total> <currency>"` with two decimals when the total parses.
#[must_use]
pub fn format_price(total: &str, currency: &str) -> String {
    match total.trim().parse::<f64>() {
        Ok(amount) => format!("${amount:.2} {currency}"),
        Err(_) => format!("${total} {currency}"),
    }
}

#[must_use]
pub fn enrich_offer(offer: HotelOffer) -> EnrichedOffer {
    let room = offer.room.as_ref();

    let room_description = room
        .and_then(|r| r.description.as_ref())
        .map(|d| d.text.clone())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| defaults::ROOM_DESCRIPTION.to_string());

    let bed_type = room
        .and_then(|r| r.type_estimated.as_ref())
        .and_then(|t| t.bed_type.clone())
        .unwrap_or_else(|| defaults::BED_TYPE.to_string());

    let amenities = room.and_then(|r| r.amenities.clone()).unwrap_or_default();

    let cancellation_policy = offer
        .policies
        .as_ref()
        .and_then(|p| p.cancellation.as_ref())
        .and_then(|c| c.description.as_ref())
        .map(|d| d.text.clone())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| defaults::CANCELLATION_POLICY.to_string());

    EnrichedOffer {
        formatted_price: format_price(&offer.price.total, &offer.price.currency),
        room_description,
        cancellation_policy,
        bed_type,
        amenities,
        offer,
    }
}

fn placeholder_image(hotel_id: &str) -> String {
    format!("{}{hotel_id}", defaults::PLACEHOLDER_IMAGE)
}

fn cheapest(offers: &[EnrichedOffer]) -> Option<&EnrichedOffer> {
    offers
        .iter()
        .filter_map(|o| o.offer.total_amount().map(|amount| (amount, o)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, offer)| offer)
}

/// Builds one display hotel from a lookup record and the offers Amadeus
/// returned for it.
#[must_use]
pub fn normalize_hotel(
    record: HotelRecord,
    offers: Vec<HotelOffer>,
    city_code: &str,
    city: &Destination,
    default_currency: &str,
) -> Hotel {
    let offers: Vec<EnrichedOffer> = offers.into_iter().map(enrich_offer).collect();

    let (price, formatted_price, currency) = cheapest(&offers).map_or_else(
        || (None, None, default_currency.to_string()),
        |best| {
            let amount = best.offer.total_amount().unwrap_or_default();
            (
                Some(format!("{amount:.2}")),
                Some(best.formatted_price.clone()),
                best.offer.price.currency.clone(),
            )
        },
    );

    let images = match record.media.as_deref() {
        Some(media) if !media.is_empty() => media.iter().map(|m| m.uri.clone()).collect(),
        _ => vec![placeholder_image(&record.hotel_id)],
    };

    let amenities = record
        .amenities
        .clone()
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| defaults::AMENITIES.iter().map(|a| (*a).to_string()).collect());

    let mut address = record.address.clone().unwrap_or_default();
    address.city_name.get_or_insert_with(|| city.name.clone());
    address.country_name.get_or_insert_with(|| city.country.clone());

    Hotel {
        id: record.hotel_id.clone(),
        hotel_id: record.hotel_id,
        name: record.name,
        city_code: city_code.to_string(),
        city_name: city.name.clone(),
        location: format!("{}, {}", city.name, city.country),
        rating: record.rating,
        price,
        formatted_price,
        currency,
        image: images.first().cloned(),
        images,
        amenities,
        address,
        geo_code: record.geo_code,
        offers,
        source: ResultSource::Amadeus,
    }
}

/// Joins lookup records with offer entries by hotel id, in lookup order.
/// Hotels without an available offer entry are dropped.
#[must_use]
pub fn normalize_search(
    records: Vec<HotelRecord>,
    entries: Vec<HotelOffersEntry>,
    city_code: &str,
    city: &Destination,
    default_currency: &str,
) -> Vec<Hotel> {
    let mut offers_by_id: HashMap<String, HotelOffersEntry> = entries
        .into_iter()
        .filter(|entry| entry.available && !entry.offers.is_empty())
        .filter_map(|entry| {
            let id = entry.hotel.as_ref()?.hotel_id.clone();
            Some((id, entry))
        })
        .collect();

    records
        .into_iter()
        .filter_map(|record| {
            let entry = offers_by_id.remove(&record.hotel_id)?;
            let record = merge_records(record, entry.hotel);
            Some(normalize_hotel(record, entry.offers, city_code, city, default_currency))
        })
        .collect()
}

/// Lookup data wins; the offer payload fills what the lookup lacks.
fn merge_records(mut lookup: HotelRecord, from_offers: Option<HotelRecord>) -> HotelRecord {
    let Some(other) = from_offers else {
        return lookup;
    };

    if lookup.name.is_empty() {
        lookup.name = other.name;
    }
    lookup.chain_code = lookup.chain_code.or(other.chain_code);
    lookup.geo_code = lookup.geo_code.or(other.geo_code);
    lookup.address = lookup.address.or(other.address);
    lookup.contact = lookup.contact.or(other.contact);
    lookup.description = lookup.description.or(other.description);
    lookup.rating = lookup.rating.or(other.rating);
    lookup.amenities = lookup.amenities.or(other.amenities);
    lookup.media = lookup.media.or(other.media);
    lookup
}

/// The record's own `description` block is replaced by plain text.
#[must_use]
pub fn hotel_details(mut record: HotelRecord) -> HotelDetails {
    let formatted_address = record
        .address
        .as_ref()
        .map_or_else(|| defaults::ADDRESS_UNAVAILABLE.to_string(), Address::formatted);

    let contact = record.contact.as_ref();
    let phone = contact
        .and_then(|c| c.phone.clone())
        .unwrap_or_else(|| defaults::PHONE_UNAVAILABLE.to_string());
    let email = contact
        .and_then(|c| c.email.clone())
        .unwrap_or_else(|| defaults::EMAIL_UNAVAILABLE.to_string());

    let description = record
        .description
        .take()
        .map(|d| d.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| defaults::NO_DESCRIPTION.to_string());

    HotelDetails {
        record,
        formatted_address,
        phone,
        email,
        description,
    }
}
