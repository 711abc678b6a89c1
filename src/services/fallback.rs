//! Placeholder hotels and offers used when Amadeus fails or has nothing.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use super::normalizer::{enrich_offer, format_price};
use crate::models::{
    Address, Destination, EnrichedOffer, Hotel, HotelOffer, OfferPrice, OfferRoom, ResultSource,
    Text, TypeEstimated,
};

const HOTEL_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&auto=format&fit=crop&w=1470&q=80",
    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?auto=format&fit=crop&w=1470&q=80",
    "https://images.unsplash.com/photo-1590490360182-c33d57733427?auto=format&fit=crop&w=1470&q=80",
    "https://images.unsplash.com/photo-1582719508461-905c673771fd?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1564501049412-61c2a3083791?auto=format&fit=crop&w=1470&q=80",
];

const AMENITY_SETS: &[&[&str]] = &[
    &["WiFi", "Room Service", "Restaurant"],
    &["WiFi", "Pool", "Fitness Center"],
    &["WiFi", "Breakfast", "Parking"],
    &["WiFi", "Spa", "Bar"],
    &["WiFi", "Airport Shuttle", "Conference Room"],
];

const ROOM_TYPES: &[&str] = &["STANDARD_ROOM", "DELUXE_ROOM", "EXECUTIVE_ROOM", "SUITE"];

const BOARD_TYPES: &[&str] = &["ROOM_ONLY", "BREAKFAST_INCLUDED", "HALF_BOARD", "FULL_BOARD"];

fn hotel_names(city: &str) -> [String; 8] {
    [
        format!("{city} Grand Hotel"),
        format!("{city} Plaza Resort"),
        format!("Royal {city} Hotel"),
        format!("{city} Luxury Suites"),
        format!("{city} Executive Inn"),
        format!("{city} Palace Hotel"),
        format!("{city} Continental"),
        format!("{city} International"),
    ]
}

/// Five to eight hotels named after the city.
pub fn generate_hotels<R: Rng + ?Sized>(
    rng: &mut R,
    city_code: &str,
    city: &Destination,
    currency: &str,
) -> Vec<Hotel> {
    let names = hotel_names(&city.name);
    let count = rng.random_range(5..=8).min(names.len());
    let id_prefix = city_code.to_ascii_lowercase();

    names
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| {
            let price = format!("{:.2}", rng.random_range(100.0..400.0));
            let rating = format!("{:.1}", rng.random_range(4.0..5.0));
            let image = HOTEL_IMAGES[i % HOTEL_IMAGES.len()].to_string();
            let id = format!("{id_prefix}-{i}");

            Hotel {
                id: id.clone(),
                hotel_id: id,
                name,
                city_code: city_code.to_ascii_uppercase(),
                city_name: city.name.clone(),
                location: format!("{}, {}", city.name, city.country),
                rating: Some(rating),
                formatted_price: Some(format_price(&price, currency)),
                price: Some(price),
                currency: currency.to_string(),
                image: Some(image.clone()),
                images: vec![image],
                amenities: AMENITY_SETS[i % AMENITY_SETS.len()]
                    .iter()
                    .map(|a| (*a).to_string())
                    .collect(),
                address: Address {
                    city_name: Some(city.name.clone()),
                    country_name: Some(city.country.clone()),
                    ..Default::default()
                },
                geo_code: None,
                offers: Vec::new(),
                source: ResultSource::Fallback,
            }
        })
        .collect()
}

/// Whole nights between the dates, never less than one.
#[must_use]
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    u32::try_from((check_out - check_in).num_days()).map_or(1, |n| n.max(1))
}

/// Three to five offers on a shared random nightly base, each 20% pricier
/// than the previous one.
pub fn generate_offers<R: Rng + ?Sized>(
    rng: &mut R,
    hotel_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    currency: &str,
) -> Vec<EnrichedOffer> {
    let nights = f64::from(nights_between(check_in, check_out));
    let base = f64::from(rng.random_range(100_u32..400));
    let count = rng.random_range(3..=5_usize);

    (0..count)
        .map(|i| {
            let room_type = ROOM_TYPES[i % ROOM_TYPES.len()];
            let board_type = BOARD_TYPES.choose(rng).copied().unwrap_or(BOARD_TYPES[0]);
            #[allow(clippy::cast_precision_loss)]
            let nightly = base * (1.0 + 0.2 * i as f64);
            let total = nightly * nights;
            let (beds, bed_type) = if i < 2 { (1, "KING") } else { (2, "TWIN") };

            let mut extra = Map::new();
            extra.insert("roomType".to_string(), Value::from(room_type));

            let offer = HotelOffer {
                id: format!("offer-{hotel_id}-{i}"),
                check_in_date: Some(check_in.to_string()),
                check_out_date: Some(check_out.to_string()),
                board_type: Some(board_type.to_string()),
                room: Some(OfferRoom {
                    room_type: Some(room_type.to_string()),
                    type_estimated: Some(TypeEstimated {
                        category: Some(room_type.to_string()),
                        beds: Some(beds),
                        bed_type: Some(bed_type.to_string()),
                    }),
                    description: Some(Text::new(format!(
                        "Spacious {} with all amenities.",
                        room_type.replacen('_', " ", 1).to_lowercase()
                    ))),
                    amenities: None,
                    extra: Map::new(),
                }),
                price: OfferPrice {
                    currency: currency.to_string(),
                    total: format!("{total:.2}"),
                    base: Some(format!("{nightly:.2}")),
                    taxes: Some(Value::from(format!("{:.2}", total * 0.1))),
                    extra: Map::new(),
                },
                policies: None,
                cancellable: Some(rng.random_bool(0.7)),
                extra,
            };

            enrich_offer(offer)
        })
        .collect()
}
