use chrono::Utc;
use rand::Rng;

use crate::models::{Booking, BookingStatus, GuestDetails, PaymentDetails};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Uppercase alphanumeric code of `len` characters.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())]))
        .collect()
}

/// Confirms any booking it is handed. Nothing is reserved or persisted.
pub struct BookingStub {
    default_currency: String,
}

impl BookingStub {
    #[must_use]
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
        }
    }

    pub fn confirm<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        hotel_id: &str,
        offer_id: &str,
        guests: &GuestDetails,
        payments: &PaymentDetails,
    ) -> Booking {
        Booking {
            booking_id: format!("MOCK-{}", random_code(rng, 8)),
            confirmation_number: format!("CN{}", random_code(rng, 8)),
            status: BookingStatus::Confirmed,
            hotel_id: hotel_id.to_string(),
            offer_id: offer_id.to_string(),
            check_in_date: guests.check_in_date.clone(),
            check_out_date: guests.check_out_date.clone(),
            guest_name: guests.full_name(),
            total_price: payments.amount.clone(),
            currency: payments
                .currency
                .clone()
                .unwrap_or_else(|| self.default_currency.clone()),
            booking_date: Utc::now(),
        }
    }
}
