use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/hotels/book/{hotelId}`. Clients send guests and
/// payments as objects or as Amadeus-style lists, so the parts stay raw JSON
/// and are read best-effort by [`GuestDetails`] and [`PaymentDetails`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub offer_id: Option<Value>,
    #[serde(default)]
    pub guests: Option<Value>,
    #[serde(default)]
    pub payments: Option<Value>,
}

/// Null and blank strings count as missing.
fn provided(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// First element when the client sends a list.
fn first_entry(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl BookingRequest {
    /// Offer id, guest and payment details, or `None` when any is missing.
    #[must_use]
    pub fn into_parts(self) -> Option<(String, GuestDetails, PaymentDetails)> {
        let offer_id = match provided(self.offer_id)? {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };
        let guests = GuestDetails::from_value(&provided(self.guests)?);
        let payments = PaymentDetails::from_value(&provided(self.payments)?);
        Some((offer_id, guests, payments))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
}

impl GuestDetails {
    /// Reads `{firstName, lastName}` or Amadeus' `{name: {firstName, lastName}, contact: {email}}`.
    /// A bare string is taken as the guest's name.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(guest) = first_entry(value) else {
            return Self::default();
        };
        if let Value::String(name) = guest {
            return Self {
                first_name: name.trim().to_string(),
                ..Self::default()
            };
        }

        let name = guest.get("name").filter(|n| n.is_object()).unwrap_or(guest);
        Self {
            first_name: text(name, "firstName").unwrap_or_default(),
            last_name: text(name, "lastName").unwrap_or_default(),
            email: text(guest, "email")
                .or_else(|| guest.get("contact").and_then(|c| text(c, "email"))),
            check_in_date: text(guest, "checkInDate"),
            check_out_date: text(guest, "checkOutDate"),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentDetails {
    /// Echoed back untouched; clients send both numbers and strings.
    pub amount: Value,
    pub currency: Option<String>,
}

impl PaymentDetails {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(payment) = first_entry(value) else {
            return Self::default();
        };
        Self {
            amount: payment.get("amount").cloned().unwrap_or(Value::Null),
            currency: text(payment, "currency"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub confirmation_number: String,
    pub status: BookingStatus,
    pub hotel_id: String,
    pub offer_id: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub guest_name: String,
    pub total_price: Value,
    pub currency: String,
    pub booking_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> BookingRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_reads_flat_objects() {
        let (offer_id, guests, payments) = request(json!({
            "offerId": " OFF1 ",
            "guests": { "firstName": "Ada", "lastName": "Lovelace", "checkInDate": "2026-11-02" },
            "payments": { "amount": 452.1, "currency": "EUR" }
        }))
        .into_parts()
        .unwrap();

        assert_eq!(offer_id, "OFF1");
        assert_eq!(guests.full_name(), "Ada Lovelace");
        assert_eq!(guests.check_in_date.as_deref(), Some("2026-11-02"));
        assert_eq!(payments.amount, json!(452.1));
        assert_eq!(payments.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_reads_amadeus_lists() {
        let (offer_id, guests, payments) = request(json!({
            "offerId": 12345,
            "guests": [{
                "name": { "title": "MS", "firstName": "ADA", "lastName": "LOVELACE" },
                "contact": { "email": "ada@example.com" }
            }],
            "payments": [{ "method": "creditCard", "card": { "vendorCode": "VI" } }]
        }))
        .into_parts()
        .unwrap();

        assert_eq!(offer_id, "12345");
        assert_eq!(guests.full_name(), "ADA LOVELACE");
        assert_eq!(guests.email.as_deref(), Some("ada@example.com"));
        assert_eq!(payments.amount, Value::Null);
        assert!(payments.currency.is_none());
    }

    #[test]
    fn test_string_guest_and_empty_list() {
        let (_, guests, payments) = request(json!({
            "offerId": "OFF1",
            "guests": "Ada Lovelace",
            "payments": []
        }))
        .into_parts()
        .unwrap();

        assert_eq!(guests.full_name(), "Ada Lovelace");
        assert_eq!(payments, PaymentDetails::default());
    }

    #[test]
    fn test_missing_null_or_blank_parts() {
        let full = json!({ "offerId": "OFF1", "guests": {}, "payments": {} });
        assert!(request(full.clone()).into_parts().is_some());

        for (field, value) in [
            ("offerId", Value::Null),
            ("offerId", json!("  ")),
            ("guests", Value::Null),
            ("payments", json!("")),
        ] {
            let mut body = full.clone();
            body[field] = value;
            assert!(request(body).into_parts().is_none(), "{field}");
        }

        assert!(request(json!({ "offerId": "OFF1", "guests": {} })).into_parts().is_none());
    }
}
