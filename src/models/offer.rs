use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{HotelRecord, ResultSource, Text};

/// One `data[]` element of `/v3/shopping/hotel-offers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffersEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelRecord>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub offers: Vec<HotelOffer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<OfferRoom>,
    pub price: OfferPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policies: Option<OfferPolicies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HotelOffer {
    /// Total as a number; Amadeus sends prices as decimal strings.
    #[must_use]
    pub fn total_amount(&self) -> Option<f64> {
        self.price.total.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferPrice {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Amadeus sends an array of tax entries, generated offers a plain amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRoom {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_estimated: Option<TypeEstimated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEstimated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferPolicies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation: Option<CancellationPolicy>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancellationPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Offer plus the display fields the frontend renders directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedOffer {
    #[serde(flatten)]
    pub offer: HotelOffer,
    pub formatted_price: String,
    pub room_description: String,
    pub cancellation_policy: String,
    pub bed_type: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelRecord>,
    pub offers: Vec<EnrichedOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ResultSource>,
}

impl HotelOffers {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            hotel: None,
            offers: Vec::new(),
            source: Some(ResultSource::Amadeus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_amadeus_offer() {
        let raw = serde_json::json!({
            "id": "TSXOJ6LFQ2",
            "checkInDate": "2026-11-02",
            "checkOutDate": "2026-11-04",
            "rateCode": "V0F",
            "room": {
                "type": "ELE",
                "typeEstimated": { "category": "EXECUTIVE_ROOM", "beds": 1, "bedType": "DOUBLE" },
                "description": { "text": "Executive room, city view", "lang": "EN" }
            },
            "guests": { "adults": 1 },
            "price": {
                "currency": "EUR",
                "base": "300.00",
                "total": "331.50",
                "taxes": [{ "code": "TOTAL_TAX", "amount": "31.50" }]
            },
            "policies": {
                "cancellation": { "description": { "text": "NON-REFUNDABLE RATE" }, "type": "FULL_STAY" },
                "paymentType": "deposit"
            }
        });

        let offer: HotelOffer = serde_json::from_value(raw).unwrap();
        assert_eq!(offer.total_amount(), Some(331.5));
        assert_eq!(
            offer.room.as_ref().and_then(|r| r.type_estimated.as_ref()).and_then(|t| t.bed_type.as_deref()),
            Some("DOUBLE")
        );
        assert!(offer.extra.contains_key("rateCode"));

        let back = serde_json::to_value(&offer).unwrap();
        assert_eq!(back["room"]["type"], "ELE");
        assert_eq!(back["policies"]["paymentType"], "deposit");
        assert_eq!(back["price"]["taxes"][0]["code"], "TOTAL_TAX");
    }

    #[test]
    fn test_entry_defaults() {
        let raw = serde_json::json!({ "type": "hotel-offers" });
        let entry: HotelOffersEntry = serde_json::from_value(raw).unwrap();
        assert!(entry.available);
        assert!(entry.offers.is_empty());
        assert!(entry.hotel.is_none());
    }
}
