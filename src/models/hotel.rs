use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{EnrichedOffer, Text};

/// Hotel reference record as returned by the Amadeus location endpoints and
/// embedded in hotel offer responses. Fields this service does not read are
/// kept in `extra` so the payload round-trips unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    pub hotel_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_code: Option<GeoCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
    #[serde(
        default,
        deserialize_with = "number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ratings arrive both as `"4"` and as `4`.
fn number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl HotelRecord {
    /// Sandbox inventory is full of placeholder properties named like
    /// "TEST HOTEL X"; they sort after real hotels.
    #[must_use]
    pub fn is_test_property(&self) -> bool {
        self.name.to_ascii_uppercase().contains("TEST")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCode {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

impl Address {
    /// `"<lines>, <city>, <country>"` with missing parts left empty.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, {}",
            self.lines.join(", "),
            self.city_name.as_deref().unwrap_or_default(),
            self.country_name.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Amadeus,
    Fallback,
}

/// A hotel as the search endpoint presents it: upstream data merged with
/// destination metadata and display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub hotel_id: String,
    pub name: String,
    pub city_code: String,
    pub city_name: String,
    pub location: String,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub formatted_price: Option<String>,
    pub currency: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_code: Option<GeoCode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offers: Vec<EnrichedOffer>,
    pub source: ResultSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchResults {
    pub data: Vec<Hotel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ResultSource>,
}

impl HotelSearchResults {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            source: None,
        }
    }

    #[must_use]
    pub fn from_hotels(data: Vec<Hotel>, source: ResultSource) -> Self {
        Self {
            data,
            source: Some(source),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetails {
    #[serde(flatten)]
    pub record: HotelRecord,
    pub formatted_address: String,
    pub phone: String,
    pub email: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "hotelId": "ACPARH29",
            "name": "ACROPOLIS HOTEL PARIS BOULOGNE",
            "chainCode": "AC",
            "dupeId": 700169556,
            "lastUpdate": "2023-06-15T10:18:12",
            "geoCode": { "latitude": 48.83593, "longitude": 2.24922 },
            "address": { "countryCode": "FR" }
        });

        let record: HotelRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.hotel_id, "ACPARH29");
        assert_eq!(record.address.as_ref().unwrap().country_code.as_deref(), Some("FR"));
        assert!(record.extra.contains_key("dupeId"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["dupeId"], 700169556);
        assert_eq!(back["lastUpdate"], "2023-06-15T10:18:12");
    }

    #[test]
    fn test_rating_accepts_numbers() {
        let numeric: HotelRecord =
            serde_json::from_value(serde_json::json!({ "hotelId": "X", "name": "Y", "rating": 4 }))
                .unwrap();
        assert_eq!(numeric.rating.as_deref(), Some("4"));

        let text: HotelRecord =
            serde_json::from_value(serde_json::json!({ "hotelId": "X", "rating": "5" })).unwrap();
        assert_eq!(text.rating.as_deref(), Some("5"));

        let missing: HotelRecord = serde_json::from_value(serde_json::json!({ "hotelId": "X" })).unwrap();
        assert!(missing.rating.is_none());
    }

    #[test]
    fn test_is_test_property() {
        let mut record = HotelRecord {
            hotel_id: "TSPAR001".to_string(),
            name: "Test Property Paris".to_string(),
            ..Default::default()
        };
        assert!(record.is_test_property());

        record.name = "Hotel Lutetia".to_string();
        assert!(!record.is_test_property());
    }

    #[test]
    fn test_address_formatted() {
        let address = Address {
            lines: vec!["45 Boulevard Raspail".to_string()],
            city_name: Some("Paris".to_string()),
            country_name: Some("France".to_string()),
            ..Default::default()
        };
        assert_eq!(address.formatted(), "45 Boulevard Raspail, Paris, France");

        assert_eq!(Address::default().formatted(), ", , ");
    }
}
