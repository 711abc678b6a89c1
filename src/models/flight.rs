use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

/// Validated flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSearch {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub trip_type: TripType,
    pub travel_class: Option<String>,
    pub max: u32,
}

/// Flight offers are relayed as Amadeus shapes them; only the id is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedRecord {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_system_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_offer_id: Option<String>,
}

/// `data` of a `/v1/booking/flight-orders` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmadeusFlightOrder {
    pub id: String,
    #[serde(default)]
    pub associated_records: Vec<AssociatedRecord>,
    #[serde(default)]
    pub flight_offers: Vec<Value>,
    #[serde(default)]
    pub travelers: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOrder {
    pub id: String,
    pub booking_reference: String,
    pub pnr: Option<String>,
    pub associated_records: Vec<AssociatedRecord>,
    pub flight_offers: Vec<Value>,
    pub travelers: Vec<Value>,
}

impl From<AmadeusFlightOrder> for FlightOrder {
    fn from(order: AmadeusFlightOrder) -> Self {
        let pnr = order
            .associated_records
            .first()
            .map(|record| record.reference.clone());

        Self {
            booking_reference: pnr.clone().unwrap_or_else(|| order.id.clone()),
            id: order.id,
            pnr,
            associated_records: order.associated_records,
            flight_offers: order.flight_offers,
            travelers: order.travelers,
        }
    }
}
