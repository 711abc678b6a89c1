//! Flight endpoints under `/api/flights`.

use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::hotels::parse_body;
use super::validation::{parse_date, present, validate_location_code, validate_travelers};
use super::{ApiError, ApiResponse, AppState, NumberOrString};
use crate::constants::{defaults, limits};
use crate::models::{FlightOffer, FlightOrder, FlightSearch, TripType};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub depart_date: Option<String>,
    pub return_date: Option<String>,
    pub travelers: Option<NumberOrString>,
    pub trip_type: Option<TripType>,
    pub travel_class: Option<String>,
    pub max: Option<u32>,
}

const TRAVEL_CLASSES: &[&str] = &["ECONOMY", "PREMIUM_ECONOMY", "BUSINESS", "FIRST"];

impl FlightSearchRequest {
    fn into_search(self) -> Result<FlightSearch, ApiError> {
        let (Some(from), Some(to), Some(depart)) = (
            present(self.from.as_ref()),
            present(self.to.as_ref()),
            present(self.depart_date.as_ref()),
        ) else {
            return Err(ApiError::validation(
                "Missing required parameters: from, to and departDate are required",
            ));
        };

        let trip_type = self.trip_type.unwrap_or_default();
        let depart_date = parse_date(depart, "departDate")?;

        let return_date = match (trip_type, present(self.return_date.as_ref())) {
            (TripType::RoundTrip, Some(value)) => {
                let date = parse_date(value, "returnDate")?;
                if date < depart_date {
                    return Err(ApiError::validation(
                        "returnDate cannot be before departDate",
                    ));
                }
                Some(date)
            }
            (TripType::RoundTrip, None) => {
                return Err(ApiError::validation(
                    "returnDate is required for round trips",
                ));
            }
            (TripType::OneWay, _) => None,
        };

        let travel_class = match present(self.travel_class.as_ref()) {
            Some(class) => {
                let class = class.to_ascii_uppercase();
                if !TRAVEL_CLASSES.contains(&class.as_str()) {
                    return Err(ApiError::validation(format!(
                        "Invalid travelClass: '{class}'"
                    )));
                }
                Some(class)
            }
            None => None,
        };

        Ok(FlightSearch {
            origin: validate_location_code(from, "from")?,
            destination: validate_location_code(to, "to")?,
            depart_date,
            return_date,
            adults: validate_travelers(self.travelers.as_ref(), defaults::OFFER_ADULTS)?,
            trip_type,
            travel_class,
            max: self
                .max
                .filter(|max| *max > 0)
                .map_or(limits::MAX_FLIGHT_OFFERS, |max| max.min(250)),
        })
    }
}

/// Upstream failures answer 200 with an empty list.
pub async fn search_flights(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Vec<FlightOffer>>>, ApiError> {
    let request: FlightSearchRequest = parse_body(&body)?;
    let search = request.into_search()?;

    match state.flights().search(&search).await {
        Ok(offers) if offers.is_empty() => Ok(Json(ApiResponse::success_with_message(
            offers,
            "No flights found for this search",
        ))),
        Ok(offers) => Ok(Json(ApiResponse::success(offers))),
        Err(err) => {
            warn!(
                origin = %search.origin,
                destination = %search.destination,
                error = %err,
                "Flight search failed"
            );
            Ok(Json(ApiResponse::success_with_message(
                Vec::new(),
                "No flights found for this search",
            )))
        }
    }
}

pub async fn create_flight_order(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<FlightOrder>>, ApiError> {
    let body: Value = parse_body(&body)?;
    let order = state.flights().create_order(body).await?;
    Ok(Json(ApiResponse::success(order)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FlightSearchRequest {
        FlightSearchRequest {
            from: Some("del".to_string()),
            to: Some("BLR".to_string()),
            depart_date: Some("2026-12-23".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_way_defaults() {
        let search = FlightSearchRequest {
            return_date: Some("2026-12-30".to_string()),
            ..request()
        }
        .into_search()
        .unwrap();

        assert_eq!(search.origin, "DEL");
        assert_eq!(search.trip_type, TripType::OneWay);
        assert!(search.return_date.is_none());
        assert_eq!(search.adults, 1);
        assert_eq!(search.max, 20);
    }

    #[test]
    fn test_round_trip_requires_return_date() {
        let round_trip = FlightSearchRequest {
            trip_type: Some(TripType::RoundTrip),
            ..request()
        };
        assert!(round_trip.into_search().is_err());

        let search = FlightSearchRequest {
            trip_type: Some(TripType::RoundTrip),
            return_date: Some("2026-12-30".to_string()),
            travel_class: Some("business".to_string()),
            ..request()
        }
        .into_search()
        .unwrap();
        assert_eq!(search.return_date.unwrap().to_string(), "2026-12-30");
        assert_eq!(search.travel_class.as_deref(), Some("BUSINESS"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(FlightSearchRequest::default().into_search().is_err());
        assert!(
            FlightSearchRequest {
                depart_date: None,
                ..request()
            }
            .into_search()
            .is_err()
        );
    }
}
