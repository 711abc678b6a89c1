//! Hotel endpoints under `/api/hotels`.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::validation::{
    present, validate_hotel_id, validate_location_code, validate_stay, validate_travelers,
};
use super::{ApiError, ApiResponse, AppState, NumberOrString};
use crate::constants::defaults;
use crate::models::{Booking, Destination, HotelDetails, HotelOffers, HotelSearchResults};
use crate::services::{HotelError, HotelSearchQuery, OffersQuery};

const NO_HOTELS_MESSAGE: &str = "No hotels found for this search";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub destination: Option<String>,
    pub city_code: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub travelers: Option<NumberOrString>,
}

impl SearchParams {
    /// Fields present in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            destination: other.destination.or(self.destination),
            city_code: other.city_code.or(self.city_code),
            check_in_date: other.check_in_date.or(self.check_in_date),
            check_out_date: other.check_out_date.or(self.check_out_date),
            travelers: other.travelers.or(self.travelers),
        }
    }

    fn into_query(self) -> Result<HotelSearchQuery, ApiError> {
        let destination = present(self.destination.as_ref())
            .or_else(|| present(self.city_code.as_ref()))
            .ok_or_else(|| ApiError::validation("Destination is required"))?;
        let city_code = validate_location_code(destination, "destination")?;

        let (Some(check_in), Some(check_out)) = (
            present(self.check_in_date.as_ref()),
            present(self.check_out_date.as_ref()),
        ) else {
            return Err(ApiError::validation(
                "Check-in and check-out dates are required",
            ));
        };
        let (check_in, check_out) = validate_stay(check_in, check_out)?;

        Ok(HotelSearchQuery {
            city_code,
            check_in,
            check_out,
            adults: validate_travelers(self.travelers.as_ref(), defaults::TRAVELERS)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub city_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub destination: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub travelers: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersParams {
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub adults: Option<NumberOrString>,
    pub children: Option<NumberOrString>,
}

/// Empty bodies deserialize to the default value; malformed ones are a 400.
pub(super) fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))
}

pub async fn get_destinations(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<Destination>>> {
    Json(ApiResponse::success(state.hotels().destinations().await))
}

pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let city_code = present(params.city_code.as_ref())
        .ok_or_else(|| ApiError::validation("City code is required"))?;
    let city_code = validate_location_code(city_code, "cityCode")?;

    let hotels = state.hotels().list_hotels(&city_code).await?;
    Ok(Json(ApiResponse::success(hotels)))
}

pub async fn search_hotels_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<HotelSearchResults>>, ApiError> {
    run_search(&state, params).await
}

pub async fn search_hotels_post(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
    body: Bytes,
) -> Result<Json<ApiResponse<HotelSearchResults>>, ApiError> {
    let from_body: SearchParams = parse_body(&body)?;
    run_search(&state, params.merge(from_body)).await
}

/// Validation problems are a 400; anything past validation answers 200 so
/// the frontend always gets a list.
async fn run_search(
    state: &AppState,
    params: SearchParams,
) -> Result<Json<ApiResponse<HotelSearchResults>>, ApiError> {
    let query = params.into_query()?;

    match state.hotels().search(&query).await {
        Ok(results) if results.data.is_empty() => Ok(Json(ApiResponse::success_with_message(
            HotelSearchResults::empty(),
            NO_HOTELS_MESSAGE,
        ))),
        Ok(results) => Ok(Json(ApiResponse::success(results))),
        Err(err) => {
            warn!(city_code = %query.city_code, error = %err, "Hotel search failed");
            Ok(Json(ApiResponse::success_with_message(
                HotelSearchResults::empty(),
                NO_HOTELS_MESSAGE,
            )))
        }
    }
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Response, ApiError> {
    let (Some(destination), Some(check_in), Some(check_out)) = (
        present(params.destination.as_ref()),
        present(params.check_in_date.as_ref()),
        present(params.check_out_date.as_ref()),
    ) else {
        return Err(ApiError::validation(
            "Missing required parameters: destination, checkInDate, and checkOutDate are required",
        ));
    };

    let (check_in, check_out) = validate_stay(check_in, check_out)?;
    let query = HotelSearchQuery {
        city_code: validate_location_code(destination, "destination")?,
        check_in,
        check_out,
        adults: validate_travelers(params.travelers.as_ref(), defaults::OFFER_ADULTS)?,
    };

    let response = match state.hotels().check_availability(&query).await? {
        Some(offers) => Json(ApiResponse::success(offers)).into_response(),
        None => Json(ApiResponse::<()>::unsuccessful(
            "No availability found for these dates",
        ))
        .into_response(),
    };
    Ok(response)
}

pub async fn get_offers(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
    Query(params): Query<OffersParams>,
) -> Result<Json<ApiResponse<HotelOffers>>, ApiError> {
    let hotel_id = validate_hotel_id(&hotel_id)?;

    let (Some(check_in), Some(check_out)) = (
        present(params.check_in_date.as_ref()),
        present(params.check_out_date.as_ref()),
    ) else {
        return Err(ApiError::validation(
            "Check-in and check-out dates are required",
        ));
    };
    let (check_in, check_out) = validate_stay(check_in, check_out)?;

    let children = params
        .children
        .as_ref()
        .map(NumberOrString::as_text)
        .filter(|s| !s.is_empty())
        .map_or(Ok(0), |s| {
            s.parse::<u32>()
                .map_err(|_| ApiError::validation(format!("Invalid children: '{s}'")))
        })?;

    let query = OffersQuery {
        check_in,
        check_out,
        adults: validate_travelers(params.adults.as_ref(), defaults::OFFER_ADULTS)?,
        children,
    };

    let offers = state
        .hotels()
        .offers(hotel_id, &query)
        .await
        .map_err(|err| {
            warn!(hotel_id, error = %err, "Hotel offers unavailable");
            match err {
                HotelError::Validation(msg) => ApiError::validation(msg),
                other => ApiError::internal(format!("Failed to get hotel offers: {other}")),
            }
        })?;

    Ok(Json(ApiResponse::success(offers)))
}

pub async fn book_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let hotel_id = validate_hotel_id(&hotel_id)?;
    let request = parse_body(&body)?;

    let booking = state.hotels().book(hotel_id, request).await?;
    info!(booking_id = %booking.booking_id, "Booking stub issued confirmation");
    Ok(Json(ApiResponse::success(booking)))
}

pub async fn get_details(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<Json<ApiResponse<HotelDetails>>, ApiError> {
    let hotel_id = validate_hotel_id(&hotel_id)?;
    let details = state.hotels().details(hotel_id).await?;
    Ok(Json(ApiResponse::success(details)))
}
