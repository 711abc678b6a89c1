use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::constants::amadeus as paths;
use crate::models::{AmadeusFlightOrder, FlightOffer, FlightSearch, HotelOffersEntry, HotelRecord, TripType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamIssue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl UpstreamIssue {
    fn from_text(status: StatusCode, text: &str) -> Self {
        Self {
            status: Some(status.as_u16()),
            title: status.canonical_reason().map(str::to_string),
            detail: (!text.trim().is_empty()).then(|| text.trim().to_string()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        match (self.title.as_deref(), self.detail.as_deref()) {
            (Some(title), Some(detail)) => format!("{title}: {detail}"),
            (Some(text), None) | (None, Some(text)) => text.to_string(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

fn describe(errors: &[UpstreamIssue]) -> String {
    errors.first().map_or_else(|| "no details".to_string(), UpstreamIssue::summary)
}

#[derive(Debug, Error)]
pub enum AmadeusError {
    #[error("Amadeus API credentials are not configured")]
    MissingCredentials,

    #[error("Amadeus rejected the credentials ({status}): {message}")]
    TokenRejected { status: StatusCode, message: String },

    #[error("Amadeus request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Amadeus returned {status}: {}", describe(.errors))]
    Api {
        status: StatusCode,
        errors: Vec<UpstreamIssue>,
    },

    #[error("Unexpected Amadeus response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Amadeus URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AmadeusError {
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::TokenRejected { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// First upstream `detail`, falling back to the error's own message.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Api { errors, .. } => errors
                .iter()
                .find_map(|issue| issue.detail.clone())
                .unwrap_or_else(|| self.to_string()),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<UpstreamIssue>,
}

/// OAuth failures use a different shape than the REST endpoints.
#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// `{"data": [...], "meta": {...}}` list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmadeusCollection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Value>,
}

impl AmadeusCollection<Value> {
    /// Decodes each `data` element on its own. Records that do not fit `T`
    /// are skipped so one odd entry does not cost the whole answer.
    fn decode_each<T: DeserializeOwned>(self, endpoint: &'static str) -> AmadeusCollection<T> {
        let data = self
            .data
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value(item)
                    .inspect_err(|err| {
                        warn!(endpoint, error = %err, "Skipping malformed Amadeus record");
                    })
                    .ok()
            })
            .collect();

        AmadeusCollection {
            data,
            meta: self.meta,
            dictionaries: self.dictionaries,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AmadeusEnvelope<T> {
    data: T,
}

#[derive(Debug, Clone)]
pub struct AmadeusCredentials {
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct HotelOffersQuery {
    pub hotel_ids: Vec<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: Option<u32>,
    pub currency: String,
    pub best_rate_only: bool,
}

#[derive(Clone)]
pub struct AmadeusClient {
    client: Client,
    base_url: Url,
    credentials: Option<AmadeusCredentials>,
}

impl AmadeusClient {
    pub fn with_shared_client(
        client: Client,
        base_url: &str,
        credentials: Option<AmadeusCredentials>,
    ) -> Result<Self, AmadeusError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            credentials,
        })
    }

    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, AmadeusError> {
        Ok(self.base_url.join(path)?)
    }

    /// Client-credentials grant. Tokens are not cached; each operation asks
    /// for its own.
    pub async fn access_token(&self) -> Result<String, AmadeusError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AmadeusError::MissingCredentials)?;

        let url = self.endpoint(paths::TOKEN_PATH)?;
        let response = self
            .client
            .post(url)
            .basic_auth(&credentials.api_key, Some(&credentials.api_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        record_call("token", status);

        if !status.is_success() {
            let message = serde_json::from_slice::<TokenErrorBody>(&body)
                .ok()
                .and_then(|err| err.error_description.or(err.error))
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            warn!(%status, %message, "Amadeus token request rejected");
            return Err(AmadeusError::TokenRejected { status, message });
        }

        let token: AccessToken = serde_json::from_slice(&body)?;
        debug!(expires_in = token.expires_in, "Obtained Amadeus access token");
        Ok(token.access_token)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, AmadeusError> {
        let response = request
            .header(header::ACCEPT, paths::VND_JSON)
            .send()
            .await
            .inspect_err(|_| {
                metrics::counter!("amadeus_requests_total", "endpoint" => endpoint, "outcome" => "transport_error")
                    .increment(1);
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        record_call(endpoint, status);

        if !status.is_success() {
            let errors = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .map(|parsed| parsed.errors)
                .filter(|errors| !errors.is_empty())
                .unwrap_or_else(|| vec![UpstreamIssue::from_text(status, &String::from_utf8_lossy(&body))]);

            warn!(endpoint, %status, error = %describe(&errors), "Amadeus request failed");
            return Err(AmadeusError::Api { status, errors });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    fn by_city_url(&self, city_code: &str, radius_km: u32) -> Result<Url, AmadeusError> {
        let mut url = self.endpoint(paths::HOTELS_BY_CITY_PATH)?;
        url.query_pairs_mut()
            .append_pair("cityCode", city_code)
            .append_pair("radius", &radius_km.to_string())
            .append_pair("radiusUnit", "KM")
            .append_pair("hotelSource", "ALL");
        Ok(url)
    }

    pub async fn hotels_by_city(
        &self,
        token: &str,
        city_code: &str,
        radius_km: u32,
    ) -> Result<AmadeusCollection<HotelRecord>, AmadeusError> {
        let url = self.by_city_url(city_code, radius_km)?;
        debug!(city_code, "Looking up hotels by city");
        let raw: AmadeusCollection<Value> = self
            .execute("hotels_by_city", self.client.get(url).bearer_auth(token))
            .await?;
        Ok(raw.decode_each("hotels_by_city"))
    }

    /// Same lookup as [`Self::hotels_by_city`], payload left untouched.
    pub async fn hotels_by_city_raw(
        &self,
        token: &str,
        city_code: &str,
        radius_km: u32,
    ) -> Result<Value, AmadeusError> {
        let url = self.by_city_url(city_code, radius_km)?;
        self.execute("hotels_by_city", self.client.get(url).bearer_auth(token))
            .await
    }

    pub async fn hotels_by_ids(
        &self,
        token: &str,
        hotel_ids: &[String],
    ) -> Result<AmadeusCollection<HotelRecord>, AmadeusError> {
        let mut url = self.endpoint(paths::HOTELS_BY_IDS_PATH)?;
        url.query_pairs_mut()
            .append_pair("hotelIds", &hotel_ids.join(","));

        let raw: AmadeusCollection<Value> = self
            .execute("hotels_by_ids", self.client.get(url).bearer_auth(token))
            .await?;
        Ok(raw.decode_each("hotels_by_ids"))
    }

    pub async fn hotel_offers(
        &self,
        token: &str,
        query: &HotelOffersQuery,
    ) -> Result<AmadeusCollection<HotelOffersEntry>, AmadeusError> {
        let mut url = self.endpoint(paths::HOTEL_OFFERS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("hotelIds", &query.hotel_ids.join(","))
                .append_pair("checkInDate", &query.check_in.to_string())
                .append_pair("checkOutDate", &query.check_out.to_string())
                .append_pair("adults", &query.adults.to_string());
            if let Some(children) = query.children {
                pairs.append_pair("children", &children.to_string());
            }
            pairs
                .append_pair("roomQuantity", "1")
                .append_pair("currency", &query.currency)
                .append_pair("bestRateOnly", if query.best_rate_only { "true" } else { "false" });
        }

        debug!(hotels = query.hotel_ids.len(), "Fetching hotel offers");
        let raw: AmadeusCollection<Value> = self
            .execute("hotel_offers", self.client.get(url).bearer_auth(token))
            .await?;
        Ok(raw.decode_each("hotel_offers"))
    }

    pub async fn flight_offers(
        &self,
        token: &str,
        search: &FlightSearch,
        currency: &str,
    ) -> Result<AmadeusCollection<FlightOffer>, AmadeusError> {
        let mut url = self.endpoint(paths::FLIGHT_OFFERS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("originLocationCode", &search.origin)
                .append_pair("destinationLocationCode", &search.destination)
                .append_pair("departureDate", &search.depart_date.to_string());
            if search.trip_type == TripType::RoundTrip {
                if let Some(return_date) = search.return_date {
                    pairs.append_pair("returnDate", &return_date.to_string());
                }
            }
            pairs
                .append_pair("adults", &search.adults.to_string())
                .append_pair("currencyCode", currency)
                .append_pair("max", &search.max.to_string());
            if let Some(travel_class) = &search.travel_class {
                pairs.append_pair("travelClass", travel_class);
            }
        }

        debug!(origin = %search.origin, destination = %search.destination, "Searching flight offers");
        let raw: AmadeusCollection<Value> = self
            .execute("flight_offers", self.client.get(url).bearer_auth(token))
            .await?;
        Ok(raw.decode_each("flight_offers"))
    }

    /// Forwards a client-built `{"data": {...}}` order body.
    pub async fn create_flight_order(
        &self,
        token: &str,
        body: &Value,
    ) -> Result<AmadeusFlightOrder, AmadeusError> {
        let url = self.endpoint(paths::FLIGHT_ORDERS_PATH)?;
        let request = self
            .client
            .post(url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, paths::VND_JSON)
            .body(serde_json::to_vec(body)?);

        let envelope: AmadeusEnvelope<AmadeusFlightOrder> =
            self.execute("flight_orders", request).await?;
        Ok(envelope.data)
    }
}

fn record_call(endpoint: &'static str, status: StatusCode) {
    let outcome = if status.is_success() { "success" } else { "error" };
    metrics::counter!(
        "amadeus_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_uses_upstream_issue() {
        let body = br#"{"errors":[{"status":400,"code":477,"title":"INVALID FORMAT","detail":"checkInDate must be in the future","source":{"parameter":"checkInDate"}}]}"#;
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap();

        let err = AmadeusError::Api {
            status: StatusCode::BAD_REQUEST,
            errors: parsed.errors,
        };

        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.detail(), "checkInDate must be in the future");
        assert_eq!(
            err.to_string(),
            "Amadeus returned 400 Bad Request: INVALID FORMAT: checkInDate must be in the future"
        );
    }

    #[test]
    fn test_issue_from_plain_text() {
        let issue = UpstreamIssue::from_text(StatusCode::BAD_GATEWAY, "  upstream down ");
        assert_eq!(issue.status, Some(502));
        assert_eq!(issue.detail.as_deref(), Some("upstream down"));
        assert_eq!(issue.summary(), "Bad Gateway: upstream down");
    }

    #[test]
    fn test_collection_defaults_to_empty() {
        let parsed: AmadeusCollection<HotelRecord> =
            serde_json::from_str(r#"{"meta":{"count":0}}"#).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.meta.is_some());
    }

    #[test]
    fn test_decode_each_skips_malformed_records() {
        let raw: AmadeusCollection<Value> = serde_json::from_value(serde_json::json!({
            "data": [
                { "hotelId": "HLPAR266", "name": "HOTEL LUTETIA", "rating": 5 },
                { "name": "NO ID HOTEL" },
                { "hotelId": "ACPARH29", "geoCode": "somewhere" }
            ],
            "meta": { "count": 3 }
        }))
        .unwrap();

        let decoded: AmadeusCollection<HotelRecord> = raw.decode_each("hotels_by_city");
        assert_eq!(decoded.data.len(), 1);
        assert_eq!(decoded.data[0].hotel_id, "HLPAR266");
        assert_eq!(decoded.data[0].rating.as_deref(), Some("5"));
        assert!(decoded.meta.is_some());
    }

    #[test]
    fn test_by_city_url() {
        let client = AmadeusClient::with_shared_client(Client::new(), "https://test.api.amadeus.com", None).unwrap();
        let url = client.by_city_url("PAR", 5).unwrap();
        assert_eq!(
            url.as_str(),
            "https://test.api.amadeus.com/v1/reference-data/locations/hotels/by-city?cityCode=PAR&radius=5&radiusUnit=KM&hotelSource=ALL"
        );
    }

    #[tokio::test]
    async fn test_token_requires_credentials() {
        let client = AmadeusClient::with_shared_client(Client::new(), "https://test.api.amadeus.com", None).unwrap();
        assert!(!client.has_credentials());
        assert!(matches!(
            client.access_token().await,
            Err(AmadeusError::MissingCredentials)
        ));
    }
}
