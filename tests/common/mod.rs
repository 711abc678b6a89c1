#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use jetset::config::Config;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: Value,
}

impl Canned {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, code: u32, title: &str, detail: &str) -> Self {
        Self {
            status,
            body: json!({
                "errors": [{ "status": status.as_u16(), "code": code, "title": title, "detail": detail }]
            }),
        }
    }

    pub fn empty() -> Self {
        Self::ok(json!({ "data": [], "meta": { "count": 0 } }))
    }
}

#[derive(Debug, Clone)]
pub struct MockAmadeusConfig {
    pub accept_credentials: bool,
    pub hotels_by_city: Canned,
    pub hotels_by_ids: Canned,
    pub hotel_offers: Canned,
    pub flight_offers: Canned,
    pub flight_orders: Canned,
}

impl Default for MockAmadeusConfig {
    fn default() -> Self {
        Self {
            accept_credentials: true,
            hotels_by_city: Canned::ok(hotels_by_city_fixture()),
            hotels_by_ids: Canned::ok(hotels_by_ids_fixture()),
            hotel_offers: Canned::ok(hotel_offers_fixture()),
            flight_offers: Canned::ok(flight_offers_fixture()),
            flight_orders: Canned {
                status: StatusCode::CREATED,
                body: flight_order_fixture(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

struct MockState {
    config: MockAmadeusConfig,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockAmadeus {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockAmadeus {
    pub async fn start(config: MockAmadeusConfig) -> Self {
        let state = Arc::new(MockState {
            config,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: authorization.clone(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let config = &state.config;

    if uri.path() == "/v1/security/oauth2/token" {
        let form_ok = String::from_utf8_lossy(&body).contains("grant_type=client_credentials");
        let basic = authorization.as_deref().is_some_and(|a| a.starts_with("Basic "));
        if !(config.accept_credentials && form_ok && basic && method == Method::POST) {
            return (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({
                    "error": "invalid_client",
                    "error_description": "Client credentials are invalid",
                    "code": 38187,
                    "title": "Invalid parameters"
                })),
            )
                .into_response();
        }
        return axum::Json(json!({
            "type": "amadeusOAuth2Token",
            "access_token": TOKEN,
            "token_type": "Bearer",
            "expires_in": 1799,
            "state": "approved"
        }))
        .into_response();
    }

    if authorization.as_deref() != Some(&format!("Bearer {TOKEN}")) {
        return Canned::error(StatusCode::UNAUTHORIZED, 38190, "Invalid access token", "missing token")
            .into_response();
    }

    let canned = match uri.path() {
        "/v1/reference-data/locations/hotels/by-city" => &config.hotels_by_city,
        "/v1/reference-data/locations/hotels/by-hotels" => &config.hotels_by_ids,
        "/v3/shopping/hotel-offers" => &config.hotel_offers,
        "/v2/shopping/flight-offers" => &config.flight_offers,
        "/v1/booking/flight-orders" => &config.flight_orders,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    canned.clone().into_response()
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/vnd.amadeus+json")],
            self.body.to_string(),
        )
            .into_response()
    }
}

pub fn config_for(mock: &MockAmadeus) -> Config {
    let mut config = Config::default();
    config.amadeus.base_url = mock.base_url.clone();
    config.amadeus.api_key = Some("test-key".to_string());
    config.amadeus.api_secret = Some("test-secret".to_string());
    config.amadeus.request_timeout_seconds = 5;
    config
}

pub fn app_with_config(config: Config) -> Router {
    let state = jetset::api::create_app_state_from_config(config, None)
        .expect("Failed to create app state");
    jetset::api::router(state)
}

pub async fn spawn_app(mock_config: MockAmadeusConfig) -> (Router, MockAmadeus) {
    let mock = MockAmadeus::start(mock_config).await;
    let app = app_with_config(config_for(&mock));
    (app, mock)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, headers, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await;
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await;
    (status, body)
}

pub fn hotels_by_city_fixture() -> Value {
    json!({
        "data": [
            {
                "chainCode": "TS",
                "iataCode": "PAR",
                "dupeId": 700000001,
                "name": "TEST HOTEL PARIS",
                "hotelId": "TSPAR001",
                "geoCode": { "latitude": 48.85, "longitude": 2.35 },
                "address": { "countryCode": "FR" }
            },
            {
                "chainCode": "HL",
                "iataCode": "PAR",
                "dupeId": 700006126,
                "name": "HOTEL LUTETIA",
                "hotelId": "HLPAR266",
                "geoCode": { "latitude": 48.85089, "longitude": 2.32728 },
                "address": { "countryCode": "FR" }
            },
            {
                "chainCode": "AC",
                "iataCode": "PAR",
                "dupeId": 700169556,
                "name": "ACROPOLIS HOTEL PARIS BOULOGNE",
                "hotelId": "ACPARH29",
                "geoCode": { "latitude": 48.83593, "longitude": 2.24922 },
                "address": { "countryCode": "FR" }
            }
        ],
        "meta": { "count": 3 }
    })
}

pub fn hotels_by_ids_fixture() -> Value {
    json!({
        "data": [{
            "chainCode": "HL",
            "iataCode": "PAR",
            "name": "HOTEL LUTETIA",
            "hotelId": "HLPAR266",
            "address": {
                "lines": ["45 BOULEVARD RASPAIL"],
                "cityName": "PARIS",
                "countryName": "FRANCE",
                "countryCode": "FR"
            },
            "lastUpdate": "2026-06-15T10:18:12"
        }],
        "meta": { "count": 1 }
    })
}

pub fn hotel_offers_fixture() -> Value {
    json!({
        "data": [
            {
                "type": "hotel-offers",
                "hotel": { "type": "hotel", "hotelId": "HLPAR266", "chainCode": "HL", "name": "HOTEL LUTETIA", "cityCode": "PAR" },
                "available": true,
                "offers": [
                    {
                        "id": "OFF1",
                        "checkInDate": "2026-11-02",
                        "checkOutDate": "2026-11-04",
                        "rateCode": "RAC",
                        "room": {
                            "type": "A1K",
                            "typeEstimated": { "category": "DELUXE_ROOM", "beds": 1, "bedType": "KING" },
                            "description": { "text": "Deluxe king room", "lang": "EN" }
                        },
                        "guests": { "adults": 2 },
                        "price": { "currency": "USD", "base": "400.00", "total": "452.10" },
                        "policies": {
                            "cancellation": { "description": { "text": "Free cancellation until 48h before arrival" } }
                        }
                    },
                    {
                        "id": "OFF2",
                        "checkInDate": "2026-11-02",
                        "checkOutDate": "2026-11-04",
                        "price": { "currency": "USD", "total": "389.00" }
                    }
                ]
            },
            {
                "type": "hotel-offers",
                "hotel": { "type": "hotel", "hotelId": "ACPARH29", "name": "ACROPOLIS HOTEL PARIS BOULOGNE" },
                "available": true,
                "offers": [
                    { "id": "OFF3", "price": { "currency": "USD", "total": "210.5" } }
                ]
            }
        ]
    })
}

pub fn flight_offers_fixture() -> Value {
    json!({
        "meta": { "count": 1 },
        "data": [{
            "type": "flight-offer",
            "id": "1",
            "source": "GDS",
            "itineraries": [{
                "duration": "PT2H50M",
                "segments": [{
                    "departure": { "iataCode": "DEL", "at": "2026-12-23T06:00:00" },
                    "arrival": { "iataCode": "BLR", "at": "2026-12-23T08:50:00" },
                    "carrierCode": "AI",
                    "number": "803"
                }]
            }],
            "price": { "currency": "USD", "total": "120.50" }
        }],
        "dictionaries": { "carriers": { "AI": "AIR INDIA" } }
    })
}

pub fn flight_order_fixture() -> Value {
    json!({
        "data": {
            "type": "flight-order",
            "id": "eJzTd9f3NjIJdzUGAAp%2fAiY=",
            "queuingOfficeId": "NCE4D31SB",
            "associatedRecords": [{
                "reference": "SZ2ZXZ",
                "creationDate": "2026-10-19T09:00:00.000",
                "originSystemCode": "GDS",
                "flightOfferId": "1"
            }],
            "flightOffers": [{ "id": "1", "type": "flight-offer" }],
            "travelers": [{ "id": "1", "name": { "firstName": "ADA", "lastName": "LOVELACE" } }]
        }
    })
}
