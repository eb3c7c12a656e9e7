mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use car_connect::config::EnvironmentConfig;
use car_connect::create_app;
use car_connect::models::UserRole;
use car_connect::state::AppState;
use car_connect::utils::jwt::{generate_token, JwtConfig};

use common::Fixture;

struct TestApp {
    router: Router,
    jwt: JwtConfig,
}

impl TestApp {
    fn new(fx: &Fixture) -> Self {
        let config = EnvironmentConfig::default();
        let jwt = JwtConfig::from(&config);
        let router = create_app(AppState::new(fx.repos.clone(), config));
        Self { router, jwt }
    }

    fn token(&self, user_id: Uuid, role: UserRole) -> String {
        generate_token(user_id, role, &self.jwt).unwrap()
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("not a decimal: {}", other),
    }
}

fn booking_body(start: &str, end: &str, with_driver: bool) -> Value {
    json!({ "startDate": start, "endDate": end, "withDriver": with_driver })
}

#[tokio::test]
async fn test_health_check() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);

    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_book_with_driver_returns_created() {
    let fx = Fixture::new().await;
    fx.add_driver("Delhi", true).await;
    fx.add_driver("Delhi", true).await;
    let app = TestApp::new(&fx);
    let token = app.token(fx.renter.id, UserRole::Renter);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/car-renter/cars/{}/book", fx.car.id),
            Some(&token),
            Some(booking_body("2025-01-10", "2025-01-13", true)),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["booking"]["status"], "pending");
    assert_eq!(decimal(&body["data"]["booking"]["totalPrice"]), Decimal::from(4500));
    assert_eq!(body["data"]["fanOut"]["created"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_booking_errors_use_the_envelope() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let token = app.token(fx.renter.id, UserRole::Renter);
    let uri = format!("/car-renter/cars/{}/book", fx.car.id);

    let (status, body) = app
        .call(Method::POST, &uri, Some(&token), Some(json!({ "withDriver": false })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "MISSING_DATES");

    let (status, body) = app
        .call(Method::POST, &uri, Some(&token), Some(booking_body("2025-01-13", "2025-01-10", false)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_WINDOW");

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/car-renter/cars/{}/book", Uuid::new_v4()),
            Some(&token),
            Some(booking_body("2025-01-10", "2025-01-13", false)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Car with id"));
}

#[tokio::test]
async fn test_overlapping_booking_is_conflict() {
    let fx = Fixture::new().await;
    let other = fx.add_renter("Anita").await;
    let app = TestApp::new(&fx);
    let uri = format!("/car-renter/cars/{}/book", fx.car.id);

    let (status, _) = app
        .call(
            Method::POST,
            &uri,
            Some(&app.token(fx.renter.id, UserRole::Renter)),
            Some(booking_body("2025-01-10", "2025-01-13", false)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            Method::POST,
            &uri,
            Some(&app.token(other.id, UserRole::Renter)),
            Some(booking_body("2025-01-12", "2025-01-14", false)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "BOOKING_CONFLICT");
}

#[tokio::test]
async fn test_auth_and_role_checks() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let uri = format!("/car-renter/cars/{}/book", fx.car.id);
    let body = booking_body("2025-01-10", "2025-01-13", false);

    let (status, response) = app.call(Method::POST, &uri, None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["success"], false);

    let (status, _) = app
        .call(Method::POST, &uri, Some("not-a-jwt"), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let driver_token = app.token(Uuid::new_v4(), UserRole::Driver);
    let (status, response) = app.call(Method::POST, &uri, Some(&driver_token), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(response["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_cancel_booking_flow() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let renter_token = app.token(fx.renter.id, UserRole::Renter);

    let (_, body) = app
        .call(
            Method::POST,
            &format!("/car-renter/cars/{}/book", fx.car.id),
            Some(&renter_token),
            Some(booking_body("2025-01-10", "2025-01-11", false)),
        )
        .await;
    let booking_id = body["data"]["booking"]["id"].as_str().unwrap().to_string();
    let cancel_uri = format!("/car-renter/bookings/{}/cancel", booking_id);

    let stranger = app.token(Uuid::new_v4(), UserRole::Renter);
    let (status, _) = app.call(Method::POST, &cancel_uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.call(Method::POST, &cancel_uri, Some(&renter_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking"]["status"], "cancelled");

    let (status, body) = app.call(Method::POST, &cancel_uri, Some(&renter_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking"]["status"], "cancelled");

    let (status, _) = app
        .call(
            Method::POST,
            &format!("/car-renter/bookings/{}/cancel", Uuid::new_v4()),
            Some(&renter_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_driver_accepts_and_sees_invalid_transition() {
    let fx = Fixture::new().await;
    let driver = fx.add_driver("Delhi", true).await;
    let app = TestApp::new(&fx);
    let driver_token = app.token(driver.user_id, UserRole::Driver);

    app.call(
        Method::POST,
        &format!("/car-renter/cars/{}/book", fx.car.id),
        Some(&app.token(fx.renter.id, UserRole::Renter)),
        Some(booking_body("2025-01-10", "2025-01-13", true)),
    )
    .await;

    let (status, body) = app
        .call(Method::GET, "/driver/ride-requests?status=pending", Some(&driver_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let requests = body["data"]["rideRequests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(decimal(&requests[0]["driverPay"]), Decimal::from(1500));
    let request_id = requests[0]["id"].as_str().unwrap().to_string();

    let accept_uri = format!("/driver/ride-requests/{}/accept", request_id);
    let (status, body) = app.call(Method::POST, &accept_uri, Some(&driver_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rideRequest"]["status"], "accepted");

    let (status, body) = app.call(Method::POST, &accept_uri, Some(&driver_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");
    assert!(body["message"].as_str().unwrap().contains("accepted"));

    let (status, _) = app
        .call(
            Method::POST,
            &format!("/driver/ride-requests/{}/reject", Uuid::new_v4()),
            Some(&driver_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_availability_requires_field() {
    let fx = Fixture::new().await;
    let driver = fx.add_driver("Delhi", true).await;
    let app = TestApp::new(&fx);
    let token = app.token(driver.user_id, UserRole::Driver);

    let (status, body) = app
        .call(Method::PATCH, "/driver/toggle-availability", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .call(
            Method::PATCH,
            "/driver/toggle-availability",
            Some(&token),
            Some(json!({ "isAvailable": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isAvailable"], false);
}

#[tokio::test]
async fn test_driver_profile_is_created_once() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let token = app.token(Uuid::new_v4(), UserRole::Driver);
    let profile = json!({
        "location": "Delhi",
        "licenseNumber": "DL-0420110012345",
        "licenseExpiry": "2030-06-30",
        "experienceYears": 4
    });

    let (status, body) = app
        .call(Method::POST, "/driver/profile", Some(&token), Some(profile.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["driver"]["isAvailable"], true);

    let (status, _) = app
        .call(Method::POST, "/driver/profile", Some(&token), Some(profile))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.call(Method::GET, "/driver/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["driver"]["totalRides"], 0);
}

#[tokio::test]
async fn test_owner_manages_cars_and_sees_bookings() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let owner_token = app.token(fx.owner.id, UserRole::Owner);

    let (status, body) = app
        .call(
            Method::POST,
            "/car-owner/cars",
            Some(&owner_token),
            Some(json!({
                "make": "Tata", "model": "Nexon", "year": 2024, "pricePerDay": "0",
                "location": "Pune", "category": "suv"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/car-owner/cars/{}/availability", fx.car.id),
            Some(&app.token(Uuid::new_v4(), UserRole::Owner)),
            Some(json!({ "isAvailable": false })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.call(
        Method::POST,
        &format!("/car-renter/cars/{}/book", fx.car.id),
        Some(&app.token(fx.renter.id, UserRole::Renter)),
        Some(booking_body("2025-01-10", "2025-01-12", false)),
    )
    .await;

    let (status, body) = app.call(Method::GET, "/car-owner/bookings", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bookings"].as_array().unwrap().len(), 1);

    let (status, body) = app.call(Method::GET, "/car-owner/cars", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cars"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_availability_exposes_flag_and_overlap() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let token = app.token(fx.renter.id, UserRole::Renter);

    app.call(
        Method::POST,
        &format!("/car-renter/cars/{}/book", fx.car.id),
        Some(&token),
        Some(booking_body("2025-01-10", "2025-01-13", false)),
    )
    .await;

    let (status, body) = app
        .call(
            Method::GET,
            &format!(
                "/car-renter/cars/{}/availability?startDate=2025-01-12&endDate=2025-01-14",
                fx.car.id
            ),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["flagAvailable"], true);
    assert_eq!(body["data"]["available"], false);
    assert_eq!(body["data"]["conflictingBookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_notifications_lifecycle() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let owner_token = app.token(fx.owner.id, UserRole::Owner);

    app.call(
        Method::POST,
        &format!("/car-renter/cars/{}/book", fx.car.id),
        Some(&app.token(fx.renter.id, UserRole::Renter)),
        Some(booking_body("2025-01-10", "2025-01-12", false)),
    )
    .await;

    let (status, body) = app
        .call(Method::GET, "/notifications?unreadOnly=true", Some(&owner_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let notifications = body["data"]["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "new_booking");
    let id = notifications[0]["id"].as_str().unwrap().to_string();

    let stranger = app.token(Uuid::new_v4(), UserRole::Renter);
    let (status, _) = app
        .call(Method::PATCH, &format!("/notifications/{}/read", id), Some(&stranger), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::PATCH, "/notifications/read-all", Some(&owner_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 1);

    let (status, _) = app
        .call(Method::DELETE, &format!("/notifications/{}", id), Some(&owner_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.call(Method::GET, "/notifications", Some(&owner_token), None).await;
    assert!(body["data"]["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_car_with_bookings_is_conflict() {
    let fx = Fixture::new().await;
    let app = TestApp::new(&fx);
    let owner_token = app.token(fx.owner.id, UserRole::Owner);

    let (status, body) = app
        .call(
            Method::POST,
            "/car-owner/cars",
            Some(&owner_token),
            Some(json!({
                "make": "Tata", "model": "Nexon", "year": 2024, "pricePerDay": "1500",
                "location": "Pune", "category": "suv"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let spare_id = body["data"]["car"]["id"].as_str().unwrap().to_string();

    let renter_token = app.token(fx.renter.id, UserRole::Renter);
    let (_, body) = app
        .call(
            Method::POST,
            &format!("/car-renter/cars/{}/book", fx.car.id),
            Some(&renter_token),
            Some(booking_body("2025-01-10", "2025-01-12", false)),
        )
        .await;
    let booking_id = body["data"]["booking"]["id"].as_str().unwrap().to_string();
    app.call(
        Method::POST,
        &format!("/car-renter/bookings/{}/cancel", booking_id),
        Some(&renter_token),
        None,
    )
    .await;

    // Una reserva cancelada sigue existiendo y bloquea el borrado
    let (status, body) = app
        .call(Method::DELETE, &format!("/car-owner/cars/{}", fx.car.id), Some(&owner_token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = app
        .call(Method::DELETE, &format!("/car-owner/cars/{}", spare_id), Some(&owner_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

// La identidad llega solo por el JWT: un renter sin fila en el directorio
// de usuarios reserva igual y puede seguir sus solicitudes de viaje.
#[tokio::test]
async fn test_unprovisioned_renter_books_and_lists_ride_requests() {
    let fx = Fixture::new().await;
    fx.add_driver("Delhi", true).await;
    let app = TestApp::new(&fx);
    let newcomer = Uuid::new_v4();
    let token = app.token(newcomer, UserRole::Renter);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/car-renter/cars/{}/book", fx.car.id),
            Some(&token),
            Some(booking_body("2025-01-10", "2025-01-13", true)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["booking"]["renterId"], newcomer.to_string());
    let booking_id = body["data"]["booking"]["id"].as_str().unwrap().to_string();
    let uri = format!("/car-renter/bookings/{}/ride-requests", booking_id);

    let (status, body) = app.call(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let requests = body["data"]["rideRequests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["status"], "pending");
    assert!(!requests[0]["notifiedAt"].is_null());

    let (status, body) = app
        .call(Method::GET, &uri, Some(&app.token(fx.renter.id, UserRole::Renter)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}
