use std::sync::Arc;

use handyhub_core::models::{
    Booking, BookingQuery, NewBooking, ProfileUpdate, ProviderApplication, ProviderQuery,
    ReviewQuery, ServiceProvider,
};
use handyhub_core::{ClientConfig, Error, HandyHub, KeyValueStore, MemoryStore, Method};
use serde_json::{json, Number, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hub(server: &MockServer) -> (HandyHub, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = ClientConfig::default().with_base_url(format!("{}/api", server.uri()));
    let hub = HandyHub::new(&config, store.clone()).expect("client should build");
    (hub, store)
}

fn plumbing_booking() -> NewBooking {
    NewBooking {
        provider_id: "p1".to_string(),
        service: "Plumbing".to_string(),
        date: "2024-01-01".to_string(),
        time: "10:00".to_string(),
        location: "Dhaka".to_string(),
        notes: None,
        amount: Number::from(500u32),
    }
}

#[tokio::test]
async fn test_create_booking_posts_exact_body_and_returns_response_unmodified() {
    let server = MockServer::start().await;
    let reply = json!({
        "success": true,
        "booking": { "id": "b1", "providerId": "p1", "status": "pending", "amount": 500 }
    });

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "providerId": "p1",
            "service": "Plumbing",
            "date": "2024-01-01",
            "time": "10:00",
            "location": "Dhaka",
            "amount": 500
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(reply.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let response: Value = hub.bookings().create(&plumbing_booking()).await.unwrap();
    assert_eq!(response, reply);
}

#[tokio::test]
async fn test_create_booking_sends_fractional_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "providerId": "p1",
            "service": "Plumbing",
            "date": "2024-01-01",
            "time": "10:00",
            "location": "Dhaka",
            "amount": 499.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "b2", "amount": 499.5 })))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let booking = NewBooking {
        amount: Number::from_f64(499.5).unwrap(),
        ..plumbing_booking()
    };
    let created: Booking = hub.bookings().create(&booking).await.unwrap();
    assert_eq!(created.amount.and_then(|amount| amount.as_f64()), Some(499.5));
}

#[tokio::test]
async fn test_json_content_type_always_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "a@b.com" })))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let profile: handyhub_core::models::User = hub.users().profile().await.unwrap();
    assert_eq!(profile.email, "a@b.com");
}

#[tokio::test]
async fn test_bearer_header_only_when_token_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "a@b.com" })))
        .expect(2)
        .mount(&server)
        .await;

    let (hub, store) = hub(&server);
    let _: Value = hub.users().profile().await.unwrap();
    store.set("authToken", "tok-123").unwrap();
    let _: Value = hub.users().profile().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer tok-123"
    );
}

#[tokio::test]
async fn test_error_status_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/b1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let err = hub.bookings().get::<Value>("b1").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_error_status_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookings/b1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let err = hub.bookings().cancel::<Value>("b1").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: Some(500), .. }));
    assert_eq!(err.to_string(), "API Error");
}

#[tokio::test]
async fn test_non_json_body_is_malformed_even_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/service-providers/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let err = hub.providers().get::<Value>("p1").await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_update_status_puts_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/bookings/b7"))
        .and(body_json(json!({ "status": "completed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "b7", "status": "completed" })))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let booking: Booking = hub.bookings().update_status("b7", "completed").await.unwrap();
    assert_eq!(booking.status.as_deref(), Some("completed"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].method.as_str(), Method::Put.as_str());
}

#[tokio::test]
async fn test_list_bookings_default_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let bookings: Vec<Booking> = hub.bookings().list(&BookingQuery::default()).await.unwrap();
    assert!(bookings.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("page=1&limit=20"));
}

#[tokio::test]
async fn test_list_bookings_by_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "b1", "status": "pending" }])))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let bookings: Vec<Booking> = hub
        .bookings()
        .list(&BookingQuery::with_status("pending"))
        .await
        .unwrap();
    assert_eq!(bookings.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=pending&page=1&limit=20"));
}

#[tokio::test]
async fn test_list_providers_sends_only_supplied_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/service-providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "p1", "name": "VIP Service Center", "rating": 4.8, "price": "৳500" }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let providers: Vec<ServiceProvider> = hub
        .providers()
        .list(&ProviderQuery {
            category: Some("Plumbing".to_string()),
            min_rating: Some(4.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(providers[0].name.as_deref(), Some("VIP Service Center"));
    assert_eq!(providers[0].extra["price"], "৳500");

    let _: Value = hub.providers().list(&ProviderQuery::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("category=Plumbing&minRating=4"));
    assert!(requests[1].url.query().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_provider_reviews_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/service-providers/p1/reviews"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reviews": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let reviews: Value = hub.providers().reviews("p1", ReviewQuery::new(3, 5)).await.unwrap();
    assert_eq!(reviews, json!({ "reviews": [] }));
}

#[tokio::test]
async fn test_profile_update_and_become_provider() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/profile"))
        .and(body_json(json!({ "fullName": "Provat", "location": "Dhaka" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "pmahi@uiu.com", "fullName": "Provat" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/become-provider"))
        .and(body_json(json!({ "services": ["Plumbing", "Electrical"], "experience": "5 years" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": "provider" })))
        .expect(1)
        .mount(&server)
        .await;

    let (hub, _) = hub(&server);
    let update = ProfileUpdate {
        full_name: Some("Provat".to_string()),
        location: Some("Dhaka".to_string()),
        ..Default::default()
    };
    let user: handyhub_core::models::User = hub.users().update_profile(&update).await.unwrap();
    assert_eq!(user.display_name(), "Provat");

    let application = ProviderApplication {
        services: vec!["Plumbing".to_string(), "Electrical".to_string()],
        experience: Some("5 years".to_string()),
        certifications: None,
    };
    let reply: Value = hub.users().become_provider(&application).await.unwrap();
    assert_eq!(reply["role"], "provider");
}
