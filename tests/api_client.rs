use cinema_booking::config::Config;
use cinema_booking::models::{AdminCredentials, Credentials, PaymentIntent, UserContext, WatchlistAdd};
use cinema_booking::services::checkout;
use cinema_booking::services::circuit_breaker::CircuitState;
use cinema_booking::services::{ApiClient, ApiError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    let config = Config::with_api_base_url(server.uri());
    ApiClient::from_config(&config.api, &config.circuit_breaker).unwrap()
}

fn admin() -> AdminCredentials {
    AdminCredentials { admin_email: "root@example.com".into(), admin_password: "hunter2".into() }
}

#[tokio::test]
async fn login_returns_user_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "asha@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "customer_id": 4, "name": "Asha", "email": "asha@example.com", "is_admin": 0
        })))
        .mount(&server)
        .await;

    let user = client(&server)
        .login(&Credentials { email: "asha@example.com".into(), password: "pw".into() })
        .await
        .unwrap();
    assert_eq!(user.customer_id, 4);
    assert!(!user.is_admin);
    assert_eq!(user.admin_credentials().admin_password, "pw");
}

#[tokio::test]
async fn rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .login(&Credentials { email: "x@example.com".into(), password: "bad".into() })
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn rejection_without_body_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genres/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).list_genres().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 404");
}

#[tokio::test]
async fn movies_filter_by_genre() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/"))
        .and(query_param("genre_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "movie_id": 1, "title": "Heat", "price": "120.00", "available_seats": 30, "genre": "Crime" }
        ])))
        .mount(&server)
        .await;

    let movies = client(&server).list_movies(Some(2)).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].price, 120.0);
}

#[tokio::test]
async fn admin_delete_sends_credentials_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/movies/9"))
        .and(query_param("admin_email", "root@example.com"))
        .and(query_param("admin_password", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Movie deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server).delete_movie(9, &admin()).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Movie deleted"));
}

#[tokio::test]
async fn admin_update_sends_credentials_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/genres/3"))
        .and(body_json(json!({ "name": "Noir", "admin_email": "root@example.com", "admin_password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Genre updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let form = cinema_booking::models::GenreForm { name: "Noir".into() };
    client(&server).update_genre(3, &form, &admin()).await.unwrap();
}

#[tokio::test]
async fn watchlist_add_forwards_seat_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/watchlist/"))
        .and(body_json(json!({
            "user_id": 4, "movie_id": 7, "seats_selected": 2, "selected_seats": "3-4,3-5"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Added to watchlist" })))
        .expect(1)
        .mount(&server)
        .await;

    let item = WatchlistAdd { user_id: 4, movie_id: 7, seats_selected: 2, selected_seats: Some("3-4,3-5".into()) };
    client(&server).add_to_watchlist(&item).await.unwrap();
}

#[tokio::test]
async fn soft_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/watchlist/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Failed to remove" })))
        .mount(&server)
        .await;

    let err = client(&server).remove_from_watchlist(5).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to remove");
}

#[tokio::test]
async fn breaker_opens_after_repeated_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genres/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&server)
        .await;

    let api = client(&server);
    for _ in 0..5 {
        assert!(matches!(api.list_genres().await, Err(ApiError::Rejected { status: 500, .. })));
    }
    assert_eq!(api.circuit_breaker_status().0, CircuitState::Open);
    // шестой запрос не доходит до сервера
    assert!(matches!(api.list_genres().await, Err(ApiError::CircuitOpen)));
}

#[tokio::test]
async fn checkout_places_booking_for_cart_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watchlist/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "cart_id": 1, "movie_id": 7, "quantity": 2, "name": "Heat", "price": "120.50" },
            { "cart_id": 2, "movie_id": 8, "quantity": 1, "name": "Up", "price": 99 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({ "customer_id": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "order_id": 31 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_json(json!({ "booking_id": 31, "amount": 340.0, "method": "card", "status": "success" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Payment recorded" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let user: UserContext = serde_json::from_value(json!({
        "customer_id": 4, "name": "Asha", "email": "asha@example.com", "is_admin": 0
    }))
    .unwrap();

    let intent = checkout::place_booking(&api, &user).await.unwrap();
    assert_eq!(intent, PaymentIntent { booking_id: 31, amount: 340.0 });
    checkout::pay(&api, &intent).await.unwrap();
}

#[tokio::test]
async fn checkout_refuses_empty_cart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watchlist/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let user: UserContext = serde_json::from_value(json!({ "customer_id": 4, "email": "asha@example.com" })).unwrap();
    let err = checkout::place_booking(&client(&server), &user).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
}
