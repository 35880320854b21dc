use std::sync::Arc;

use cinema_booking::config::Config;
use cinema_booking::models::SeatId;
use cinema_booking::seating::FixedOccupancy;
use cinema_booking::{controllers, AppState};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    base: String,
    http: reqwest::Client,
    remote: MockServer,
}

async fn start() -> Harness {
    let remote = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "asha@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "customer_id": 4, "name": "Asha", "email": "asha@example.com", "is_admin": 0
        })))
        .mount(&remote)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "movie_id": 7, "title": "Heat", "price": "120.00", "available_seats": 3, "description": "LA crime saga" },
            { "movie_id": 8, "title": "Up", "price": 99, "available_seats": 0 },
            { "movie_id": 9, "title": "Refund", "price": "-5.00", "available_seats": 10 }
        ])))
        .mount(&remote)
        .await;

    let config = Config::with_api_base_url(remote.uri());
    let occupancy = FixedOccupancy::new().with_showing(7, [SeatId::new(1, 1)]);
    let state = AppState::with_occupancy(config, Arc::new(occupancy)).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, controllers::app(state).into_make_service()).await.unwrap();
    });

    Harness { base: format!("http://{addr}/api"), http: reqwest::Client::new(), remote }
}

impl Harness {
    async fn open_movie(&self, movie_id: i64) -> reqwest::Response {
        self.http
            .post(format!("{}/seat-sessions", self.base))
            .json(&json!({ "movie_id": movie_id }))
            .send()
            .await
            .unwrap()
    }

    async fn toggle(&self, id: &str, row: u16, column: u16) -> Value {
        self.http
            .post(format!("{}/seat-sessions/{id}/seats/{row}/{column}", self.base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn full_selection_flow_adds_to_watchlist() {
    let h = start().await;
    Mock::given(method("POST"))
        .and(path("/watchlist/"))
        .and(body_json(json!({ "user_id": 4, "movie_id": 7, "seats_selected": 2, "selected_seats": "2-1,2-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Added to watchlist" })))
        .expect(1)
        .mount(&h.remote)
        .await;

    let res = h.open_movie(7).await;
    assert_eq!(res.status(), 201);
    let snap: Value = res.json().await.unwrap();
    let id = snap["session_id"].as_str().unwrap().to_string();
    assert_eq!(snap["rows"][0][0]["occupied"], true);
    assert_eq!(snap["target_count"], 1);
    assert_eq!(snap["max_target_count"], 3);

    let target: Value = h
        .http
        .put(format!("{}/seat-sessions/{id}/target", h.base))
        .json(&json!({ "count": 2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(target["target"], 2);
    assert_eq!(target["session"]["total_price"], 240.0);

    let occupied = h.toggle(&id, 1, 1).await;
    assert_eq!(occupied["outcome"], "ignored");

    h.toggle(&id, 2, 1).await;
    let second = h.toggle(&id, 2, 2).await;
    assert_eq!(second["outcome"], "selected");
    assert_eq!(second["session"]["confirm"]["state"], "enabled");

    // без авторизации подтвердить нельзя
    let anon = h
        .http
        .post(format!("{}/seat-sessions/{id}/confirm", h.base))
        .send()
        .await
        .unwrap();
    assert_eq!(anon.status(), 401);

    let confirmed = h
        .http
        .post(format!("{}/seat-sessions/{id}/confirm", h.base))
        .basic_auth("asha@example.com", Some("pw"))
        .send()
        .await
        .unwrap();
    assert_eq!(confirmed.status(), 200);
    let body: Value = confirmed.json().await.unwrap();
    assert_eq!(body["confirmed"]["selected_seat_ids"], json!(["2-1", "2-2"]));

    // сессия закрыта
    let gone = h.http.get(format!("{}/seat-sessions/{id}", h.base)).send().await.unwrap();
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
async fn incomplete_selection_cannot_confirm() {
    let h = start().await;
    let snap: Value = h.open_movie(7).await.json().await.unwrap();
    let id = snap["session_id"].as_str().unwrap().to_string();

    let res = h
        .http
        .post(format!("{}/seat-sessions/{id}/confirm", h.base))
        .basic_auth("asha@example.com", Some("pw"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 409);

    let still_open = h.http.get(format!("{}/seat-sessions/{id}", h.base)).send().await.unwrap();
    assert_eq!(still_open.status(), 200);
}

#[tokio::test]
async fn failed_watchlist_add_restores_session() {
    let h = start().await;
    Mock::given(method("POST"))
        .and(path("/watchlist/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": false, "message": "db down" })))
        .mount(&h.remote)
        .await;

    let snap: Value = h.open_movie(7).await.json().await.unwrap();
    let id = snap["session_id"].as_str().unwrap().to_string();
    h.toggle(&id, 3, 3).await;

    let res = h
        .http
        .post(format!("{}/seat-sessions/{id}/confirm", h.base))
        .basic_auth("asha@example.com", Some("pw"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    let snap: Value = h
        .http
        .get(format!("{}/seat-sessions/{id}", h.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snap["selected_seats"], json!(["3-3"]));
}

#[tokio::test]
async fn target_above_availability_surfaces_notice() {
    let h = start().await;
    let snap: Value = h.open_movie(7).await.json().await.unwrap();
    let id = snap["session_id"].as_str().unwrap().to_string();

    let res: Value = h
        .http
        .put(format!("{}/seat-sessions/{id}/target", h.base))
        .json(&json!({ "count": 5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(res["target"], 3);
    assert_eq!(res["notice"]["kind"], "target_count_invalid");
    assert_eq!(res["session"]["notice"]["kind"], "target_count_invalid");
}

#[tokio::test]
async fn sold_out_and_unknown_movies_are_refused() {
    let h = start().await;
    assert_eq!(h.open_movie(8).await.status(), 409);
    assert_eq!(h.open_movie(99).await.status(), 404);
}

#[tokio::test]
async fn catalog_movie_with_negative_price_is_rejected() {
    let h = start().await;
    assert_eq!(h.open_movie(9).await.status(), 400);
}

#[tokio::test]
async fn explicit_showing_and_cancel() {
    let h = start().await;
    let snap: Value = h
        .http
        .post(format!("{}/seat-sessions", h.base))
        .json(&json!({ "id": 12, "title": "Memento", "price": 50.0, "available_seats": 4 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = snap["session_id"].as_str().unwrap().to_string();

    let outside = h
        .http
        .post(format!("{}/seat-sessions/{id}/seats/11/1", h.base))
        .send()
        .await
        .unwrap();
    assert_eq!(outside.status(), 404);

    let cancelled = h.http.delete(format!("{}/seat-sessions/{id}", h.base)).send().await.unwrap();
    assert_eq!(cancelled.status(), 204);
    let again = h.http.delete(format!("{}/seat-sessions/{id}", h.base)).send().await.unwrap();
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn catalog_search_filters_locally() {
    let h = start().await;
    let movies: Value = h
        .http
        .get(format!("{}/movies?q=crime", h.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = movies.as_array().unwrap().iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Heat"]);
}
