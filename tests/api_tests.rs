use actix_web::{http::StatusCode, test, web, App};
use nostos::config::AppConfig;
use nostos::photo::{Location, Photograph, Privacy};
use nostos::selection::StaleSelectionPolicy;
use nostos::store::PhotoStore;
use nostos::store_clients::memory::MemoryStore;
use nostos::web_server::{routes, VIEWER_HEADER};
use serde_json::{json, Value};
use std::sync::Arc;

fn photo(id: &str, owner: &str, latitude: f64, longitude: f64, uploaded: &str, privacy: Privacy) -> Photograph {
    Photograph {
        id: id.to_string(),
        user_id: owner.to_string(),
        title: id.to_string(),
        description: String::new(),
        image_url: format!("/media/{}.jpg", id),
        thumbnail_url: format!("/media/{}.jpg", id),
        location: Location {
            latitude,
            longitude,
            address: None,
        },
        date_uploaded: uploaded.parse().unwrap(),
        date_taken: None,
        user_tags: None,
        comments: vec![],
        privacy,
    }
}

async fn seeded_store() -> Arc<dyn PhotoStore> {
    let store = MemoryStore::new();
    store.add_photo(photo("near", "alice", 38.10, 37.88, "2024-01-01T00:00:00Z", Privacy::Public)).await.unwrap();
    store.add_photo(photo("far", "alice", 10.0, 10.0, "2024-02-01T00:00:00Z", Privacy::Public)).await.unwrap();
    store.add_photo(photo("alice-private", "alice", 38.09, 37.87, "2024-03-01T00:00:00Z", Privacy::Private)).await.unwrap();
    Arc::new(store)
}

macro_rules! app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppConfig::default()))
                .app_data(web::Data::new($store))
                .configure(routes),
        )
        .await
    };
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn nearby_returns_public_photos_in_range() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/photos/nearby?lat=38.0934&lon=37.8781&radius_km=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec!["near"]);
}

#[actix_web::test]
async fn nearby_includes_the_viewers_private_photos() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/photos/nearby?lat=38.0934&lon=37.8781")
        .insert_header((VIEWER_HEADER, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec!["alice-private", "near"]);
}

#[actix_web::test]
async fn nearby_rejects_invalid_radius_and_coordinates() {
    let app = app!(seeded_store().await);
    for uri in [
        "/api/photos/nearby?lat=38&lon=37&radius_km=0",
        "/api/photos/nearby?lat=95&lon=37",
        "/api/photos/nearby?lat=38&lon=-190",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_web::test]
async fn private_photo_is_hidden_from_strangers() {
    let app = app!(seeded_store().await);

    let req = test::TestRequest::get().uri("/api/photos/alice-private").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/photos/alice-private")
        .insert_header((VIEWER_HEADER, "alice"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/users/alice/photos").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec!["far", "near"]);
}

#[actix_web::test]
async fn upload_requires_a_signed_in_viewer() {
    let store = seeded_store().await;
    let app = app!(store.clone());
    let payload = json!({
        "title": "Castle",
        "imageUrl": "/media/castle.jpg",
        "thumbnailUrl": "/media/castle_t.jpg",
        "location": { "latitude": 38.1, "longitude": 37.9, "address": "Kahramanmaraş Kalesi" },
        "dateTaken": { "year": 1965 }
    });

    let req = test::TestRequest::post().uri("/api/photos").set_json(&payload).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/photos")
        .insert_header((VIEWER_HEADER, "bob"))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Photograph = test::read_body_json(resp).await;
    assert_eq!(created.user_id, "bob");
    assert_eq!(created.privacy, Privacy::Public);

    let stored = store.fetch_photos_by_user("bob").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, created.id);
}

#[actix_web::test]
async fn users_can_be_created_and_fetched() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header((VIEWER_HEADER, "carol"))
        .set_json(json!({ "email": "carol@example.com", "displayName": "Carol" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/users/carol").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["displayName"], "Carol");
    assert_eq!(body["settings"]["privacy"], "public");

    let req = test::TestRequest::get().uri("/api/users/nobody").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn map_view_exposes_initial_camera() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get().uri("/api/map").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["center"]["latitude"], 38.0934);
    assert_eq!(body["zoom"], 8.0);
    assert_eq!(body["focusZoom"], 15.0);
    assert_eq!(body["focusDurationMs"], 1000);
    assert_eq!(body["deselectOnBackgroundClick"], false);
    assert_eq!(body["staleSelection"], "keep");
}

#[actix_web::test]
async fn map_view_reflects_configured_selection_behaviour() {
    let mut config = AppConfig::default();
    config.map.deselect_on_background_click = true;
    config.map.stale_selection = StaleSelectionPolicy::AutoClose;
    config.map.focus_zoom = 12.0;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(seeded_store().await))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/map").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deselectOnBackgroundClick"], true);
    assert_eq!(body["staleSelection"], "auto_close");
    assert_eq!(body["focusZoom"], 12.0);
}

#[actix_web::test]
async fn nearby_rejects_unparseable_query_with_json_error() {
    let app = app!(seeded_store().await);
    for uri in [
        "/api/photos/nearby?lat=abc&lon=37.88",
        "/api/photos/nearby?lon=37.88",
        "/api/photos/nearby?lat=38.1&lon=37.88&radius_km=far",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid argument:"), "{}", message);
    }
}
