use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::geo::GeoFilter;
use crate::photo::{GeoPoint, NewPhotograph, NewUser};
use crate::selection::{SelectionOptions, StaleSelectionPolicy};
use crate::session::Viewer;
use crate::store::PhotoStore;

/// Identity forwarded by the auth proxy in front of this service.
pub const VIEWER_HEADER: &str = "x-user-id";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MapView {
    center: GeoPoint,
    zoom: f64,
    focus_zoom: f64,
    focus_duration_ms: u64,
    mini_map_zoom: f64,
    deselect_on_background_click: bool,
    stale_selection: StaleSelectionPolicy,
}

#[derive(Deserialize, Debug)]
struct NearbyQuery {
    lat: f64,
    lon: f64,
    radius_km: Option<f64>,
}

fn viewer_from(req: &HttpRequest) -> Viewer {
    req.headers()
        .get(VIEWER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(Viewer::signed_in)
        .unwrap_or_default()
}

async fn get_map_view(app_config: web::Data<AppConfig>) -> HttpResponse {
    let map = &app_config.map;
    let selection = SelectionOptions::from(map);
    HttpResponse::Ok().json(MapView {
        center: GeoPoint {
            latitude: map.initial_latitude,
            longitude: map.initial_longitude,
        },
        zoom: map.initial_zoom,
        focus_zoom: selection.focus_zoom,
        focus_duration_ms: selection.focus_duration_ms,
        mini_map_zoom: map.mini_map_zoom,
        deselect_on_background_click: selection.deselect_on_background_click,
        stale_selection: selection.stale_selection,
    })
}

async fn get_nearby_photos(
    req: HttpRequest,
    store: web::Data<Arc<dyn PhotoStore>>,
    app_config: web::Data<AppConfig>,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse, AppError> {
    log::debug!("Received nearby request: {:?}", query);
    let viewer = viewer_from(&req);
    let reference = GeoPoint::new(query.lat, query.lon)?;
    let radius_km = query.radius_km.unwrap_or(app_config.geo.default_radius_km);
    let limit = app_config.geo.candidate_limit;

    let mut candidates = store.fetch_public_photos_ordered_by_upload_desc(limit).await?;
    if let Some(user_id) = viewer.user_id.as_deref() {
        for own in store.fetch_photos_by_user(user_id).await? {
            if !candidates.iter().any(|c| c.id == own.id) {
                candidates.push(own);
            }
        }
    }

    let photos = GeoFilter::new(limit).filter_nearby_for(&viewer, reference, &candidates, radius_km)?;
    Ok(HttpResponse::Ok().json(photos))
}

async fn get_photo(
    req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<Arc<dyn PhotoStore>>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let viewer = viewer_from(&req);
    log::debug!("Received request for photo {}", id);

    match store.get_photo(&id).await? {
        Some(photo) if viewer.can_see(&photo) => Ok(HttpResponse::Ok().json(photo)),
        _ => Err(AppError::NotFound(format!("photo {}", id))),
    }
}

async fn add_photo(
    req: HttpRequest,
    store: web::Data<Arc<dyn PhotoStore>>,
    body: web::Json<NewPhotograph>,
) -> Result<HttpResponse, AppError> {
    let viewer = viewer_from(&req);
    let owner = viewer.require_user()?.to_string();
    let upload = body.into_inner();
    GeoPoint::new(upload.location.latitude, upload.location.longitude)?;

    let photo = upload.into_photograph(uuid::Uuid::new_v4().to_string(), owner, Utc::now());
    log::info!("User {} uploaded photo {}", photo.user_id, photo.id);
    store.add_photo(photo.clone()).await?;
    Ok(HttpResponse::Created().json(photo))
}

async fn get_user_photos(
    req: HttpRequest,
    path: web::Path<String>,
    store: web::Data<Arc<dyn PhotoStore>>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let viewer = viewer_from(&req);
    let photos: Vec<_> = store
        .fetch_photos_by_user(&user_id)
        .await?
        .into_iter()
        .filter(|p| viewer.can_see(p))
        .collect();
    log::debug!("Returning {} photos of user {}", photos.len(), user_id);
    Ok(HttpResponse::Ok().json(photos))
}

async fn get_user(
    path: web::Path<String>,
    store: web::Data<Arc<dyn PhotoStore>>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match store.get_user(&id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound(format!("user {}", id))),
    }
}

async fn create_user(
    req: HttpRequest,
    store: web::Data<Arc<dyn PhotoStore>>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    let viewer = viewer_from(&req);
    let id = viewer
        .user_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let user = body.into_inner().into_user(id, Utc::now());
    log::info!("Creating user {}", user.id);
    store.create_user(user.clone()).await?;
    Ok(HttpResponse::Created().json(user))
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("no such route".into()))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {}", err);
        AppError::InvalidArgument(err.to_string()).into()
    });

    cfg.app_data(query_config)
        .service(web::resource("/api/map").route(web::get().to(get_map_view)))
        .service(web::resource("/api/photos/nearby").route(web::get().to(get_nearby_photos)))
        .service(web::resource("/api/photos").route(web::post().to(add_photo)))
        .service(web::resource("/api/photos/{id}").route(web::get().to(get_photo)))
        .service(web::resource("/api/users").route(web::post().to(create_user)))
        .service(web::resource("/api/users/{id}").route(web::get().to(get_user)))
        .service(web::resource("/api/users/{id}/photos").route(web::get().to(get_user_photos)));
}

pub async fn start_web_server(
    config: Arc<AppConfig>,
    store: Arc<dyn PhotoStore>,
) -> std::io::Result<()> {
    let port = config.web_port;
    let config_data = web::Data::from(config);
    let store_data = web::Data::new(store);

    log::info!("Starting web server on port: {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(store_data.clone())
            .configure(routes)
            .default_service(web::to(not_found))
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
