use std::time::Instant;

use axum::{
    Router,
    extract::{Json, Query, State, rejection::QueryRejection},
    http::Method,
    response::Response,
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::api::models::{AnimalInfo, AnimalQuery, ImageQuery};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::facts::{build_prompt, parse_completion};
use crate::gemini::generate_content;
use crate::unsplash::{download, random_photo_url, with_size_hints};

pub fn create_router(app_state: AppState) -> Router {
    // Credentialed CORS cannot use wildcard headers, so requested headers are mirrored.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([app_state.config.allowed_origin.clone()]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/get_animal_info", get(animal_info_handler))
        .route("/get_image", get(image_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn require_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidQueryError("query must not be empty".to_string()));
    }
    Ok(query)
}

async fn animal_info_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<AnimalQuery>, QueryRejection>,
) -> Result<Json<AnimalInfo>> {
    let Query(params) = params.map_err(|e| AppError::InvalidQueryError(e.body_text()))?;
    let subject = require_query(&params.query)?;
    let start_time = Instant::now();
    tracing::info!(query = subject, "Fetching animal information");

    let prompt = build_prompt(subject);
    let completion = generate_content(&state.http, &state.config, &prompt)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Gemini call failed"))?;
    tracing::debug!(%completion, "Gemini completion");

    let info = parse_completion(&completion);
    tracing::info!(
        query = subject,
        facts = info.interesting_facts.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Parsed animal information"
    );

    Ok(Json(info))
}

async fn image_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<ImageQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = params.map_err(|e| AppError::InvalidQueryError(e.body_text()))?;
    let subject = require_query(&params.query)?;
    let start_time = Instant::now();
    tracing::info!(query = subject, "Fetching image");

    let raw_url = random_photo_url(&state.http, &state.config, subject).await?;
    let image_url = with_size_hints(raw_url, &params);
    let bytes = download(&state.http, image_url).await?;

    tracing::info!(
        query = subject,
        bytes = bytes.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Relaying image"
    );

    Ok(response::jpeg(bytes))
}
