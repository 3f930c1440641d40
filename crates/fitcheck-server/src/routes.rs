//! HTTP routes and handlers
//!
//! Handlers that can consult an external provider try it first and fall
//! back to the local core on any failure. Only malformed requests produce
//! error responses.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fitcheck_core::{GarmentRecord, WeatherBand};
use fitcheck_engine::{OutfitResult, RuleSet, WardrobeSummary};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::advisor::{Recommendation, WeatherContext};
use crate::state::AppState;
use crate::weather::WeatherReport;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/classify", post(classify))
        .route("/ai/analyze", post(analyze_photo))
        .route("/weather", get(weather))
        .route("/suggest", post(suggest))
        .route("/suggest/text", post(suggest_from_text))
        .route("/recommend", post(recommend))
        .route(
            "/wardrobe",
            get(list_wardrobe).post(add_wardrobe_item).delete(reset_wardrobe),
        )
        .route("/wardrobe/summary", get(wardrobe_summary))
        .route("/rules", get(rules));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest("/api", api)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn count_request(endpoint: &'static str) {
    metrics::counter!("fitcheck_requests_total", "endpoint" => endpoint).increment(1);
}

fn record_fallback(endpoint: &'static str, provider: &str, err: &fitcheck_core::Error) {
    warn!(endpoint, provider, error = %err, "External provider failed, falling back to core");
    metrics::counter!("fitcheck_fallbacks_total", "endpoint" => endpoint).increment(1);
}

fn default_vibe() -> String {
    "casual".to_string()
}

fn default_occasion() -> String {
    "general".to_string()
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "FitCheck",
        "mode": state.config.mode.as_str(),
        "advisor_available": state.advisor.is_some(),
        "weather_available": state.weather.is_some(),
        "wardrobe_items": state.wardrobe.len(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    #[serde(default)]
    filename: String,
    description: Option<String>,
}

async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    count_request("classify");

    // the advisor tags by filename, so without one the core answers
    if let Some(advisor) = state.advisor.as_ref().filter(|_| !req.filename.is_empty()) {
        match advisor.analyze_garment(&req.filename, None).await {
            Ok(raw) => {
                let analysis = raw.normalize(&req.filename, &state.filenames);
                let description = req
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("{} {}", analysis.name, req.filename));
                let keywords = state.classifier.classify(&description);
                return Ok(Json(json!({
                    "success": true,
                    "classification": analysis.into_classification(keywords),
                    "description": description,
                    "filename": req.filename,
                    "ai_powered": true,
                    "source": advisor.name(),
                })));
            }
            Err(e) => record_fallback("classify", advisor.name(), &e),
        }
    }

    let description = req.description.unwrap_or_else(|| req.filename.clone());
    let started = Instant::now();
    let result = state.classifier.classify(&description);
    metrics::histogram!("fitcheck_classify_latency_us").record(started.elapsed().as_micros() as f64);

    Ok(Json(json!({
        "success": true,
        "classification": result,
        "description": description,
        "filename": req.filename,
        "ai_powered": false,
        "source": "keyword classifier",
    })))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    filename: String,
    image_data: Option<String>,
}

async fn analyze_photo(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    count_request("analyze");

    if req.filename.trim().is_empty() {
        return Err(AppError::InvalidRequest("Filename is required".to_string()));
    }

    if let Some(advisor) = &state.advisor {
        match advisor
            .analyze_garment(&req.filename, req.image_data.as_deref())
            .await
        {
            Ok(raw) => {
                let analysis = raw.normalize(&req.filename, &state.filenames);
                debug!(filename = %req.filename, category = %analysis.category, "Advisor analysis normalized");
                return Ok(Json(json!({
                    "success": true,
                    "analysis": analysis,
                    "filename": req.filename,
                    "ai_powered": true,
                    "source": advisor.name(),
                })));
            }
            Err(e) => record_fallback("analyze", advisor.name(), &e),
        }
    }

    let analysis = state.filenames.analyze(&req.filename);
    Ok(Json(json!({
        "success": true,
        "analysis": analysis,
        "filename": req.filename,
        "ai_powered": false,
        "source": "filename heuristics",
    })))
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

async fn weather(State(state): State<AppState>, Query(query): Query<WeatherQuery>) -> Json<Value> {
    count_request("weather");

    let city = query
        .city
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| state.config.weather.default_city.clone());

    if let Some(provider) = &state.weather {
        match provider.current(&city).await {
            Ok(report) => {
                return Json(json!({
                    "success": true,
                    "weather": report,
                    "city": city,
                    "source": provider.name(),
                }))
            }
            Err(e) => record_fallback("weather", provider.name(), &e),
        }
    }

    Json(json!({
        "success": true,
        "weather": WeatherReport::mock(),
        "city": city,
        "source": "mock",
    }))
}

#[derive(Debug, Deserialize)]
struct SuggestRequest {
    weather: String,
    vibe: String,
    #[serde(default = "default_occasion")]
    occasion: String,
}

/// Run the engine over a snapshot of the wardrobe
fn suggest_from_store(state: &AppState, weather: &str, vibe: &str, occasion: &str) -> OutfitResult {
    let wardrobe = state.wardrobe.list_items();
    state
        .engine
        .lock()
        .suggest_outfit(&wardrobe, weather, vibe, occasion)
}

async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    count_request("suggest");

    let outfit = suggest_from_store(&state, &req.weather, &req.vibe, &req.occasion);
    Ok(Json(json!({ "success": true, "outfit": outfit })))
}

#[derive(Debug, Deserialize)]
struct TextRequest {
    request: String,
}

async fn suggest_from_text(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    count_request("suggest_text");

    let interpreted = match &state.advisor {
        Some(advisor) => match advisor.interpret_request(&req.request).await {
            Ok(parsed) => Some((parsed, advisor.name().to_string())),
            Err(e) => {
                record_fallback("suggest_text", advisor.name(), &e);
                None
            }
        },
        None => None,
    };
    let (parsed, source) = interpreted
        .unwrap_or_else(|| (state.parser.parse(&req.request), "keyword parser".to_string()));

    let outfit = suggest_from_store(&state, parsed.weather.as_str(), &parsed.vibe, &parsed.occasion);
    Ok(Json(json!({
        "success": true,
        "parsed": parsed,
        "source": source,
        "outfit": outfit,
    })))
}

/// Weather as a band name or as raw conditions
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeatherInput {
    Band(String),
    Conditions {
        temperature: f64,
        #[serde(default)]
        condition: Option<String>,
    },
}

impl WeatherInput {
    fn into_context(self) -> WeatherContext {
        match self {
            Self::Band(band) => WeatherContext {
                band: WeatherBand::parse(&band).band(),
                temperature: None,
                condition: None,
            },
            Self::Conditions {
                temperature,
                condition,
            } => WeatherContext {
                band: WeatherBand::from_temperature(temperature),
                temperature: Some(temperature),
                condition,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    weather: Option<WeatherInput>,
    #[serde(default = "default_vibe")]
    vibe: String,
    #[serde(default = "default_occasion")]
    occasion: String,
}

async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    count_request("recommend");

    let context = req.weather.map_or(
        WeatherContext {
            band: WeatherBand::DEFAULT,
            temperature: None,
            condition: None,
        },
        WeatherInput::into_context,
    );

    if let Some(advisor) = &state.advisor {
        let wardrobe = state.wardrobe.list_items();
        match advisor.recommend(&wardrobe, &context, &req.vibe, &req.occasion).await {
            Ok(recommendation) => {
                return Ok(Json(json!({
                    "success": true,
                    "recommendation": recommendation,
                    "weather": context,
                    "vibe": req.vibe,
                    "occasion": req.occasion,
                    "source": advisor.name(),
                })))
            }
            Err(e) => record_fallback("recommend", advisor.name(), &e),
        }
    }

    let outfit = suggest_from_store(&state, context.band.as_str(), &req.vibe, &req.occasion);
    Ok(Json(json!({
        "success": true,
        "recommendation": Recommendation::from(&outfit),
        "weather": context,
        "vibe": req.vibe,
        "occasion": req.occasion,
        "source": "outfit engine",
    })))
}

async fn list_wardrobe(State(state): State<AppState>) -> Json<Value> {
    let items = state.wardrobe.list_items();
    Json(json!({
        "success": true,
        "total_items": items.len(),
        "items": items,
    }))
}

/// A full record, or a name plus a description for the classifier to tag
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NewItem {
    Record(GarmentRecord),
    Describe { name: String, description: String },
}

async fn add_wardrobe_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(item) = payload?;
    count_request("wardrobe_add");

    let record = match item {
        NewItem::Record(record) => record,
        NewItem::Describe { name, description } => state
            .classifier
            .classify(&description)
            .to_record(name)
            .ok_or_else(|| {
                AppError::Unprocessable(format!(
                    "Could not determine a garment type from '{}'",
                    description
                ))
            })?,
    };
    record
        .validate()
        .map_err(|e| AppError::Unprocessable(e.to_string()))?;

    state.wardrobe.add_item(record.clone());
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "item": record,
            "total_items": state.wardrobe.len(),
        })),
    ))
}

async fn reset_wardrobe(State(state): State<AppState>) -> Json<Value> {
    let removed = state.wardrobe.len();
    state.wardrobe.reset();
    info!(removed, "Wardrobe reset over HTTP");
    Json(json!({ "success": true, "removed": removed }))
}

async fn wardrobe_summary(State(state): State<AppState>) -> Json<WardrobeSummary> {
    Json(state.wardrobe.summary())
}

async fn rules(State(state): State<AppState>) -> Json<RuleSet> {
    Json(RuleSet::clone(&state.rules))
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Endpoint not found")]
    NotFound,

    #[error(transparent)]
    Rejected(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Rejected(rejection) => rejection.status(),
        };
        let kind = match status {
            StatusCode::NOT_FOUND => "not_found_error",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable_entity_error",
            _ => "invalid_request_error",
        };

        let body = json!({
            "error": {
                "message": self.to_string(),
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
