// Axum API Server Module
//
// Purpose: serve the inventory grid, the filter/sort engine and the form,
// action and tracking endpoints behind the static dealership pages.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::{Duration, Instant};

#[cfg(feature = "api")]
use anyhow::Context;

#[cfg(feature = "api")]
use crate::actions::{self, ActionError, ActionKind, SelectOption};
#[cfg(feature = "api")]
use crate::analytics::{track_event, TrackEvent};
#[cfg(feature = "api")]
use crate::config::SiteConfig;
#[cfg(feature = "api")]
use crate::forms::{format_phone, today_local, ContactForm, FormError, TestDriveForm};
#[cfg(feature = "api")]
use crate::inventory::{FilterError, FilterState, Inventory};
#[cfg(feature = "api")]
use crate::notification::{Notification, Notifier, ToastQueue};
#[cfg(feature = "api")]
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    /// Full card collection, never filtered in place
    pub inventory: Arc<Inventory>,
    /// Listing responses keyed by filter state
    pub cache: Cache<String, serde_json::Value>,
    pub toasts: Arc<ToastQueue>,
}

#[cfg(feature = "api")]
impl AppState {
    pub async fn new(config: &SiteConfig) -> anyhow::Result<Self> {
        let path = config.inventory_path();
        tracing::info!("Loading inventory from {:?}...", path);
        let inventory = Inventory::load(&path)
            .with_context(|| format!("Failed to load inventory: {:?}", path))?;
        tracing::info!("Loaded {} vehicle cards", inventory.len());

        Ok(Self::from_inventory(inventory, config))
    }

    pub fn from_inventory(inventory: Inventory, config: &SiteConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self {
            inventory: Arc::new(inventory),
            cache,
            toasts: Arc::new(ToastQueue::new(config.toast_dismiss)),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // HTML pages
        .route("/", get(pages::home_page))
        .route("/inventory", get(pages::inventory_page))

        // Inventory endpoints (JSON)
        // categories route must come before any future :id route
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/categories", get(list_categories))

        // Forms
        .route("/api/forms/contact", post(submit_contact))
        .route("/api/forms/test-drive", post(submit_test_drive))
        .route("/api/format/phone", get(format_phone_value))

        // Buttons, toasts, tracking
        .route("/api/actions/:action", post(run_action))
        .route("/api/notifications", get(list_notifications))
        .route("/api/events", post(record_event))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Raw values of the three inventory selects
#[cfg(feature = "api")]
#[derive(Debug, Default, serde::Deserialize)]
pub struct VehicleQuery {
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
}

#[cfg(feature = "api")]
impl VehicleQuery {
    pub fn filter_state(&self) -> Result<FilterState, FilterError> {
        FilterState::from_controls(
            self.category.as_deref(),
            self.price.as_deref(),
            self.sort.as_deref(),
        )
    }
}

#[cfg(feature = "api")]
async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filters = query.filter_state()?;
    let cache_key = format!("vehicles:{}", filters.cache_key());

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(Json(cached));
    }

    let start = Instant::now();
    let view = state.inventory.view(&filters);
    let data: Vec<serde_json::Value> = view
        .visible
        .iter()
        .filter_map(|&pos| {
            let card = state.inventory.get(pos)?;
            let mut value = serde_json::to_value(card).ok()?;
            value["position"] = serde_json::json!(pos);
            Some(value)
        })
        .collect();
    let elapsed = start.elapsed();

    tracing::debug!(
        "Filter {} -> {} visible, {} hidden in {:?}",
        filters.cache_key(),
        view.visible.len(),
        view.hidden.len(),
        elapsed
    );

    let result = serde_json::json!({
        "rows": data.len(),
        "total": state.inventory.len(),
        "hidden": view.hidden,
        "filters": {
            "category": filters.category.to_string(),
            "price": filters.price_range.to_string(),
            "sort": filters.sort.as_str(),
        },
        "data": data,
    });

    // Cache result
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn list_categories(State(state): State<AppState>) -> Json<serde_json::Value> {
    let counts = state.inventory.category_counts();
    let data: Vec<serde_json::Value> = state
        .inventory
        .categories()
        .into_iter()
        .map(|category| {
            serde_json::json!({
                "category": category,
                "count": counts.get(category).copied().unwrap_or(0),
            })
        })
        .collect();

    Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    }))
}

#[cfg(feature = "api")]
async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<Notification>, AppError> {
    track_event(&TrackEvent::form_submission("contactForm", "contact-form"));
    let outcome = form.submit();
    respond_with_toast(&state, outcome)
}

#[cfg(feature = "api")]
async fn submit_test_drive(
    State(state): State<AppState>,
    Json(form): Json<TestDriveForm>,
) -> Result<Json<Notification>, AppError> {
    track_event(&TrackEvent::form_submission("testDriveForm", "test-drive-form"));
    let outcome = form.submit(today_local());
    respond_with_toast(&state, outcome)
}

/// Every form outcome raises exactly one toast
#[cfg(feature = "api")]
fn respond_with_toast(
    state: &AppState,
    outcome: Result<Notification, FormError>,
) -> Result<Json<Notification>, AppError> {
    match outcome {
        Ok(notification) => {
            state.toasts.send(&notification);
            Ok(Json(notification))
        }
        Err(e) => {
            tracing::debug!("Form rejected: {}", e);
            state.toasts.send(&e.notification());
            Err(AppError::Form(e))
        }
    }
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct PhoneQuery {
    value: String,
}

#[cfg(feature = "api")]
async fn format_phone_value(Query(params): Query<PhoneQuery>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "value": format_phone(&params.value),
    }))
}

/// Body of a button action
#[cfg(feature = "api")]
#[derive(Debug, Default, serde::Deserialize)]
struct ActionRequest {
    /// Vehicle, location or team member named on the button
    target: Option<String>,
    /// Vehicle select options when the page has the booking form
    options: Option<Vec<SelectOption>>,
    /// Button label and class, for click tracking
    text: Option<String>,
    class: Option<String>,
}

#[cfg(feature = "api")]
async fn run_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<actions::ActionOutcome>, AppError> {
    let kind: ActionKind = action.parse()?;
    track_event(&actions::click_event(
        kind,
        request.text.as_deref(),
        request.class.as_deref(),
    ));
    let outcome = actions::perform(
        kind,
        request.target.as_deref(),
        request.options.as_deref(),
    )?;
    state.toasts.send(&outcome.notification);
    Ok(Json(outcome))
}

#[cfg(feature = "api")]
async fn list_notifications(State(state): State<AppState>) -> Json<serde_json::Value> {
    let now = Instant::now();
    let data: Vec<serde_json::Value> = state
        .toasts
        .active(now)
        .iter()
        .map(|toast| {
            serde_json::json!({
                "id": toast.id,
                "message": toast.notification.message,
                "severity": toast.notification.severity,
                "color": toast.notification.severity.color(),
                "class": toast.notification.severity.css_class(),
                "phase": state.toasts.phase(toast, now),
            })
        })
        .collect();

    Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    }))
}

#[cfg(feature = "api")]
async fn record_event(Json(event): Json<TrackEvent>) -> StatusCode {
    track_event(&event);
    StatusCode::NO_CONTENT
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Form(FormError),
    NotFound(String),
}

#[cfg(feature = "api")]
impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

#[cfg(feature = "api")]
impl From<ActionError> for AppError {
    fn from(e: ActionError) -> Self {
        match e {
            ActionError::Unknown(_) => AppError::NotFound(e.to_string()),
            ActionError::MissingTarget(_) => AppError::BadRequest(e.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            AppError::Form(e) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": e.to_string(),
                    "notification": e.notification(),
                }),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": msg }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
