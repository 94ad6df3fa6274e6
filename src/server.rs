use axum::{
    Form, Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::backend::{AnswerService, QueryClient};
use crate::chat::{Message, Phase};
use crate::config::AppConfig;
use crate::host::{HostShim, inject_widget_middleware};
use crate::ui::{
    self, STYLESHEET, STYLESHEET_PATH,
    view_model::{PanelView, WidgetView},
};
use crate::widget::{self, AskOutcome, WidgetStore};

/// Upper bound for any single widget request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How often idle widget instances are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Mount point for `site.static_dir`.
pub const STATIC_PATH: &str = "/static";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let client = QueryClient::new(config.backend.endpoint(), config.backend.timeout())?;
    info!(
        name: "backend.config.loaded",
        endpoint = %client.endpoint(),
        timeout_secs = config.backend.timeout_secs,
        "Answer service configured"
    );

    let state = app_state(Arc::clone(&config), Arc::new(client));

    spawn_cleanup(state.widgets.clone(), config.widget.idle_timeout());

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        site_root = %config.site.root,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Periodically unmount widgets whose page went away without saying so.
fn spawn_cleanup(widgets: WidgetStore, idle_timeout: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = widgets.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                info!(
                    name: "widget.cleanup",
                    removed,
                    remaining = widgets.len(),
                    "Unmounted idle widgets"
                );
            }
        }
    });
}

/// Build the application router.
///
/// Widget routes live under `/widget`; everything else falls through to the
/// documentation site with the host shim applied.
pub fn build_router(state: AppState) -> Router {
    let shim = HostShim::new(
        ui::render_mount(&state.config.widget),
        state.config.site.body_limit_bytes,
    );
    let site = Router::new()
        .fallback_service(ServeDir::new(&state.config.site.root))
        .layer(axum::middleware::from_fn_with_state(
            shim,
            inject_widget_middleware,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .route(STYLESHEET_PATH, get(widget_stylesheet))
        .route(ui::MOUNT_PATH, get(mount_widget))
        .route("/widget/{id}/toggle", post(toggle_widget))
        .route("/widget/{id}/close", post(close_widget))
        .route("/widget/{id}/panel", get(get_panel))
        .route("/widget/{id}/messages", post(submit_message))
        .route("/widget/{id}/transcript", get(get_transcript))
        .route("/widget/{id}/unmount", post(unmount_widget))
        .nest_service(STATIC_PATH, ServeDir::new(&state.config.site.static_dir))
        .layer(axum::middleware::from_fn(
            |req: Request, next: Next| async move {
                match tokio::time::timeout(REQUEST_TIMEOUT, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .with_state(state)
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /healthz
async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /widget/widget.css
async fn widget_stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// GET /widget/mount - Mount a fresh widget for this page view.
async fn mount_widget(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let id = state.widgets.mount();
    info!(name: "widget.mounted", widget_id = %id, "Widget mounted");
    render_widget(&state, &id)
}

/// POST /widget/:id/toggle - Open or close the modal.
async fn toggle_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let open = state.widgets.toggle(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(widget_id = %id, open, "Widget toggled");
    render_widget(&state, &id)
}

/// POST /widget/:id/close - Close the modal.
async fn close_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    state.widgets.close(&id).ok_or(StatusCode::NOT_FOUND)?;
    render_widget(&state, &id)
}

/// GET /widget/:id/panel - Re-render the chat panel.
async fn get_panel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    render_panel(&state, &id)
}

/// Form body for a submitted question.
#[derive(Debug, Deserialize)]
struct SubmitForm {
    /// Raw text box contents. Absent when the box was disabled.
    #[serde(default)]
    message: String,
}

/// POST /widget/:id/messages - Submit a question.
async fn submit_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, StatusCode> {
    match widget::ask(&state.widgets, &state.answers, &id, &form.message) {
        AskOutcome::NotMounted => return Err(StatusCode::NOT_FOUND),
        AskOutcome::Ignored => {
            tracing::debug!(widget_id = %id, "Submit ignored");
        }
        AskOutcome::Accepted => {}
    }
    render_panel(&state, &id)
}

/// Transcript DTO for diagnostics.
#[derive(Debug, Serialize)]
struct TranscriptDto {
    widget_id: String,
    open: bool,
    phase: Phase,
    messages: Vec<Message>,
}

/// GET /widget/:id/transcript - Current transcript and phase as JSON.
async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptDto>, StatusCode> {
    state
        .widgets
        .with_instance(&id, |w| TranscriptDto {
            widget_id: w.id().to_owned(),
            open: w.is_open(),
            phase: w.controller().phase(),
            messages: w.controller().transcript().messages().to_vec(),
        })
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// POST /widget/:id/unmount - Dispose of a widget (sent on page hide).
async fn unmount_widget(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.widgets.unmount(&id) {
        info!(name: "widget.unmounted", widget_id = %id, "Widget unmounted");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering helpers
// ─────────────────────────────────────────────────────────────────────────────

fn render_widget(state: &AppState, id: &str) -> Result<Html<String>, StatusCode> {
    let view = state
        .widgets
        .with_instance(id, |w| WidgetView::from_instance(w, &state.config.widget))
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(ui::render_widget(view)))
}

fn render_panel(state: &AppState, id: &str) -> Result<Html<String>, StatusCode> {
    let view = state
        .widgets
        .with_instance(id, |w| PanelView::from_instance(w, &state.config.widget))
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(ui::render_panel(view)))
}

/// Assemble [`AppState`] around an arbitrary answer service.
pub fn app_state(config: Arc<AppConfig>, answers: Arc<dyn AnswerService>) -> AppState {
    AppState {
        widgets: WidgetStore::new(config.widget.greeting.clone()),
        answers,
        config,
    }
}
