//! Docs Chat Widget
//!
//! A floating "ask the book" chat widget for a documentation site. The server
//! hosts the built site, injects the widget into every page, and forwards
//! readers' questions to an external question-answering service.
//!
//! # Architecture
//!
//! - **Server**: Axum serving the static site plus the `/widget` routes
//! - **Controller**: Idle/Awaiting state machine per mounted widget
//! - **Answer service**: single-shot JSON POST, no retries
//! - **UI**: Leptos SSR + HTMX + Alpine.js, no client bundle
//!
//! # Modules
//!
//! - [`backend`]: Answer service client
//! - [`chat`]: Transcript and interaction controller
//! - [`widget`]: Mounted widget instances
//! - [`ui`]: Presentation shell
//! - [`host`]: Host page integration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod backend;
pub mod chat;
pub mod config;
pub mod host;
pub mod server;
pub mod ui;
pub mod widget;

use crate::config::AppConfig;

use backend::AnswerService;
use std::sync::Arc;
use widget::WidgetStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Mounted widget instances.
    pub widgets: WidgetStore,
    /// Where questions are sent.
    pub answers: Arc<dyn AnswerService>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
