//! Dealership Site Engine
//!
//! Presentation logic for the dealership marketing site, with an optional
//! Axum server that renders and serves it.
//!
//! - `inventory/`: vehicle cards and the filter/sort engine behind the grid
//! - `notification`: toasts with severity and timed auto-dismiss
//! - `forms/`: contact and test-drive validation, phone/date input helpers
//! - `actions`: call-to-action buttons (test drive, financing, ...)
//! - `navigation`: mobile menu and keyboard-nav state
//! - `analytics`: click and submission tracking as log records
//! - `config`: environment configuration
//!
//! The server (`api_server`, `web/`) is behind the `api` feature.

pub mod inventory;
pub mod notification;
pub mod forms;
pub mod actions;
pub mod navigation;
pub mod analytics;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use inventory::{apply, FilterState, Inventory, PriceRange, SortKey, VehicleCard};
pub use notification::{Notification, Notifier, Severity, ToastQueue};
pub use config::SiteConfig;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
