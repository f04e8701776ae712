//! FitScope crate root: module wiring and re-exports.
//!
//! A desktop client for a curve-fitting backend, built on egui/eframe:
//! - `data`: client state, column roles, fit functions, model settings and chart contents
//! - `api`: backend requests, the HTTP client and the background request worker
//! - `panels`: the UI panels drawing that state
//! - `app`: the eframe application and the `run_fitscope` entry point
//! - `config`, `logging`, `color_scheme`, `error`: ambient pieces

pub mod api;
pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod panels;

pub use api::client::HttpBackend;
pub use api::worker::RequestWorker;
pub use api::{ApiRequest, ApiResponse, Backend};
pub use app::{run_fitscope, FitScopeApp};
pub use color_scheme::ColorScheme;
pub use config::{FitScopeConfig, OverlaySource};
pub use data::state::AppState;
pub use error::{ApiError, ConfigError, RunError};
