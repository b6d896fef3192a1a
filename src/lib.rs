// src/lib.rs

pub mod api;
pub mod chapter;
pub mod config;
pub mod dashboard;
pub mod download;
pub mod error;
pub mod models;
pub mod planner;
pub mod session;
pub mod state;
pub mod telemetry;

pub use api::{ContentService, HttpContentService};
pub use state::AppState;
