//! Dashboard Module
//!
//! Filter translation and the refresh chain that feeds the metrics view.

pub mod filter;
pub mod service;

pub use filter::QueryBounds;
pub use service::{DashboardService, DashboardSnapshot};
