//! Cravingo Admin - back office for the Cravingo food-delivery operation
//!
//! Reads orders, expenses, restaurant wallets and menu items from an
//! Appwrite project and derives the dashboard metrics from them.
//!
//! # Module layout
//!
//! ```text
//! cravingo-admin/src/
//! ├── core/          # configuration, application state
//! ├── appwrite/      # REST client, query builder, backend traits
//! ├── repository/    # one repository per table
//! ├── dashboard/     # filter translation, refresh service
//! ├── utils/         # logging, business-timezone dates
//! └── cli.rs         # command line filter parsing
//! ```

pub mod appwrite;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod repository;
pub mod utils;

// Re-export public types
pub use core::{AppState, Config};
pub use dashboard::{DashboardService, DashboardSnapshot, QueryBounds};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, read configuration and start logging
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(&config.log_level, config.json_logs(), config.log_dir.as_deref())?;
    Ok(config)
}
