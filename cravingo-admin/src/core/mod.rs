pub mod config;
pub mod state;

pub use config::{AppwriteConfig, Config, TableIds};
pub use state::AppState;
