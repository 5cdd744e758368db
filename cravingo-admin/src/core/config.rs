use std::fmt;

use chrono_tz::Tz;
use shared::error::{AppError, AppResult};

/// Appwrite project connection
#[derive(Clone)]
pub struct AppwriteConfig {
    /// REST endpoint, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    pub project_id: String,
    /// Server API key with table and storage scopes
    pub api_key: String,
    pub database_id: String,
}

impl fmt::Debug for AppwriteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppwriteConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

/// Table ids inside the database
#[derive(Debug, Clone)]
pub struct TableIds {
    pub orders: String,
    pub expenses: String,
    pub menu_items: String,
    pub restaurants: String,
    pub restaurant_wallets: String,
}

/// Back office configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | APPWRITE_ENDPOINT | (required) | Appwrite REST endpoint |
/// | APPWRITE_PROJECT_ID | (required) | Project id |
/// | APPWRITE_API_KEY | (required) | Server API key |
/// | APPWRITE_DATABASE_ID | (required) | Database id |
/// | APPWRITE_ORDER_TABLE_ID | (required) | Orders table |
/// | APPWRITE_EXPENSE_TABLE_ID | (required) | Expenses table |
/// | APPWRITE_MENU_ITEMS_TABLE_ID | (required) | Menu items table |
/// | APPWRITE_RESTAURANT_TABLE_ID | (required) | Restaurants table |
/// | APPWRITE_RESTAURANT_WALLET_TABLE_ID | (required) | Restaurant wallets table |
/// | APPWRITE_BUCKET_ID | (required) | Product image bucket |
/// | BUSINESS_TIMEZONE | (host timezone) | IANA timezone that defines "today" |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout (ms) |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level / filter directive |
/// | LOG_JSON | false | JSON log output (always on in production) |
/// | LOG_DIR | (unset) | Directory for rotating log files |
///
/// # Example
///
/// ```ignore
/// APPWRITE_ENDPOINT=https://cloud.appwrite.io/v1 LOG_LEVEL=debug cargo run -- all delivered
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub appwrite: AppwriteConfig,
    pub tables: TableIds,
    pub bucket_id: String,
    pub business_timezone: Tz,
    pub request_timeout_ms: u64,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

/// The host's IANA timezone, UTC when it cannot be determined
///
/// `TZ` takes precedence over the system setting, as it does for
/// `chrono::Local`.
pub fn local_timezone() -> Tz {
    std::env::var("TZ")
        .ok()
        .and_then(|name| name.trim_start_matches(':').parse().ok())
        .or_else(|| {
            iana_time_zone::get_timezone()
                .ok()
                .and_then(|name| name.parse().ok())
        })
        .unwrap_or(Tz::UTC)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::config(format!("Missing required environment variable {}", key))
                    .with_detail("variable", key)
            })
        };

        let business_timezone = match get("BUSINESS_TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|_| {
                AppError::config(format!("Invalid BUSINESS_TIMEZONE '{}'", name))
                    .with_detail("variable", "BUSINESS_TIMEZONE")
            })?,
            None => local_timezone(),
        };

        Ok(Self {
            appwrite: AppwriteConfig {
                endpoint: require("APPWRITE_ENDPOINT")?
                    .trim_end_matches('/')
                    .to_string(),
                project_id: require("APPWRITE_PROJECT_ID")?,
                api_key: require("APPWRITE_API_KEY")?,
                database_id: require("APPWRITE_DATABASE_ID")?,
            },
            tables: TableIds {
                orders: require("APPWRITE_ORDER_TABLE_ID")?,
                expenses: require("APPWRITE_EXPENSE_TABLE_ID")?,
                menu_items: require("APPWRITE_MENU_ITEMS_TABLE_ID")?,
                restaurants: require("APPWRITE_RESTAURANT_TABLE_ID")?,
                restaurant_wallets: require("APPWRITE_RESTAURANT_WALLET_TABLE_ID")?,
            },
            bucket_id: require("APPWRITE_BUCKET_ID")?,
            business_timezone,
            request_timeout_ms: get("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: get("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: get("LOG_DIR"),
        })
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// JSON log output, forced on in production
    pub fn json_logs(&self) -> bool {
        self.log_json || self.is_production()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        appwrite: AppwriteConfig {
            endpoint: "https://appwrite.test/v1".into(),
            project_id: "cravingo".into(),
            api_key: "secret".into(),
            database_id: "main".into(),
        },
        tables: TableIds {
            orders: "orders".into(),
            expenses: "expenses".into(),
            menu_items: "menu_items".into(),
            restaurants: "restaurants".into(),
            restaurant_wallets: "restaurant_wallets".into(),
        },
        bucket_id: "images".into(),
        business_timezone: chrono_tz::Asia::Kolkata,
        request_timeout_ms: 30000,
        environment: "test".into(),
        log_level: "debug".into(),
        log_json: false,
        log_dir: None,
    }
}
