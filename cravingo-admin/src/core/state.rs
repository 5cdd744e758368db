use std::sync::Arc;
use std::time::Duration;

use shared::error::AppResult;

use crate::appwrite::{AppwriteClient, StorageApi, TablesApi};
use crate::core::Config;
use crate::dashboard::DashboardService;
use crate::repository::{
    ExpenseRepository, OrderRepository, ProductRepository, RestaurantWalletRepository,
};

/// Services shared by the whole process
///
/// Built once at startup and passed by reference. Repositories hold an
/// `Arc` to the same backend handle.
pub struct AppState {
    pub config: Config,
    pub orders: OrderRepository,
    pub expenses: ExpenseRepository,
    pub products: ProductRepository,
    pub wallets: RestaurantWalletRepository,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Connect to Appwrite and build every service
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let client = Arc::new(AppwriteClient::new(
            &config.appwrite,
            Duration::from_millis(config.request_timeout_ms),
        )?);
        tracing::info!(
            endpoint = %client.endpoint(),
            database = %config.appwrite.database_id,
            timezone = %config.business_timezone,
            "Appwrite client ready"
        );
        Ok(Self::with_backend(config.clone(), client.clone(), client))
    }

    /// Build the services over any backend implementation
    pub fn with_backend(
        config: Config,
        tables: Arc<dyn TablesApi>,
        storage: Arc<dyn StorageApi>,
    ) -> Self {
        let orders = OrderRepository::new(tables.clone(), config.tables.orders.clone());
        let expenses = ExpenseRepository::new(tables.clone(), config.tables.expenses.clone());
        let products = ProductRepository::new(
            tables.clone(),
            storage,
            config.tables.menu_items.clone(),
            config.tables.restaurants.clone(),
            config.bucket_id.clone(),
        );
        let wallets =
            RestaurantWalletRepository::new(tables, config.tables.restaurant_wallets.clone());
        let dashboard =
            DashboardService::new(orders.clone(), expenses.clone(), config.business_timezone);

        Self {
            config,
            orders,
            expenses,
            products,
            wallets,
            dashboard,
        }
    }
}
