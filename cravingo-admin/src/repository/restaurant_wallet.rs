//! Restaurant Wallet Repository

use std::sync::Arc;

use shared::error::{AppResult, ErrorCode};
use shared::models::{RestaurantWallet, WalletList, decode_row};

use super::{FETCH_ALL_LIMIT, operation_error};
use crate::appwrite::{Query, TablesApi};

#[derive(Clone)]
pub struct RestaurantWalletRepository {
    tables: Arc<dyn TablesApi>,
    table_id: String,
}

impl RestaurantWalletRepository {
    pub fn new(tables: Arc<dyn TablesApi>, table_id: impl Into<String>) -> Self {
        Self {
            tables,
            table_id: table_id.into(),
        }
    }

    /// Fetch every wallet with its restaurant expanded
    pub async fn list_all(&self) -> AppResult<WalletList> {
        let queries = [
            Query::limit(FETCH_ALL_LIMIT),
            Query::select(&["*", "restaurantId.*"]),
        ];
        let list = self
            .tables
            .list_rows(&self.table_id, &queries)
            .await
            .map_err(operation_error(ErrorCode::WalletFetchFailed))?;

        let total = list.total;
        let wallets: Vec<RestaurantWallet> = list
            .into_rows("restaurant_wallet")
            .into_iter()
            .map(|row| decode_row(row, "restaurant_wallet"))
            .collect();
        Ok(WalletList { wallets, total })
    }
}
