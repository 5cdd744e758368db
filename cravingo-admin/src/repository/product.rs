//! Product Repository
//!
//! Menu item CRUD plus the two lookups the product form needs (restaurant
//! choices and image removal).

use std::sync::Arc;

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Product, ProductInput, ProductList, RestaurantOption, WriteMode, decode_row,
};

use super::operation_error;
use crate::appwrite::{Query, StorageApi, TablesApi};

const RESTAURANT_OPTIONS_LIMIT: u64 = 1000;

/// Paging and search for [`ProductRepository::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListParams {
    pub limit: u64,
    pub offset: u64,
    /// Substring match on `name`; empty means no filter
    pub search: String,
}

impl Default for ProductListParams {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            search: String::new(),
        }
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    tables: Arc<dyn TablesApi>,
    storage: Arc<dyn StorageApi>,
    table_id: String,
    restaurant_table_id: String,
    bucket_id: String,
}

impl ProductRepository {
    pub fn new(
        tables: Arc<dyn TablesApi>,
        storage: Arc<dyn StorageApi>,
        table_id: impl Into<String>,
        restaurant_table_id: impl Into<String>,
        bucket_id: impl Into<String>,
    ) -> Self {
        Self {
            tables,
            storage,
            table_id: table_id.into(),
            restaurant_table_id: restaurant_table_id.into(),
            bucket_id: bucket_id.into(),
        }
    }

    /// One page of products, most recently updated first
    pub async fn list(&self, params: &ProductListParams) -> AppResult<ProductList> {
        let mut queries = vec![
            Query::order_desc("$updatedAt"),
            Query::limit(params.limit),
            Query::offset(params.offset),
            Query::select(&["*", "restaurantId.name"]),
        ];
        if !params.search.is_empty() {
            queries.push(Query::contains("name", params.search.as_str()));
        }

        let list = self
            .tables
            .list_rows(&self.table_id, &queries)
            .await
            .map_err(operation_error(ErrorCode::ProductListFailed))?;
        let total = list.total;
        let products = list
            .into_rows("product")
            .into_iter()
            .map(Product::from_row)
            .collect();
        Ok(ProductList { products, total })
    }

    /// Products whose name contains `term`
    pub async fn search(&self, term: &str, limit: u64) -> AppResult<Vec<Product>> {
        let mut queries = vec![Query::limit(limit)];
        if !term.is_empty() {
            queries.push(Query::contains("name", term));
        }
        let list = self
            .tables
            .list_rows(&self.table_id, &queries)
            .await
            .map_err(operation_error(ErrorCode::ProductListFailed))?;
        Ok(list
            .into_rows("product")
            .into_iter()
            .map(Product::from_row)
            .collect())
    }

    pub async fn create(&self, input: &ProductInput) -> AppResult<Product> {
        let data = payload_value(input, WriteMode::Create)?;
        let row = self
            .tables
            .create_row(&self.table_id, data)
            .await
            .map_err(operation_error(ErrorCode::ProductCreateFailed))?;
        let product = Product::from_row(row);
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update(&self, product_id: &str, input: &ProductInput) -> AppResult<Product> {
        let data = payload_value(input, WriteMode::Update)?;
        let row = self
            .tables
            .update_row(&self.table_id, product_id, data)
            .await
            .map_err(operation_error(ErrorCode::ProductUpdateFailed))?;
        tracing::info!(product_id, "Product updated");
        Ok(Product::from_row(row))
    }

    pub async fn delete(&self, product_id: &str) -> AppResult<()> {
        self.tables
            .delete_row(&self.table_id, product_id)
            .await
            .map_err(operation_error(ErrorCode::ProductDeleteFailed))?;
        tracing::info!(product_id, "Product deleted");
        Ok(())
    }

    /// Remove a product image from the bucket; `None` is a no-op
    pub async fn delete_image(&self, image_id: Option<&str>) -> AppResult<()> {
        let Some(image_id) = image_id else {
            return Ok(());
        };
        self.storage
            .delete_file(&self.bucket_id, image_id)
            .await
            .map_err(operation_error(ErrorCode::ImageDeleteFailed))
    }

    /// Restaurants offered in the product form
    pub async fn list_restaurants(&self) -> AppResult<Vec<RestaurantOption>> {
        let list = self
            .tables
            .list_rows(
                &self.restaurant_table_id,
                &[Query::limit(RESTAURANT_OPTIONS_LIMIT)],
            )
            .await
            .map_err(operation_error(ErrorCode::ProductListFailed))?;
        Ok(list
            .into_rows("restaurant")
            .into_iter()
            .map(|row| decode_row(row, "restaurant"))
            .collect())
    }
}

fn payload_value(input: &ProductInput, mode: WriteMode) -> AppResult<Value> {
    let payload = input.to_payload(mode)?;
    serde_json::to_value(payload)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))
}
