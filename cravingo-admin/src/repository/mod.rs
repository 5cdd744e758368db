//! Repository Module
//!
//! One repository per backend table. Each is built with the table API handle
//! and its table id; nothing here is a process-wide singleton.

pub mod expense;
pub mod order;
pub mod product;
pub mod restaurant_wallet;

pub use expense::ExpenseRepository;
pub use order::{OrderList, OrderRepository};
pub use product::{ProductListParams, ProductRepository};
pub use restaurant_wallet::RestaurantWalletRepository;

use shared::error::{AppError, ErrorCode};

use crate::appwrite::AppwriteError;

/// Page size used to fetch a whole table in one request
pub const FETCH_ALL_LIMIT: u64 = 10_000_000;

/// Map a client error into the failing operation's error code
pub(crate) fn operation_error(operation: ErrorCode) -> impl Fn(AppwriteError) -> AppError {
    move |err| {
        tracing::error!(operation = %operation, error = %err, "Appwrite request failed");
        AppError::from(err).context(operation)
    }
}
