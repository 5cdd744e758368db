//! Restaurant Wallet Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::relation::{RelatedRecord, lenient_relation};
use crate::util::lenient_string_or_empty;

/// Wallet row for one restaurant
///
/// Balance attributes are not interpreted here; they are kept as-is in
/// [`RestaurantWallet::attributes`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantWallet {
    #[serde(rename = "$id", default, deserialize_with = "lenient_string_or_empty")]
    pub id: String,
    #[serde(rename = "restaurantId", default, deserialize_with = "lenient_relation")]
    pub restaurant: Option<RelatedRecord>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl RestaurantWallet {
    pub fn restaurant_name(&self) -> &str {
        self.restaurant
            .as_ref()
            .map_or("N/A", RelatedRecord::display_name)
    }
}

/// Result of listing the wallet table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalletList {
    pub wallets: Vec<RestaurantWallet>,
    pub total: u64,
}
