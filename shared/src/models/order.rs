//! Order Model

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::relation::{RelatedRecord, lenient_relation};
use crate::money::{add_money, mul_money, round_money, sub_money, sum_money};
use crate::util::{decode_embedded_json, lenient_decimal, lenient_string, lenient_string_or_empty};

/// Quantity used when a line item's quantity is missing or zero
///
/// Applies to every path that multiplies by quantity: restaurant revenue,
/// customer subtotal and the per-line totals.
pub const DEFAULT_QUANTITY: Decimal = Decimal::ONE;

/// Order status
///
/// Open-ended: statuses this crate does not know about are carried through
/// unchanged as [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Status with its first letter capitalized ("delivered" -> "Delivered")
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" | "delivered" | "cancelled" => Self::from(s.as_str()),
            _ => Self::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<OrderStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.map(OrderStatus::from))
}

/// One product entry within an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Cost basis owed to the restaurant, per unit
    #[serde(rename = "restaurantPrice", default, deserialize_with = "lenient_decimal")]
    pub restaurant_price: Decimal,
    /// Zero when absent; see [`LineItem::effective_quantity`]
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    /// Price charged to the customer, per unit
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Decimal,
}

impl LineItem {
    /// Decode one element of an items array; non-objects become an empty item
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn effective_quantity(&self) -> Decimal {
        if self.quantity.is_zero() {
            DEFAULT_QUANTITY
        } else {
            self.quantity
        }
    }

    pub fn restaurant_total(&self) -> Decimal {
        mul_money(self.restaurant_price, self.effective_quantity())
    }

    pub fn customer_total(&self) -> Decimal {
        mul_money(self.price, self.effective_quantity())
    }
}

/// The raw `items` attribute of an order row
///
/// The backend stores items as a JSON-encoded string, but older rows (and
/// empty ones) come back as a real array.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsField {
    Encoded(String),
    Decoded(Vec<LineItem>),
}

impl ItemsField {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Encoded(text.clone()),
            Value::Array(elements) => Self::Decoded(line_items(elements)),
            _ => Self::Decoded(Vec::new()),
        }
    }

    /// Decode into line items; never fails
    ///
    /// Unparseable text and JSON that is not an array both yield no items.
    pub fn decode(self) -> Vec<LineItem> {
        match self {
            Self::Decoded(items) => items,
            Self::Encoded(text) if text.trim().is_empty() => Vec::new(),
            Self::Encoded(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(elements)) => line_items(&elements),
                Ok(_) => Vec::new(),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse order items, treating as empty");
                    Vec::new()
                }
            },
        }
    }
}

fn line_items(elements: &[Value]) -> Vec<LineItem> {
    elements.iter().map(LineItem::from_value).collect()
}

fn decode_items<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(ItemsField::from_value(&value).decode())
}

/// Order document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "$id", default, deserialize_with = "lenient_string_or_empty")]
    pub id: String,
    #[serde(rename = "$createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(rename = "$updatedAt", default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,

    /// Pre-fee, pre-discount order value
    #[serde(rename = "totalAmount", default, deserialize_with = "lenient_decimal")]
    pub total_amount: Decimal,
    #[serde(rename = "delivery_charge", default, deserialize_with = "lenient_decimal")]
    pub delivery_charge: Decimal,
    #[serde(rename = "discountAmount", default, deserialize_with = "lenient_decimal")]
    pub discount_amount: Decimal,
    /// Amount owed to the delivery agent
    #[serde(rename = "deliveryAgentFee", default, deserialize_with = "lenient_decimal")]
    pub delivery_agent_fee: Decimal,
    #[serde(rename = "orderStatus", default, deserialize_with = "lenient_status")]
    pub order_status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "decode_items")]
    pub items: Vec<LineItem>,

    // -- Display-only attributes --
    #[serde(rename = "customerName", default, deserialize_with = "lenient_string")]
    pub customer_name: Option<String>,
    #[serde(rename = "phoneNumber", default, deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
    #[serde(rename = "orderTime", default, deserialize_with = "lenient_string")]
    pub order_time: Option<String>,
    /// JSON-encoded address object
    #[serde(rename = "deliveryAddress", default, deserialize_with = "lenient_string")]
    pub delivery_address: Option<String>,
    #[serde(rename = "deliveryAgentId", default, deserialize_with = "lenient_relation")]
    pub delivery_agent: Option<RelatedRecord>,
    #[serde(rename = "restaurantId", default, deserialize_with = "lenient_relation")]
    pub restaurant: Option<RelatedRecord>,
}

impl OrderRecord {
    /// Decode a backend row; see [`super::decode_row`]
    pub fn from_row(row: Value) -> Self {
        super::decode_row(row, "order")
    }

    /// `totalAmount + delivery_charge - discountAmount`
    pub fn earnings(&self) -> Decimal {
        sub_money(
            add_money(self.total_amount, self.delivery_charge),
            self.discount_amount,
        )
    }

    /// Sum of `restaurantPrice * quantity` over all items
    pub fn restaurant_cost(&self) -> Decimal {
        sum_money(self.items.iter().map(LineItem::restaurant_total))
    }

    /// Sum of `price * quantity` over all items
    pub fn subtotal(&self) -> Decimal {
        sum_money(self.items.iter().map(LineItem::customer_total))
    }

    pub fn address(&self) -> Option<DeliveryAddress> {
        let raw = self.delivery_address.as_ref()?;
        let decoded = decode_embedded_json(&Value::String(raw.clone()))?;
        serde_json::from_value(decoded).ok()
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_order(self)
    }
}

/// Decoded `deliveryAddress`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeliveryAddress {
    #[serde(default, deserialize_with = "lenient_string")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street: Option<String>,
}

impl DeliveryAddress {
    pub fn display(&self) -> &str {
        self.details
            .as_deref()
            .or(self.street.as_deref())
            .unwrap_or("N/A")
    }
}

/// One line of an order summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryLine {
    pub name: String,
    pub quantity: Decimal,
    pub customer_total: Decimal,
    pub restaurant_total: Decimal,
}

/// Financial summary of a single order, as shown in the order list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    pub status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub order_time: Option<String>,
    pub delivered_at: Option<String>,
    pub address: String,
    pub delivery_agent: String,
    pub delivery_agent_fee: Decimal,
    pub restaurant: String,
    pub lines: Vec<OrderSummaryLine>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub discount: Decimal,
    pub grand_total: Decimal,
}

impl OrderSummary {
    pub fn from_order(order: &OrderRecord) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| OrderSummaryLine {
                name: item.name.clone().unwrap_or_default(),
                quantity: item.effective_quantity(),
                customer_total: round_money(item.customer_total()),
                restaurant_total: round_money(item.restaurant_total()),
            })
            .collect();

        Self {
            order_id: order.id.clone(),
            status: order.order_status.clone(),
            customer_name: order.customer_name.clone(),
            phone_number: order.phone_number.clone(),
            order_time: order.order_time.clone(),
            delivered_at: order.updated_at.clone(),
            address: order
                .address()
                .map(|a| a.display().to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            delivery_agent: order
                .delivery_agent
                .as_ref()
                .map_or("N/A", RelatedRecord::display_name)
                .to_string(),
            delivery_agent_fee: round_money(order.delivery_agent_fee),
            restaurant: order
                .restaurant
                .as_ref()
                .map_or("N/A", RelatedRecord::display_name)
                .to_string(),
            lines,
            subtotal: round_money(order.subtotal()),
            delivery_fee: round_money(order.delivery_charge),
            discount: round_money(order.discount_amount),
            grand_total: round_money(order.earnings()),
        }
    }
}
