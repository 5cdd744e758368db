//! Product Model
//!
//! Menu items as stored in the menu-items table, plus the write payload used
//! by the product form.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::relation::{RelatedRecord, lenient_relation};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::money::decimal_from_value;
use crate::util::{
    decode_embedded_json, lenient_bool, lenient_decimal, lenient_string, lenient_string_list,
    lenient_string_or_empty,
};

/// One purchasable size/variant of a product
///
/// Numbers are optional because a half-filled form row is representable;
/// [`ProductInput::validate`] rejects it before it is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantityOption {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    #[serde(
        rename = "appPrice",
        default,
        deserialize_with = "optional_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub app_price: Option<Decimal>,
    #[serde(
        rename = "purchasePrice",
        default,
        deserialize_with = "optional_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub purchase_price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "optional_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub discount: Option<Decimal>,
}

impl QuantityOption {
    fn is_complete(&self) -> bool {
        self.label.is_some()
            && self.app_price.is_some()
            && self.purchase_price.is_some()
            && self.discount.is_some()
    }
}

/// Absent, null and empty-string are `None`; other values coalesce
fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(decimal_from_value(other)),
    })
}

fn quantity_options<'de, D>(deserializer: D) -> Result<Vec<QuantityOption>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match decode_embedded_json(&value) {
        Some(Value::Array(rows)) => rows
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Menu item row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "$id", default, deserialize_with = "lenient_string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount: Decimal,
    #[serde(rename = "restaurantId", default, deserialize_with = "lenient_relation")]
    pub restaurant: Option<RelatedRecord>,
    #[serde(rename = "imageUrl", default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(rename = "imageId", default, deserialize_with = "lenient_string")]
    pub image_id: Option<String>,
    /// Stored as a JSON-encoded string
    #[serde(rename = "quantityOptions", default, deserialize_with = "quantity_options")]
    pub quantity_options: Vec<QuantityOption>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(rename = "isAvailable", default, deserialize_with = "lenient_bool")]
    pub is_available: bool,
    #[serde(rename = "isVeg", default, deserialize_with = "lenient_bool")]
    pub is_veg: bool,
    #[serde(rename = "restaurantPrice", default, deserialize_with = "lenient_decimal")]
    pub restaurant_price: Decimal,
    #[serde(rename = "suggestedItems", default, deserialize_with = "lenient_string_list")]
    pub suggested_items: Vec<String>,
    #[serde(rename = "$updatedAt", default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,
}

impl Product {
    pub fn from_row(row: Value) -> Self {
        super::decode_row(row, "product")
    }
}

/// One page of products
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub total: u64,
}

/// Restaurant choice offered by the product form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantOption {
    #[serde(rename = "$id", default, deserialize_with = "lenient_string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub name: String,
}

/// Whether a product write creates a row or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Product form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub restaurant_id: String,
    pub image_url: Option<String>,
    /// Id of an already uploaded image file
    pub image_id: Option<String>,
    pub quantity_options: Vec<QuantityOption>,
    pub description: String,
    pub category: String,
    pub is_available: bool,
    pub is_veg: bool,
    pub suggested_items: Vec<String>,
}

impl ProductInput {
    /// Prefill the form from an existing product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: Some(product.price),
            discount: Some(product.discount),
            restaurant_id: product
                .restaurant
                .as_ref()
                .and_then(|r| r.id.clone())
                .unwrap_or_default(),
            image_url: product.image_url.clone(),
            image_id: product.image_id.clone(),
            quantity_options: product.quantity_options.clone(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            is_available: product.is_available,
            is_veg: product.is_veg,
            suggested_items: product.suggested_items.clone(),
        }
    }

    /// Check required fields; errors name the first offending field
    pub fn validate(&self, mode: WriteMode) -> AppResult<()> {
        let text_fields = [
            ("name", &self.name),
            ("restaurantId", &self.restaurant_id),
            ("description", &self.description),
            ("category", &self.category),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(AppError::required(field));
            }
        }
        if self.price.is_none() {
            return Err(AppError::required("price"));
        }
        if self.discount.is_none() {
            return Err(AppError::required("discount"));
        }

        for (index, option) in self.quantity_options.iter().enumerate() {
            if !option.is_complete() {
                let row = index + 1;
                return Err(AppError::with_message(
                    ErrorCode::InvalidQuantityOption,
                    format!("Please complete all quantity fields (row {})", row),
                )
                .with_detail("row", row));
            }
        }

        if mode == WriteMode::Create && self.image_id.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Product image is required",
            )
            .with_detail("field", "imageId"));
        }
        Ok(())
    }

    /// Validate and build the row data to send
    pub fn to_payload(&self, mode: WriteMode) -> AppResult<ProductPayload> {
        self.validate(mode)?;
        let quantity_options = serde_json::to_string(&self.quantity_options).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, e.to_string())
        })?;

        Ok(ProductPayload {
            name: self.name.clone(),
            price: self.price.unwrap_or_default(),
            discount: self.discount.unwrap_or_default(),
            restaurant_id: self.restaurant_id.clone(),
            image_url: self.image_url.clone().unwrap_or_default(),
            quantity_options,
            description: self.description.clone(),
            category: self.category.clone(),
            is_available: self.is_available,
            is_veg: self.is_veg,
            image_id: self.image_id.clone().unwrap_or_default(),
            restaurant_price: (mode == WriteMode::Create).then_some(Decimal::ZERO),
            suggested_items: self.suggested_items.clone(),
        })
    }
}

/// Row data for create/update, numbers as JSON numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub restaurant_id: String,
    pub image_url: String,
    /// JSON-encoded list of [`QuantityOption`]
    pub quantity_options: String,
    pub description: String,
    pub category: String,
    pub is_available: bool,
    pub is_veg: bool,
    pub image_id: String,
    /// Only sent on create; edits keep the stored value
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub restaurant_price: Option<Decimal>,
    pub suggested_items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn option(label: &str) -> QuantityOption {
        QuantityOption {
            label: Some(label.into()),
            app_price: Some(d("120")),
            purchase_price: Some(d("90")),
            discount: Some(d("10")),
        }
    }

    fn valid_input() -> ProductInput {
        ProductInput {
            name: "Paneer Tikka".into(),
            price: Some(d("220")),
            discount: Some(d("10")),
            restaurant_id: "r1".into(),
            image_url: Some("https://cdn.example/p.png".into()),
            image_id: Some("file-1".into()),
            quantity_options: vec![option("Half"), option("Full")],
            description: "Smoky".into(),
            category: "Starters".into(),
            is_available: true,
            is_veg: true,
            suggested_items: vec!["Naan".into()],
        }
    }

    #[test]
    fn test_product_row_decodes_embedded_options() {
        let product = Product::from_row(json!({
            "$id": "p1",
            "name": "Dosa",
            "price": 80,
            "discount": "5",
            "restaurantId": {"name": "Udupi"},
            "quantityOptions": "[{\"label\":\"Plain\",\"appPrice\":80,\"purchasePrice\":60,\"discount\":5}, 3]",
            "isAvailable": "true",
            "isVeg": false,
            "suggestedItems": ["Chai"]
        }));
        assert_eq!(product.discount, d("5"));
        assert_eq!(product.quantity_options.len(), 1);
        assert_eq!(product.quantity_options[0].app_price, Some(d("80")));
        assert!(product.is_available);
        assert_eq!(product.restaurant.unwrap().display_name(), "Udupi");
    }

    #[test]
    fn test_bad_options_string_is_empty() {
        let product = Product::from_row(json!({"$id": "p2", "quantityOptions": "oops"}));
        assert!(product.quantity_options.is_empty());
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(valid_input().validate(WriteMode::Create).is_ok());
    }

    #[test]
    fn test_validate_required_fields() {
        let mut input = valid_input();
        input.category = "  ".into();
        let err = input.validate(WriteMode::Update).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Please fill category");

        let mut input = valid_input();
        input.price = None;
        assert_eq!(input.validate(WriteMode::Update).unwrap_err().message, "Please fill price");
    }

    #[test]
    fn test_validate_incomplete_quantity_option() {
        let mut input = valid_input();
        input.quantity_options[1].purchase_price = None;
        let err = input.validate(WriteMode::Update).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantityOption);
        assert_eq!(err.message, "Please complete all quantity fields (row 2)");
        assert_eq!(err.details.unwrap().get("row"), Some(&json!(2)));
    }

    #[test]
    fn test_image_required_only_on_create() {
        let mut input = valid_input();
        input.image_id = None;
        assert_eq!(
            input.validate(WriteMode::Create).unwrap_err().message,
            "Product image is required"
        );
        assert!(input.validate(WriteMode::Update).is_ok());
    }

    #[test]
    fn test_option_from_blank_form_row() {
        let opt: QuantityOption =
            serde_json::from_value(json!({"label": "", "appPrice": "", "purchasePrice": 3})).unwrap();
        assert!(opt.label.is_none());
        assert!(opt.app_price.is_none());
        assert_eq!(opt.purchase_price, Some(d("3")));
        assert!(!opt.is_complete());
    }

    #[test]
    fn test_create_payload_shape() {
        let payload = valid_input().to_payload(WriteMode::Create).unwrap();
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["price"], json!(220.0));
        assert_eq!(body["restaurantId"], json!("r1"));
        assert_eq!(body["restaurantPrice"], json!(0.0));
        assert!(body["quantityOptions"].is_string());

        let options: Value = serde_json::from_str(body["quantityOptions"].as_str().unwrap()).unwrap();
        assert_eq!(options[0]["label"], json!("Half"));
        assert_eq!(options[0]["appPrice"], json!(120.0));
    }

    #[test]
    fn test_update_payload_omits_restaurant_price() {
        let body = serde_json::to_value(valid_input().to_payload(WriteMode::Update).unwrap()).unwrap();
        assert!(body.get("restaurantPrice").is_none());
    }

    #[test]
    fn test_from_product_roundtrips_to_valid_update() {
        let product = Product::from_row(json!({
            "$id": "p3",
            "name": "Idli",
            "price": 40,
            "discount": 0,
            "restaurantId": {"$id": "r9", "name": "Udupi"},
            "description": "Steamed",
            "category": "Breakfast",
            "quantityOptions": "[]"
        }));
        let input = ProductInput::from_product(&product);
        assert_eq!(input.restaurant_id, "r9");
        assert!(input.validate(WriteMode::Update).is_ok());
    }
}
