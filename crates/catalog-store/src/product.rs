//! Product records as they are stored and returned.

use chrono::{DateTime, Utc};
use common::ProductId;
use common::number::serialize_optional_amount;
use serde::{Deserialize, Deserializer, Serialize};

/// Image reference of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Name of the stored file.
    pub file_name: String,
    /// Name of the file as uploaded.
    pub original_name: String,
}

impl ProductImage {
    pub fn new(file_name: impl Into<String>, original_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            original_name: original_name.into(),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image: ProductImage,
    pub category: String,
    pub description: String,
    /// `None` means the product is not currently for sale.
    #[serde(serialize_with = "serialize_optional_amount")]
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns true if the product has a price and can be ordered.
    pub fn is_for_sale(&self) -> bool {
        self.price.is_some()
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub image: ProductImage,
    pub category: String,
    /// Absent means an empty description.
    #[serde(default)]
    pub description: Option<String>,
    /// Absent means not for sale.
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductDraft {
    /// Creates a draft with no description and no price.
    pub fn new(title: impl Into<String>, image: ProductImage, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image,
            category: category.into(),
            description: None,
            price: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Partial update of an image reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImagePatch {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
}

/// Partial update of a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<ProductImagePatch>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `Some(None)` clears the price, taking the product off sale.
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: Option<f64>) -> Self {
        self.price = Some(price);
        self
    }

    pub fn image(mut self, image: ProductImagePatch) -> Self {
        self.image = Some(image);
        self
    }
}

/// Deserializes an optional field where an explicit `null` differs from an
/// absent one. Use with `#[serde(default, deserialize_with = ...)]`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_camel_case() {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            title: "Mug".to_string(),
            image: ProductImage::new("mug.svg", "Mug.svg"),
            category: "kitchen".to_string(),
            description: String::new(),
            price: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["image"]["fileName"], "mug.svg");
        assert_eq!(json["image"]["originalName"], "Mug.svg");
        assert!(json["price"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(!product.is_for_sale());
    }

    #[test]
    fn whole_price_renders_without_fraction() {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            title: "Mug".to_string(),
            image: ProductImage::new("mug.svg", "Mug.svg"),
            category: "kitchen".to_string(),
            description: String::new(),
            price: Some(100.0),
            created_at: now,
            updated_at: now,
        };
        let raw = serde_json::to_string(&product).unwrap();
        assert!(raw.contains(r#""price":100,"#), "{raw}");

        let back: Product = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.price, Some(100.0));
        assert!(product.is_for_sale());
    }

    #[test]
    fn patch_distinguishes_null_price_from_absent() {
        let absent: ProductPatch = serde_json::from_str(r#"{"title":"Cup"}"#).unwrap();
        assert_eq!(absent.price, None);

        let cleared: ProductPatch = serde_json::from_str(r#"{"price":null}"#).unwrap();
        assert_eq!(cleared.price, Some(None));

        let set: ProductPatch = serde_json::from_str(r#"{"price":12.5}"#).unwrap();
        assert_eq!(set.price, Some(Some(12.5)));
    }
}
