//! Request schema gate.
//!
//! Bodies and path identifiers are checked here before any handler logic
//! runs. Every rejection, malformed JSON included, becomes a 400
//! `validation error`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use catalog_store::product::double_option;
use catalog_store::schema::{TITLE_MAX_LEN, TITLE_MIN_LEN};
use catalog_store::{ProductDraft, ProductId, ProductImage, ProductImagePatch, ProductPatch};
use domain::OrderRequest;
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

/// Shape rules a request body must satisfy beyond deserializing.
pub trait Validate {
    fn is_valid(&self) -> bool;
}

/// Unwraps a JSON body that deserialized and passes its [`Validate`] rules.
pub fn validated<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) if value.is_valid() => Ok(value),
        Ok(_) => Err(ApiError::validation()),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "request body rejected");
            Err(ApiError::validation())
        }
    }
}

/// Checks that a path identifier is 24 hex characters.
pub fn product_id(raw: &str) -> Result<&str, ApiError> {
    if ProductId::is_valid(raw) {
        Ok(raw)
    } else {
        Err(ApiError::validation())
    }
}

fn non_empty(s: &str) -> bool {
    !s.is_empty()
}

fn valid_title(title: &str) -> bool {
    let len = title.chars().count();
    (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len)
}

fn valid_price(price: Option<f64>) -> bool {
    price.is_none_or(|p| p.is_finite() && p >= 0.0)
}

/// Loose syntactic e-mail check: one `@`, a non-empty local part and a
/// dotted domain without whitespace.
pub fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Reads an optional field that may be absent but never `null`.
/// Use with `#[serde(default, deserialize_with = ...)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageRequest {
    pub file_name: String,
    pub original_name: String,
}

/// Body of `POST /product`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductRequest {
    pub title: String,
    pub image: ImageRequest,
    pub category: String,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Validate for CreateProductRequest {
    fn is_valid(&self) -> bool {
        valid_title(&self.title)
            && non_empty(&self.image.file_name)
            && non_empty(&self.image.original_name)
            && non_empty(&self.category)
            && valid_price(self.price)
    }
}

impl From<CreateProductRequest> for ProductDraft {
    fn from(req: CreateProductRequest) -> Self {
        ProductDraft {
            title: req.title,
            image: ProductImage::new(req.image.file_name, req.image.original_name),
            category: req.category,
            description: req.description,
            price: req.price,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImagePatchRequest {
    #[serde(default, deserialize_with = "present")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub original_name: Option<String>,
}

/// Body of `PATCH /product/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<ImagePatchRequest>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
}

impl Validate for UpdateProductRequest {
    fn is_valid(&self) -> bool {
        let image_ok = self.image.as_ref().is_none_or(|image| {
            image.file_name.as_deref().is_none_or(non_empty)
                && image.original_name.as_deref().is_none_or(non_empty)
        });

        self.title.as_deref().is_none_or(valid_title)
            && image_ok
            && self.category.as_deref().is_none_or(non_empty)
            && self.price.is_none_or(valid_price)
    }
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            title: req.title,
            image: req.image.map(|image| ProductImagePatch {
                file_name: image.file_name,
                original_name: image.original_name,
            }),
            category: req.category,
            description: req.description,
            price: req.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Online,
}

/// Body of `POST /order`.
///
/// Only `items` and `total` reach the order check; the contact fields are
/// validated and dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: f64,
    pub items: Vec<String>,
}

impl Validate for CreateOrderRequest {
    fn is_valid(&self) -> bool {
        is_email(&self.email)
            && non_empty(&self.phone)
            && non_empty(&self.address)
            && self.total.is_finite()
            && self.total >= 0.0
            && !self.items.is_empty()
            && self.items.iter().all(|id| non_empty(id))
    }
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(req: CreateOrderRequest) -> Self {
        OrderRequest::new(req.items, req.total)
    }
}
