//! Field schema every stored product must satisfy.
//!
//! Both back-ends build documents through [`new_product`] and
//! [`apply_patch`], which trim text fields, fill defaults and then run
//! [`validate`]. A document that fails is never written.

use chrono::{DateTime, SubsecRound, Utc};
use common::ProductId;

use crate::{Product, ProductDraft, ProductPatch, Result, StoreError};

pub const TITLE_MIN_LEN: usize = 2;
pub const TITLE_MAX_LEN: usize = 30;

/// Current time at the precision PostgreSQL stores (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Builds a new product document from a draft.
pub fn new_product(id: ProductId, draft: ProductDraft, now: DateTime<Utc>) -> Result<Product> {
    let product = Product {
        id,
        title: draft.title.trim().to_string(),
        image: draft.image,
        category: draft.category.trim().to_string(),
        description: draft
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        price: draft.price,
        created_at: now,
        updated_at: now,
    };
    validate(&product)?;
    Ok(product)
}

/// Applies a partial update to an existing document.
pub fn apply_patch(mut product: Product, patch: ProductPatch, now: DateTime<Utc>) -> Result<Product> {
    if let Some(title) = patch.title {
        product.title = title.trim().to_string();
    }
    if let Some(image) = patch.image {
        if let Some(file_name) = image.file_name {
            product.image.file_name = file_name;
        }
        if let Some(original_name) = image.original_name {
            product.image.original_name = original_name;
        }
    }
    if let Some(category) = patch.category {
        product.category = category.trim().to_string();
    }
    if let Some(description) = patch.description {
        product.description = description.trim().to_string();
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    product.updated_at = now;
    validate(&product)?;
    Ok(product)
}

/// Checks a product document against the field schema.
///
/// All violations are collected into a single [`StoreError::Validation`].
pub fn validate(product: &Product) -> Result<()> {
    let mut violations = Vec::new();

    let title_len = product.title.chars().count();
    if title_len == 0 {
        violations.push("title: field \"title\" is required".to_string());
    } else if title_len < TITLE_MIN_LEN {
        violations.push(format!(
            "title: field \"title\" must be at least {TITLE_MIN_LEN} characters"
        ));
    } else if title_len > TITLE_MAX_LEN {
        violations.push(format!(
            "title: field \"title\" must be at most {TITLE_MAX_LEN} characters"
        ));
    }

    if product.image.file_name.is_empty() {
        violations.push("image.fileName: field \"fileName\" is required".to_string());
    }
    if product.image.original_name.is_empty() {
        violations.push("image.originalName: field \"originalName\" is required".to_string());
    }
    if product.category.is_empty() {
        violations.push("category: field \"category\" is required".to_string());
    }

    if let Some(price) = product.price {
        if !price.is_finite() {
            violations.push("price: price must be a finite number".to_string());
        } else if price < 0.0 {
            violations.push("price: price must not be negative".to_string());
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "product validation failed: {}",
            violations.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProductImage, ProductImagePatch};

    fn draft(title: &str) -> ProductDraft {
        ProductDraft::new(title, ProductImage::new("a.svg", "A.svg"), "misc")
    }

    fn message(err: StoreError) -> String {
        match err {
            StoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn new_product_trims_and_fills_defaults() {
        let product = new_product(
            ProductId::generate(),
            draft("  Lamp  ").with_price(10.0),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(product.title, "Lamp");
        assert_eq!(product.description, "");
        assert_eq!(product.price, Some(10.0));
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn title_length_is_checked_after_trimming() {
        let err = new_product(ProductId::generate(), draft("  A  "), Utc::now()).unwrap_err();
        assert!(message(err).contains("at least 2"));

        let long = "x".repeat(TITLE_MAX_LEN + 1);
        let err = new_product(ProductId::generate(), draft(&long), Utc::now()).unwrap_err();
        assert!(message(err).contains("at most 30"));

        let exact = "x".repeat(TITLE_MAX_LEN);
        assert!(new_product(ProductId::generate(), draft(&exact), Utc::now()).is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = new_product(
            ProductId::generate(),
            draft("Lamp").with_price(-1.0),
            Utc::now(),
        )
        .unwrap_err();
        assert!(message(err).contains("must not be negative"));
    }

    #[test]
    fn violations_are_collected() {
        let bad = ProductDraft::new("", ProductImage::new("", ""), " ");
        let msg = message(new_product(ProductId::generate(), bad, Utc::now()).unwrap_err());
        assert!(msg.starts_with("product validation failed: "));
        assert!(msg.contains("\"title\""));
        assert!(msg.contains("\"fileName\""));
        assert!(msg.contains("\"originalName\""));
        assert!(msg.contains("\"category\""));
    }

    #[test]
    fn apply_patch_updates_only_given_fields() {
        let created = Utc::now();
        let product = new_product(
            ProductId::generate(),
            draft("Lamp").with_price(10.0).with_description("bright"),
            created,
        )
        .unwrap();

        let later = created + chrono::Duration::seconds(5);
        let patch = ProductPatch::new().price(None).image(ProductImagePatch {
            file_name: Some("b.svg".to_string()),
            original_name: None,
        });
        let updated = apply_patch(product.clone(), patch, later).unwrap();

        assert_eq!(updated.title, "Lamp");
        assert_eq!(updated.description, "bright");
        assert_eq!(updated.price, None);
        assert_eq!(updated.image.file_name, "b.svg");
        assert_eq!(updated.image.original_name, "A.svg");
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn apply_patch_validates_result() {
        let product = new_product(ProductId::generate(), draft("Lamp"), Utc::now()).unwrap();
        let err = apply_patch(product, ProductPatch::new().title("L"), Utc::now()).unwrap_err();
        assert!(message(err).contains("at least 2"));
    }
}
