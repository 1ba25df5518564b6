use async_trait::async_trait;
use common::ProductId;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Product, ProductDraft, ProductImage, ProductPatch, Result, StoreError, schema,
    store::{CatalogStore, parse_ids},
};

const UNIQUE_TITLE_CONSTRAINT: &str = "unique_product_title";

const PRODUCT_COLUMNS: &str = "id, title, image_file_name, image_original_name, category, description, price, created_at, updated_at";

/// PostgreSQL-backed catalog store.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgreSQL catalog store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let id: String = row.try_get("id")?;
        Ok(Product {
            id: ProductId::parse(&id)?,
            title: row.try_get("title")?,
            image: ProductImage {
                file_name: row.try_get("image_file_name")?,
                original_name: row.try_get("image_original_name")?,
            },
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn map_write_error(err: sqlx::Error, title: &str) -> StoreError {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.constraint() == Some(UNIQUE_TITLE_CONSTRAINT)
        {
            return StoreError::DuplicateKey {
                field: "title",
                value: title.to_string(),
            };
        }
        StoreError::Database(err)
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Product>> {
        let ids: Vec<String> = parse_ids(ids)?.into_iter().map(String::from).collect();

        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1) ORDER BY seq ASC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let id = ProductId::parse(id)?;

        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    async fn insert(&self, draft: ProductDraft) -> Result<Product> {
        let product = schema::new_product(ProductId::generate(), draft, schema::now())?;

        sqlx::query(
            r#"
            INSERT INTO products (id, title, image_file_name, image_original_name, category, description, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id.as_str())
        .bind(&product.title)
        .bind(&product.image.file_name)
        .bind(&product.image.original_name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &product.title))?;

        Ok(product)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_by_id(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>> {
        let id = ProductId::parse(id)?;

        // The row lock serializes concurrent patches of the same product.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let existing = Self::row_to_product(row)?;
        let updated = schema::apply_patch(existing, patch, schema::now())?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET title = $2, image_file_name = $3, image_original_name = $4,
                category = $5, description = $6, price = $7, updated_at = $8
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(updated.id.as_str())
        .bind(&updated.title)
        .bind(&updated.image.file_name)
        .bind(&updated.image.original_name)
        .bind(&updated.category)
        .bind(&updated.description)
        .bind(updated.price)
        .bind(updated.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Self::map_write_error(e, &updated.title))?;

        tx.commit().await?;

        Self::row_to_product(row).map(Some)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>> {
        let id = ProductId::parse(id)?;

        let row = sqlx::query(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }
}
