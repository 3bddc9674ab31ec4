use std::sync::Arc;

use crate::domain::models::product::{Product, fields};
use crate::domain::mutation;
use crate::domain::validation::{self, FieldChanges, ProductPayload, StockPayload};
use crate::error::AppError;
use crate::store::{AttrValue, Item, KvStore, ScanFilter};

/// Orchestrates validation, mutation building and the store. Owns identity
/// assignment and timestamp stamping; callers never supply `id`, `creado` or
/// `actualizado`.
pub struct CatalogService {
    store: Arc<dyn KvStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let items = self.store.scan(None).await?;
        items.iter().map(Self::decode).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Product, AppError> {
        let item = self.store.get_item(id).await?.ok_or(AppError::NotFound)?;
        Self::decode(&item)
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, AppError> {
        let draft = validation::validate_create(payload)?;
        let product = Product::new(draft);
        self.store
            .put_item(&product.id, product.clone().into_item())
            .await?;
        tracing::info!(id = %product.id, "producto creado");
        Ok(product)
    }

    pub async fn full_update(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        // Point lookup first: a missing id must fail before the body is
        // even inspected, and before any mutation.
        if self.store.get_item(id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let changes = validation::validate_full_update(payload)?;
        self.apply(id, changes).await
    }

    pub async fn stock_patch(
        &self,
        id: &str,
        payload: &StockPayload,
    ) -> Result<Product, AppError> {
        if self.store.get_item(id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let stock = validation::validate_stock_patch(payload)?;
        let changes = FieldChanges {
            stock: Some(stock),
            ..FieldChanges::default()
        };
        self.apply(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<Product, AppError> {
        let item = self.store.get_item(id).await?.ok_or(AppError::NotFound)?;
        let product = Self::decode(&item)?;
        self.store.delete_item(id).await?;
        tracing::info!(id = %product.id, "producto eliminado");
        Ok(product)
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        // Full scan with a server-side equality predicate; the store has no
        // secondary index on categoria. An unmatched category is a success
        // with zero records, not an error.
        let filter = ScanFilter {
            attribute: fields::CATEGORIA.to_string(),
            equals: AttrValue::S(category.to_string()),
        };
        let items = self.store.scan(Some(&filter)).await?;
        items.iter().map(Self::decode).collect()
    }

    /// Sparse merge through the store's own update mechanism; untouched
    /// fields are never reconstructed client-side.
    async fn apply(&self, id: &str, changes: FieldChanges) -> Result<Product, AppError> {
        let op = mutation::build_update(id, changes);
        let item = self.store.update_item(&op).await?;
        Self::decode(&item)
    }

    fn decode(item: &Item) -> Result<Product, AppError> {
        Product::from_item(item)
            .ok_or_else(|| AppError::Internal("registro almacenado con forma inesperada".into()))
    }
}
