use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::coercion;
use crate::domain::models::product::Product;
use crate::domain::services::catalog_service::CatalogService;
use crate::domain::validation::{ProductPayload, StockPayload};
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/stock", patch(patch_stock))
        .route("/categoria/{categoria}", get(list_by_category))
}

/// Wire shape of a product. The stored exact decimal never leaves the
/// service; `precio` is always the exchange (numeric) form.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub nombre: String,
    pub precio: f64,
    pub categoria: String,
    pub stock: i64,
    pub creado: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actualizado: Option<DateTime<Utc>>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            nombre: product.name,
            precio: coercion::to_exchange(product.price),
            categoria: product.category,
            stock: product.stock,
            creado: product.created_at,
            actualizado: product.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub productos: Vec<ProductResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SingleProduct {
    pub producto: ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct MutationResult {
    pub mensaje: &'static str,
    pub producto: ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct DeletionResult {
    pub mensaje: &'static str,
    pub producto_eliminado: ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categoria: String,
    pub productos: Vec<ProductResponse>,
    pub total: usize,
}

async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductList>, AppError> {
    let service = CatalogService::new(state.store.clone());

    let productos: Vec<ProductResponse> = service
        .list()
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Ok(Json(ProductList {
        total: productos.len(),
        productos,
    }))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SingleProduct>, AppError> {
    let service = CatalogService::new(state.store.clone());

    let producto = service.get(&id).await?.into();

    Ok(Json(SingleProduct { producto }))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<MutationResult>), AppError> {
    let service = CatalogService::new(state.store.clone());

    let producto = service.create(&payload).await?.into();

    Ok((
        StatusCode::CREATED,
        Json(MutationResult {
            mensaje: "Producto creado exitosamente",
            producto,
        }),
    ))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<MutationResult>, AppError> {
    let service = CatalogService::new(state.store.clone());

    let producto = service.full_update(&id, &payload).await?.into();

    Ok(Json(MutationResult {
        mensaje: "Producto actualizado exitosamente",
        producto,
    }))
}

async fn patch_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<StockPayload>,
) -> Result<Json<MutationResult>, AppError> {
    let service = CatalogService::new(state.store.clone());

    let producto = service.stock_patch(&id, &payload).await?.into();

    Ok(Json(MutationResult {
        mensaje: "Stock actualizado exitosamente",
        producto,
    }))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletionResult>, AppError> {
    let service = CatalogService::new(state.store.clone());

    let producto_eliminado = service.delete(&id).await?.into();

    Ok(Json(DeletionResult {
        mensaje: "Producto eliminado exitosamente",
        producto_eliminado,
    }))
}

async fn list_by_category(
    State(state): State<Arc<AppState>>,
    Path(categoria): Path<String>,
) -> Result<Json<CategoryList>, AppError> {
    let service = CatalogService::new(state.store.clone());

    let productos: Vec<ProductResponse> = service
        .list_by_category(&categoria)
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Ok(Json(CategoryList {
        categoria,
        total: productos.len(),
        productos,
    }))
}
