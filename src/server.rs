use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::products;
use crate::config::Config;
use crate::error::AppError;
use crate::store::KvStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KvStore>,
}

pub async fn create_app(state: AppState) -> Result<Router, AppError> {
    let cors_enabled = state.config.server.cors;
    let app_state = Arc::new(state);

    let mut app = Router::new()
        .route("/", get(home))
        .nest("/productos", products::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    if cors_enabled {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok(app)
}

/// Static capability description for the root path.
async fn home() -> Json<Value> {
    Json(json!({
        "mensaje": "API REST de catálogo de productos",
        "version": "2.0",
        "database": "almacén clave-valor",
        "endpoints": {
            "GET /productos": "Listar todos los productos",
            "GET /productos/{id}": "Obtener producto específico",
            "POST /productos": "Crear nuevo producto",
            "PUT /productos/{id}": "Actualizar producto",
            "DELETE /productos/{id}": "Eliminar producto",
            "GET /productos/categoria/{categoria}": "Filtrar por categoría",
            "PATCH /productos/{id}/stock": "Actualizar stock"
        }
    }))
}
