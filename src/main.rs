use std::sync::Arc;

use productos_api::config::Config;
use productos_api::error::AppError;
use productos_api::logging::init_logging;
use productos_api::server::{self, AppState};
use productos_api::store::KvStore;
use productos_api::store::memory::InMemoryStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config)?;

    tracing::info!("Starting catalog service");

    let store = InMemoryStore::new(config.store.table.as_str());
    tracing::info!(table = %store.table(), "Store ready");
    let store: Arc<dyn KvStore> = Arc::new(store);

    let app_state = AppState {
        config: config.clone(),
        store,
    };

    let app = server::create_app(app_state).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);

    axum::serve(listener, app).await?;
    Ok(())
}
