use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::api::search::search_images;
use crate::api::sources::list_sources;
use crate::api::Context;
use crate::config::Config;

pub fn router(ctx: Arc<Context>) -> Router {
    Router::new()
        .route("/api/search", get(search_images))
        .route("/api/sources", get(list_sources))
        .with_state(ctx)
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let ctx = Arc::new(Context::new(&config)?);
    let live = ctx
        .providers
        .values()
        .filter(|provider| provider.has_credentials())
        .map(|provider| provider.id().to_string())
        .collect::<Vec<_>>();
    info!("Live providers: {:?}", live);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server on {}", addr);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}
