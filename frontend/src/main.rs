//! Command line driver: replays one address-bar query against the search service.
//!
//! Usage: `catalog-frontend "term=orders&resource=table&index=0"`

use std::sync::Arc;

use catalog_frontend::{
    api::search_api::BackendSearchApi, app::SearchApp, config::SearchConfig, routes::MemoryHistory,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let Some(url_search) = std::env::args().nth(1) else {
        anyhow::bail!("usage: catalog-frontend \"<url query>\"");
    };

    let history = Arc::new(MemoryHistory::default());
    let app = SearchApp::new(Arc::new(BackendSearchApi::from_env()), history.clone(), SearchConfig::from_env());

    let action = app.url_did_update(&url_search).await??;
    tracing::info!("url update handled: {:?}", action);

    let output = serde_json::json!({
        "action": action,
        "state": app.snapshot(),
        "history": history.entries(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
