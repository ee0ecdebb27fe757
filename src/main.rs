use std::sync::Arc;

use anyhow::Result;
use tokio::{net::TcpListener, signal};

use house_price::{App, config::AppConfig, provider::ModelProvider, schema::Schema, server};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()?;
    let schema = Schema::load()?;
    let app = Arc::new(App::new(schema, ModelProvider::new(config.model_source())));

    // Load eagerly so the outcome is logged at startup instead of on the first request.
    if !app.availability().is_available() {
        log::warn!("serving without a model, the form is disabled");
    }

    let addr = config.addr()?;
    let listener = TcpListener::bind(addr).await?;

    tokio::select! {
        ret = server::serve(listener, app) => ret?,
        _ = signal::ctrl_c() => log::info!("received SIGTERM"),
    }

    Ok(())
}
