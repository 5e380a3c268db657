use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pixelift::api::server;
use pixelift::config::ServiceConfig;
use pixelift::core_state::CoreState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env();
    let bind_addr = config.bind_addr;

    let core = match CoreState::init(config) {
        Ok(core) => Arc::new(core),
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(core, bind_addr).await {
        tracing::error!("server exited with error: {e}");
        std::process::exit(1);
    }
}
