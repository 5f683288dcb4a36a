use std::process::ExitCode;
use std::sync::Arc;

use scribe::{ArticleService, Config, Formatter, MemoryStore, Server, routes};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet.
            eprintln!("scribe: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.tracing.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), scribe::Error> {
    info!(
        tags = config.tags.len(),
        page_size = config.app.page_size,
        transport_status = ?config.app.transport_status,
        "starting scribe"
    );

    let store = MemoryStore::with_tags(config.tags);
    let formatter = Formatter::new(config.app.transport_status);
    let api = Arc::new(ArticleService::new(store, config.app.page_size, formatter));

    Server::bind(&config.server.addr)?
        .max_body_size(config.server.max_body_size)
        .serve(routes::router(api))
        .await
}
