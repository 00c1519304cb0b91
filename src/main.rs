mod config;
mod db;
mod extract;
mod rag;
mod server;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> () {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docuchat=info,tower_http=info")),
        )
        .init();

    server::run().await;
}
