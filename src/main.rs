use std::net::SocketAddr;

use blog_api::{connect_db, init_tracing, make_router, Config};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    if let Err(error) = run().await {
        tracing::error!("Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> blog_api::Result<()> {
    let config = Config::from_env()?;
    let pool = connect_db(&config.db).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let router = make_router();
    blog_api::run_app(router, addr, pool).await
}
