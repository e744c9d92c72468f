use axum::{Router, routing::get};
use dotenvy::dotenv;

use mono_users_axum::{MONO_USERS_ROUTE_PREFIX, users_router};

mod server;
use server::{init_tracing, listen_port, spawn_http_server};

async fn hello() -> &'static str {
    "Hello from mono-users"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("demo_users");

    mono_users_axum::init().await?;

    let app = Router::new()
        .route("/mono", get(hello))
        .nest(MONO_USERS_ROUTE_PREFIX.as_str(), users_router());

    let http_server = spawn_http_server(listen_port()?, app);
    http_server.await?;

    Ok(())
}
