mod handlers;
mod models;
mod routes;
mod utils;

use axum::serve;
use std::error::Error;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let (app, bind_addr) = routes::make_app();

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{bind_addr}");
    serve(listener, app).await?;

    Ok(())
}
