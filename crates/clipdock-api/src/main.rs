use clipdock_api::{setup, telemetry};
use clipdock_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry();

    let config = Config::from_env()?;
    let port = config.server_port;

    let (_state, router) = setup::initialize_app(config).await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port = port, "clipdock-api listening");

    axum::serve(listener, router).await?;

    Ok(())
}
