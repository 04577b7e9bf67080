#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ironbank_observability::init();

    let auth_secret = std::env::var("AUTH_SECRET").unwrap_or_else(|_| {
        tracing::warn!("AUTH_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let app = ironbank_api::app::build_app(auth_secret).await;

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
