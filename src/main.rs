mod catalog;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize the Gemini client (non-fatal: chat degrades to offline mode
    // with a canned reply when the credential is missing).
    let model = match llm::GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "Gemini client initialized");
            Some(Arc::new(client) as Arc<dyn llm::ChatModel>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini client not configured — chat running in offline mode");
            None
        }
    };

    let state = state::AppState::new(model);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "shopchat listening");
    axum::serve(listener, app).await.expect("server failed");
}
