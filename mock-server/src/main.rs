use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use vero_mock_server::AppState;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let auth_token = std::env::var("VERO_AUTH_TOKEN").unwrap_or_else(|_| "AUTH_TOKEN".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    vero_mock_server::run(listener, AppState::new(&auth_token)).await
}
