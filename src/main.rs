use todolist_api::application::todo_service::TodoServiceImpl;
use todolist_api::config::Config;
use todolist_api::domain::repository::TodoRepository;
use todolist_api::http::routes::{AppState, todo_lists, todos};
use todolist_api::http::routing;
use todolist_api::infrastructure::sqlite_repo::SqliteTodoRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let repo = SqliteTodoRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let state = AppState { service };
    let router = routing::app(todo_lists::router(state.clone()).merge(todos::router(state)));

    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(
        tokio::net::TcpListener::bind(config.bind_addr).await?,
        router,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
