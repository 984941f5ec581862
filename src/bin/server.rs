//! Student records server: reads settings from the environment, ensures the
//! database and students table exist, then serves the API.

use std::sync::Arc;
use student_records::{
    api_routes, apply_migrations, common_routes_with_ready, ensure_database_exists, with_layers, AppState,
    PgStudentRepository, Settings,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_records=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    apply_migrations(&pool, &settings.db_schema).await?;

    let repo = Arc::new(PgStudentRepository::new(pool.clone(), &settings.db_schema));
    let state = AppState::new(repo);
    let app = with_layers(
        api_routes(state).merge(common_routes_with_ready(pool)),
        settings.cors_allowed_origin.clone(),
    );

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
