use book_reservations::{
    adapters::postgres::{PostgresBookInventory, PostgresReservationStore, PostgresUserDirectory},
    api::{handlers::AppState, router::create_router},
    application::reservation::ServiceDependencies,
    config::Config,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_reservations=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        max_connections = config.max_connections,
        "connecting to database"
    );

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    // Initialize adapters
    let service_deps = ServiceDependencies {
        reservation_store: Arc::new(PostgresReservationStore::new(pool.clone())),
        book_inventory: Arc::new(PostgresBookInventory::new(pool.clone())),
        user_directory: Arc::new(PostgresUserDirectory::new(pool)),
    };

    let app = create_router(Arc::new(AppState { service_deps }));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
