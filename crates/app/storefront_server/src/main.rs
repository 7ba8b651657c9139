//! Storefront API server binary.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use storefront_core::auth::revocation::InMemoryRevocationStore;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "storefront_server", about = "Storefront API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/storefront"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Run the embedded migrations and exit without serving.
    #[arg(long, default_value_t = false)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,storefront_api=debug,storefront_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(
        version = storefront_core::version(),
        port = args.port,
        "starting storefront_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    storefront_api::migrate(&pool).await?;

    if args.migrate_only {
        info!("migrations complete, exiting (--migrate-only)");
        return Ok(());
    }

    let mut config = storefront_api::config::ApiConfig::from_env();
    config.bind_addr = format!("127.0.0.1:{}", args.port);
    config.database_url = args.database_url;

    let state = storefront_api::AppState {
        pool,
        config: config.clone(),
        revocation: Arc::new(InMemoryRevocationStore::new()),
    };

    let app = storefront_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
