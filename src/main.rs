//! Commentary server binary.
//!
//! Wiring order: configuration, tracing, database pool and migrations,
//! handlers, router.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commentary::adapters::http::{router, SsoHandlers};
use commentary::adapters::postgres::{
    PostgresCommenterRepository, PostgresSiteRepository, PostgresSsoTokenStore,
};
use commentary::adapters::security::RandomTokenGenerator;
use commentary::application::handlers::commenter::{CompleteSsoHandler, StartSsoHandler};
use commentary::config::{AppConfig, CorsOrigins};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let pool = connect(&config).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    let app = build_router(&config, pool);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Commentary listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.features.json_logs || config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let db = &config.database;
    let statement_timeout_ms = db.statement_timeout_ms();

    PgPoolOptions::new()
        .min_connections(db.min_connections)
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .idle_timeout(db.idle_timeout())
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query(&format!("SET statement_timeout = {}", statement_timeout_ms))
                    .execute(conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&db.url)
        .await
}

fn build_router(config: &AppConfig, pool: PgPool) -> axum::Router {
    let sites = Arc::new(PostgresSiteRepository::new(pool.clone()));
    let commenters = Arc::new(PostgresCommenterRepository::new(pool.clone()));
    let sso_tokens = Arc::new(PostgresSsoTokenStore::new(pool));
    let tokens = Arc::new(RandomTokenGenerator::new(config.auth.token_bytes));

    let start = StartSsoHandler::new(
        sites.clone(),
        commenters.clone(),
        sso_tokens.clone(),
        tokens.clone(),
        config.auth.sso_token_ttl_secs,
    );
    let complete = CompleteSsoHandler::new(sites, commenters, sso_tokens, tokens);
    let sso = SsoHandlers::new(Arc::new(start), Arc::new(complete));

    let mut app = router(sso).layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    match config.server.cors() {
        CorsOrigins::Disabled => {}
        CorsOrigins::Any => app = app.layer(CorsLayer::new().allow_origin(Any)),
        CorsOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            app = app.layer(CorsLayer::new().allow_origin(origins));
        }
    }

    if config.features.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
