use std::sync::Arc;

use hollywood_stars_api::{
    actors::{ActorRepository, ActorService},
    audit::{AuditLogger, RedisPublisher},
    auth::{AuthService, SaltedSha256Hasher, TokenRepository, TokenService, UserRepository},
    cache::TtlCache,
    config::Config,
    create_router, db, AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Hollywood Stars API - Starting...");

    let config = Config::from_env().expect("Invalid configuration");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let token_repo = TokenRepository::new(db_pool.clone());
    match token_repo.delete_expired_tokens().await {
        Ok(purged) => tracing::info!(purged, "Purged expired refresh tokens"),
        Err(e) => tracing::warn!("Failed to purge expired refresh tokens: {}", e),
    }

    let audit = match &config.redis_url {
        Some(url) => match RedisPublisher::connect(url, config.audit_queue.clone()).await {
            Ok(publisher) => AuditLogger::new(Arc::new(publisher)),
            Err(e) => {
                tracing::warn!("Audit publishing disabled: {}", e);
                AuditLogger::disabled()
            }
        },
        None => {
            tracing::info!("REDIS_URL not set, audit publishing disabled");
            AuditLogger::disabled()
        }
    };

    let auth = AuthService::new(
        Arc::new(UserRepository::new(db_pool.clone())),
        Arc::new(token_repo),
        Arc::new(SaltedSha256Hasher::new(config.password_salt.clone())),
        TokenService::with_durations(&config.jwt_secret, config.token_ttl, config.refresh_token_ttl),
        audit.clone(),
    );
    let actors = ActorService::new(
        Arc::new(ActorRepository::new(db_pool)),
        TtlCache::new(config.cache_ttl),
        audit,
    );

    // Create the application router
    let app = create_router(AppState {
        auth: Arc::new(auth),
        actors: Arc::new(actors),
    });

    // Start the Axum server
    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Hollywood Stars API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
