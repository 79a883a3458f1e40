//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! handled inside the `blog` crate.

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use blog::{BlogConfig, PgBlogRepository, blog_router};
use chrono::Duration;
use platform::password::DEFAULT_TIME_COST;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 31113;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Blog configuration
    let config = blog_config()?;
    let tokens = config.token_service()?;
    let hasher = config.credential_hasher();
    let repo = PgBlogRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/api/v1", blog_router(repo, hasher, tokens))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Resolve blog configuration from the environment.
///
/// `BLOG_TOKEN_SECRET` is mandatory; a missing or blank secret aborts
/// startup. Every other knob has a default.
fn blog_config() -> anyhow::Result<BlogConfig> {
    resolve_blog_config(
        env::var("BLOG_TOKEN_SECRET").ok(),
        env::var("BLOG_TOKEN_TTL_HOURS").ok(),
        env::var("BLOG_PASSWORD_COST").ok(),
        env::var("BLOG_PASSWORD_PEPPER").ok(),
    )
}

fn resolve_blog_config(
    token_secret: Option<String>,
    ttl_hours: Option<String>,
    password_cost: Option<String>,
    password_pepper: Option<String>,
) -> anyhow::Result<BlogConfig> {
    let token_secret = token_secret
        .filter(|s| !s.trim().is_empty())
        .context("BLOG_TOKEN_SECRET must be set to a non-empty value")?;

    let ttl_hours: i64 = ttl_hours.and_then(|v| v.parse().ok()).unwrap_or(24);

    let password_cost: u32 = password_cost
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIME_COST);

    let password_pepper = password_pepper
        .filter(|p| !p.is_empty())
        .map(String::into_bytes);

    Ok(BlogConfig {
        token_secret,
        token_ttl: Duration::hours(ttl_hours),
        password_cost,
        password_pepper,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_token_secret_is_fatal() {
        assert!(resolve_blog_config(None, None, None, None).is_err());
        assert!(resolve_blog_config(Some("  ".to_string()), None, None, None).is_err());
    }

    #[test]
    fn test_config_defaults_and_overrides() {
        let config = resolve_blog_config(Some("secret".to_string()), None, None, None).unwrap();
        assert_eq!(config.token_ttl, Duration::hours(24));
        assert_eq!(config.password_cost, DEFAULT_TIME_COST);
        assert!(config.password_pepper.is_none());

        let config = resolve_blog_config(
            Some("secret".to_string()),
            Some("1".to_string()),
            Some("3".to_string()),
            Some("pepper".to_string()),
        )
        .unwrap();
        assert_eq!(config.token_ttl, Duration::hours(1));
        assert_eq!(config.password_cost, 3);
        assert_eq!(config.password_pepper.as_deref(), Some(b"pepper".as_slice()));
    }
}
