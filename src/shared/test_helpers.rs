use std::time::Duration;

use axum::{extract::Path, http::StatusCode, response::Response, routing::get, Json, Router};
use sqlx::sqlite::SqlitePoolOptions;

use crate::core::config::GeolocationConfig;
use crate::core::database::{run_migrations, DbPool};
use crate::core::flash::FlashSigner;
use crate::core::templates::TemplateEngine;
use crate::features::geolocation::GeolocationService;

/// Fresh in-memory SQLite store with the schema applied.
///
/// A single connection that never expires keeps the database alive for the
/// lifetime of the pool.
pub async fn memory_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let pool = DbPool::Sqlite(pool);
    run_migrations(&pool).await.unwrap();
    pool
}

/// Geolocation pointed at a port nothing listens on
pub fn offline_geolocation() -> GeolocationService {
    GeolocationService::new(&GeolocationConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(1),
    })
    .unwrap()
}

/// Serve `body` with `status` for every `/{ip}` lookup; returns the base URL
pub async fn spawn_geolocation_stub(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/{ip}",
        get(move |Path(_ip): Path<String>| {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Answer every `/{ip}` lookup successfully, but only after `delay`
pub async fn spawn_slow_geolocation_stub(delay: Duration) -> String {
    let app = Router::new().route(
        "/{ip}",
        get(move |Path(_ip): Path<String>| async move {
            tokio::time::sleep(delay).await;
            Json(serde_json::json!({ "status": "success", "country": "Kenya" }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Make every further insert into `table` abort once `column` equals `value`
pub async fn abort_inserts_where(pool: &DbPool, table: &str, column: &str, value: &str) {
    let DbPool::Sqlite(pool) = pool else {
        panic!("insert triggers are only installed on SQLite test stores");
    };
    let sql = format!(
        "CREATE TRIGGER abort_{table}_insert BEFORE INSERT ON {table} \
         WHEN NEW.{column} = '{value}' \
         BEGIN SELECT RAISE(ABORT, 'rejected by test trigger'); END"
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}

pub fn test_flash_signer() -> FlashSigner {
    FlashSigner::new("test-session-secret").unwrap()
}

pub fn test_templates() -> TemplateEngine {
    TemplateEngine::new().unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
