use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use marketing_site::core::config::Config;
use marketing_site::core::flash::FlashSigner;
use marketing_site::core::templates::TemplateEngine;
use marketing_site::core::{database, middleware, openapi, telemetry};
use marketing_site::features::contact::handlers::ContactState;
use marketing_site::features::contact::{
    routes as contact_routes, ContactService, SqlContactRepository,
};
use marketing_site::features::geolocation::GeolocationService;
use marketing_site::features::pages::handlers::{self as pages_handlers, PageState};
use marketing_site::features::pages::routes as pages_routes;
use marketing_site::features::visitors::handlers::VisitorState;
use marketing_site::features::visitors::{
    routes as visitors_routes, ActiveVisitors, SqlVisitorRepository, VisitorService,
};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!(
        "Database connection pool created ({}: {})",
        pool.backend_name(),
        config.database.target.redacted()
    );

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Shared infrastructure
    let templates = Arc::new(
        TemplateEngine::new().map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?,
    );
    let flash = Arc::new(
        FlashSigner::new(&config.session.secret)
            .map_err(|e| anyhow::anyhow!("Invalid session secret: {}", e))?,
    );
    let geolocation = Arc::new(GeolocationService::new(&config.geolocation)?);
    tracing::info!(
        "Geolocation service initialized: {} (timeout {:?})",
        config.geolocation.base_url,
        config.geolocation.timeout
    );

    // Visitor tracking
    let visitor_repository = Arc::new(SqlVisitorRepository::new(pool.clone()));
    let visitor_service = Arc::new(VisitorService::new(
        visitor_repository,
        Arc::clone(&geolocation),
    ));
    let active_visitors = Arc::new(ActiveVisitors::new(config.tracking.active_window));
    tracing::info!("Visitor service initialized");

    // Contact form
    let contact_repository = Arc::new(SqlContactRepository::new(pool.clone()));
    let contact_service = Arc::new(ContactService::new(
        contact_repository,
        Arc::clone(&geolocation),
    ));
    tracing::info!("Contact service initialized");

    let visitor_state = VisitorState {
        service: visitor_service,
        templates: Arc::clone(&templates),
        flash: Arc::clone(&flash),
        active: active_visitors,
        push_interval: config.tracking.push_interval,
        stats_limit: config.tracking.stats_limit,
    };
    let contact_state = ContactState {
        service: contact_service,
        flash: Arc::clone(&flash),
    };
    let page_state = PageState {
        templates,
        flash,
    };

    let app = Router::new()
        .merge(visitors_routes::routes(visitor_state))
        .merge(contact_routes::routes(contact_state))
        .merge(pages_routes::routes(page_state))
        .merge(openapi::routes())
        .nest_service("/static", ServeDir::new("static"))
        .fallback(pages_handlers::not_found)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!(
        "OpenAPI document available at http://{}{}",
        addr,
        openapi::OPENAPI_PATH
    );

    // Peer addresses back the client IP when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    pool.close().await;
    Ok(())
}
