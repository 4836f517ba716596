use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tonic::transport::Server;
use tracing::info;

use actix_middleware::{JwtAuth, RequireRole};
use auth_core::TokenCodec;
use grpc_auth::AuthInterceptor;
use grpc_clients::{GrpcClientPool, GrpcConfig as GrpcClientConfig};

use order_service::config::Config;
use order_service::grpc::clients::{GrpcCartGateway, GrpcPaymentGateway};
use order_service::grpc::server::{OrderGrpcService, OrderServiceServer};
use order_service::handlers::{orders, AppState};
use order_service::repository::SqlxOrderRepository;
use order_service::services::OrderService;

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("starting order-service");

    // Load configuration; an absent or empty signing secret aborts here.
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "configuration loaded: env={}, http_port={}, grpc_port={}",
        config.app.env, config.app.http_port, config.grpc.port
    );

    // Token codec shared by the HTTP middleware and the gRPC interceptor
    let codec = Arc::new(
        TokenCodec::new(&config.auth.token_secret)
            .map_err(|e| anyhow::anyhow!("invalid token configuration: {}", e))?,
    );

    // Database pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("database pool created and verified");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("database migrations completed");

    // gRPC clients for the cart and payment collaborators
    let grpc_cfg = GrpcClientConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load gRPC client config: {}", e))?;
    let client_pool = GrpcClientPool::new(&grpc_cfg)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create gRPC client pool: {}", e))?;
    info!("cart and payment gRPC clients initialized");

    // Saga coordinator over the storage and collaborator ports
    let orders_service = Arc::new(OrderService::new(
        Arc::new(SqlxOrderRepository::new(pg_pool.clone())),
        Arc::new(GrpcCartGateway::new(client_pool.cart())),
        Arc::new(GrpcPaymentGateway::new(client_pool.payment())),
    ));

    let http_addr = format!("{}:{}", config.app.host, config.app.http_port);
    let grpc_addr = format!("{}:{}", config.app.host, config.grpc.port)
        .parse()
        .context("Invalid gRPC address")?;

    info!("starting servers:");
    info!("  - HTTP API: http://{}", http_addr);
    info!("  - gRPC service: grpc://{}", grpc_addr);

    let mut join_set = JoinSet::new();

    // HTTP server: bearer-authenticated /orders scope plus admin routes
    let http_state = web::Data::new(AppState {
        orders: orders_service.clone(),
    });
    let http_codec = codec.clone();
    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/orders")
                    .wrap(JwtAuth::new(http_codec.clone()))
                    .route("", web::post().to(orders::create_order))
                    .route("", web::get().to(orders::list_orders))
                    .route("/{id}", web::get().to(orders::get_order))
                    .route("/{id}", web::put().to(orders::update_order_status)),
            )
            .service(
                web::scope("/admin/orders")
                    .wrap(RequireRole::admin())
                    .wrap(JwtAuth::new(http_codec.clone()))
                    .route("/{id}", web::delete().to(orders::delete_order)),
            )
    })
    .bind(&http_addr)
    .context("Failed to bind HTTP server")?
    .run();

    join_set.spawn(async move {
        http_server
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))
    });
    info!("HTTP server started");

    // gRPC server behind the auth interceptor
    let grpc_service = OrderGrpcService::new(orders_service.clone());
    let interceptor = AuthInterceptor::new(codec.clone());

    join_set.spawn(async move {
        Server::builder()
            .add_service(OrderServiceServer::with_interceptor(
                grpc_service,
                interceptor,
            ))
            .serve_with_shutdown(grpc_addr, shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("gRPC server error: {}", e))
    });
    info!("gRPC server started");

    info!("order-service is running");

    // Wait for any task to complete (or fail)
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(())) => {
                info!("task completed");
            }
            Ok(Err(e)) => {
                tracing::error!("task failed: {:#}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::error!("task panicked: {:#}", e);
                return Err(anyhow::anyhow!("task panicked: {}", e));
            }
        }
    }

    info!("order-service shutting down");
    Ok(())
}
