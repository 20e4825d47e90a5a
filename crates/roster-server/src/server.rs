use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware, routing::get, routing::post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use roster_feed::{FeedClientConfig, HttpFeedClient};

use crate::{
    cache::MembershipCache, config::AppConfig, handlers, health::HealthReporter,
    middleware as app_middleware,
};

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<MembershipCache>,
    pub health: Arc<HealthReporter>,
}

/// Wire the feed client, cache and health reporter from configuration.
pub fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let authors_url = url::Url::parse(&cfg.feeds.authors_url)?;
    let roles_url = url::Url::parse(&cfg.feeds.roles_url)?;

    let client_config = FeedClientConfig::new(authors_url, roles_url)
        .with_request_timeout(cfg.feeds.request_timeout())
        .with_max_response_size(cfg.feeds.max_response_size_bytes);
    let feed = Arc::new(HttpFeedClient::new(client_config));

    Ok(AppState {
        cache: Arc::new(MembershipCache::new(feed.clone())),
        health: Arc::new(HealthReporter::new(feed)),
    })
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Service info and readiness
        .route("/", get(handlers::root))
        .route("/healthz/authors", get(handlers::healthz_authors))
        .route("/healthz/roles", get(handlers::healthz_roles))
        .route("/readyz", get(handlers::readyz))
        // Membership cache operations
        .route("/memberships/refresh", post(handlers::refresh))
        .route("/memberships/count", get(handlers::count))
        .route("/memberships/ids", get(handlers::ids))
        .route("/memberships/{uuid}", get(handlers::get_by_uuid))
        // Middleware stack (order: request id -> cors/trace -> body limit)
        .layer(middleware::from_fn(app_middleware::request_id))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub struct RosterServer {
    addr: SocketAddr,
    app: Router,
    state: AppState,
    config: AppConfig,
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub fn build(self) -> anyhow::Result<RosterServer> {
        let state = build_state(&self.config)?;
        let app = build_app(state.clone(), &self.config);

        Ok(RosterServer {
            addr: self.addr,
            app,
            state,
            config: self.config,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterServer {
    pub async fn run(self) -> anyhow::Result<()> {
        // One refresh attempt up front. The authority being down is not
        // fatal; the service starts Empty and the background task (or an
        // explicit refresh call) populates it later.
        if let Err(e) = self.state.cache.refresh().await {
            tracing::warn!(error = %e, "initial refresh failed, starting with empty cache");
        }

        if let Some(interval) = self.config.feeds.refresh_interval() {
            let cache = self.state.cache.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                // The first tick fires immediately; the startup refresh
                // already covered it.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    if let Err(e) = cache.refresh().await {
                        tracing::warn!(error = %e, "background refresh failed, keeping current snapshot");
                    }
                }
            });
        }

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
