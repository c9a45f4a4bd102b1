use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::config::ConfigService;
use domain::services::permission::PermissionEvaluator;
use domain::services::temporary_access::GrantValidator;
use persistence::repositories::{AuditLogRepository, ConfigRepository, GrantRepository};

use crate::config::Config;
use crate::middleware::{require_admin, require_auth};
use crate::routes::{admin, boats, crew_members, health, races};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Cached configuration access shared by handlers and the evaluator.
    pub configs: Arc<ConfigService>,
    pub permissions: Arc<PermissionEvaluator>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let config_store = Arc::new(ConfigRepository::new(pool.clone()));
    let audit = Arc::new(AuditLogRepository::new(pool.clone()));
    let configs = Arc::new(ConfigService::new(config_store, audit.clone()));
    let grants = GrantValidator::new(Arc::new(GrantRepository::new(pool.clone())));
    let permissions = Arc::new(PermissionEvaluator::new(
        configs.clone(),
        grants,
        audit,
    ));

    let state = AppState {
        pool,
        config: config.clone(),
        configs,
        permissions,
    };

    // Team routes (require API key authentication)
    let protected_routes = Router::new()
        .route("/api/v1/boats", post(boats::create_boat))
        .route("/api/v1/boats", get(boats::list_boats))
        .route("/api/v1/boats/:boat_id", get(boats::get_boat))
        .route("/api/v1/boats/:boat_id", delete(boats::delete_boat))
        .route("/api/v1/boats/:boat_id/seats", put(boats::assign_seat))
        .route("/api/v1/boats/:boat_id/race", post(boats::select_race))
        .route(
            "/api/v1/boats/:boat_id/eligible-races",
            get(boats::eligible_races),
        )
        .route("/api/v1/boats/:boat_id/rental", post(boats::set_rental))
        .route("/api/v1/boats/:boat_id/price", get(boats::price_quote))
        .route("/api/v1/crew-members", post(crew_members::create_member))
        .route("/api/v1/crew-members", get(crew_members::list_members))
        .route(
            "/api/v1/crew-members/:member_id",
            get(crew_members::get_member),
        )
        .route(
            "/api/v1/crew-members/:member_id",
            put(crew_members::update_member),
        )
        .route(
            "/api/v1/crew-members/:member_id",
            delete(crew_members::delete_member),
        )
        .route("/api/v1/races", get(races::list_races))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes (require admin API key)
    let admin_routes = Router::new()
        .route("/api/v1/admin/config/:domain", get(admin::get_config))
        .route("/api/v1/admin/config/:domain", put(admin::put_config))
        .route("/api/v1/admin/grants", post(admin::grant_access))
        .route(
            "/api/v1/admin/grants/:user_id",
            delete(admin::revoke_access),
        )
        .route("/api/v1/admin/audit", get(admin::list_audit))
        .route(
            "/api/v1/admin/boats/:boat_id/status",
            post(admin::set_boat_status),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

