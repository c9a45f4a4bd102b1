//! Authentication middleware.
//!
//! Teams authenticate with the `X-API-Key` header. Admins may act on
//! behalf of another team by setting `X-Act-As-Team` to that team's id;
//! the impersonation is carried through to the permission evaluator,
//! which records it as an audited bypass.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use persistence::repositories::TeamRepository;
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;

/// Authenticated team identity, stored in request extensions.
#[derive(Debug, Clone)]
pub struct TeamAuth {
    pub team_id: Uuid,
    pub name: String,
    pub is_admin: bool,
    pub home_club: String,
    /// Team an admin acts on behalf of, from `X-Act-As-Team`.
    pub impersonated_team: Option<Uuid>,
}

impl TeamAuth {
    /// The team whose resources the request operates on.
    pub fn effective_team(&self) -> Uuid {
        self.impersonated_team.unwrap_or(self.team_id)
    }
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<TeamAuth, Response> {
    let api_key = headers
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized_response("Invalid or missing API key"))?;

    let team = TeamRepository::new(state.pool.clone())
        .find_by_api_key(api_key)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "api key lookup failed");
            internal_response()
        })?
        .ok_or_else(|| unauthorized_response("Invalid or missing API key"))?;

    let impersonated_team = match headers
        .get("X-Act-As-Team")
        .and_then(|v| v.to_str().ok())
    {
        Some(raw) => {
            let id: Uuid = raw
                .parse()
                .map_err(|_| bad_request_response("X-Act-As-Team must be a UUID"))?;
            // Impersonating yourself is a no-op, not a bypass.
            if id == team.id {
                None
            } else {
                Some(id)
            }
        }
        None => None,
    };

    Ok(TeamAuth {
        team_id: team.id,
        name: team.name,
        is_admin: team.is_admin,
        home_club: team.home_club,
        impersonated_team,
    })
}

/// Middleware that requires API key authentication.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(response) => response,
    }
}

/// Middleware for admin-only routes.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(auth) => {
            if !auth.is_admin {
                return forbidden_response("Admin access required");
            }
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(response) => response,
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}

fn bad_request_response(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "validation_error",
            "message": message
        })),
    )
        .into_response()
}

fn internal_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An internal error occurred"
        })),
    )
        .into_response()
}
