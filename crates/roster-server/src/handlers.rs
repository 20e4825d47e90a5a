use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::stream;
use serde_json::json;
use uuid::Uuid;

use crate::health::CheckOutcome;
use crate::server::AppState;

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Roster",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

/// POST /memberships/refresh
pub async fn refresh(State(state): State<AppState>) -> impl IntoResponse {
    match state.cache.refresh().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "message": "Memberships fetched",
                "memberships": stats.memberships,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": e.to_string()})),
        ),
    }
}

/// GET /memberships/count - plain-text integer.
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    state.cache.count().to_string()
}

/// GET /memberships/ids - one JSON object per id, newline-delimited,
/// streamed.
pub async fn ids(State(state): State<AppState>) -> impl IntoResponse {
    let lines = state
        .cache
        .ids()
        .into_iter()
        .map(|id| Ok::<_, std::convert::Infallible>(json!({"id": id}).to_string() + "\n"));

    Body::from_stream(stream::iter(lines))
}

/// GET /memberships/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> impl IntoResponse {
    match state.cache.get(&uuid) {
        Some(membership) => (StatusCode::OK, Json(membership)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Membership not found"})),
        )
            .into_response(),
    }
}

/// GET /healthz/authors
pub async fn healthz_authors(State(state): State<AppState>) -> impl IntoResponse {
    check_response(state.health.authors_check().await)
}

/// GET /healthz/roles
pub async fn healthz_roles(State(state): State<AppState>) -> impl IntoResponse {
    check_response(state.health.roles_check().await)
}

/// GET /readyz
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.health.good_to_go().await;
    let code = if status.good_to_go {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

fn check_response(outcome: CheckOutcome) -> impl IntoResponse {
    let code = if outcome.ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(outcome))
}
