use axum::{response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
    (status = 200, description = "Server is up")
    )
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "medgate is running",
    }))
}
