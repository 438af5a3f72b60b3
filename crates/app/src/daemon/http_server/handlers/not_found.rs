use askama::Template;
use askama_axum::IntoResponse;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {}

/// 404 in whatever shape the client asked for
pub async fn not_found_handler(headers: HeaderMap) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if accept.contains("application/json") {
        let err_msg = serde_json::json!({"msg": "not found"});
        (StatusCode::NOT_FOUND, Json(err_msg)).into_response()
    } else if accept.contains("text/plain") && !accept.contains("text/html") {
        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "not found",
        )
            .into_response()
    } else {
        (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response()
    }
}
