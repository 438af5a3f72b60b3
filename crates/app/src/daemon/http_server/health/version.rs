use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use common::prelude::{build_info, BuildInfo};

#[derive(Serialize)]
pub struct VersionResponse {
    pub service: &'static str,
    #[serde(flatten)]
    pub build: BuildInfo,
}

#[tracing::instrument]
pub async fn handler() -> Response {
    let body = VersionResponse {
        service: crate::state::APP_NAME,
        build: build_info(),
    };
    (StatusCode::OK, Json(body)).into_response()
}
