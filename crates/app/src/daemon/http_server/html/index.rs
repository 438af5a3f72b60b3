use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Response;
use tracing::instrument;

use super::{filters, PageError};
use crate::daemon::session::{PageContext, Session};
use crate::daemon::ServiceState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageContext,
    pub names: Vec<String>,
}

#[instrument(skip_all)]
pub async fn handler(
    State(state): State<ServiceState>,
    session: Session,
) -> Result<Response, PageError> {
    let names = state
        .documents()
        .list()
        .await
        .map_err(|e| PageError::document(&session, e))?;

    let template = IndexTemplate {
        page: session.page(),
        names,
    };
    Ok(template.into_response())
}
