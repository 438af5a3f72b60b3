use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Response;
use axum::Form;
use http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use common::validation::validate_new_document_name;

use super::{redirect_home, PageError};
use crate::daemon::session::{PageContext, Session};
use crate::daemon::ServiceState;

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewDocumentTemplate {
    pub page: PageContext,
    pub new_document: String,
}

#[derive(Debug, Deserialize)]
pub struct NewDocumentForm {
    #[serde(default)]
    pub new_document: String,
}

#[instrument(skip_all)]
pub async fn form(session: Session) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let template = NewDocumentTemplate {
        page: session.page(),
        new_document: String::new(),
    };
    Ok(template.into_response())
}

/// Create an empty document
#[instrument(skip(state, session))]
pub async fn submit(
    State(state): State<ServiceState>,
    session: Session,
    Form(form): Form<NewDocumentForm>,
) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let name = form.new_document.trim().to_string();
    let existing = state
        .documents()
        .list()
        .await
        .map_err(|e| PageError::document(&session, e))?;

    if let Err(reason) = validate_new_document_name(&name, existing.as_slice()) {
        session.flash(reason.to_string());
        let template = NewDocumentTemplate {
            page: session.page(),
            new_document: name,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    state
        .documents()
        .create(&name, b"")
        .await
        .map_err(|e| PageError::document(&session, e))?;

    session.flash(format!("{} has been created", name));
    Ok(redirect_home())
}
