use std::path::Path as FsPath;

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use http::header;
use serde::Deserialize;
use tracing::instrument;

use common::prelude::{render, Document, DocumentError};

use super::{filters, redirect_home, PageError};
use crate::daemon::session::{PageContext, Session};
use crate::daemon::ServiceState;

#[derive(Template)]
#[template(path = "document.html")]
pub struct DocumentTemplate {
    pub page: PageContext,
    pub name: String,
    pub body: String,
}

#[derive(Template)]
#[template(path = "edit_file.html")]
pub struct EditTemplate {
    pub page: PageContext,
    pub name: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub edited_content: String,
}

async fn resolve(
    state: &ServiceState,
    session: &Session,
    name: &str,
) -> Result<Document, PageError> {
    state
        .documents()
        .resolve(name)
        .await
        .map_err(|e| PageError::document(session, e))
}

/// Display a document, or a public asset of the same name.
///
/// Text documents go out as-is with `text/plain`; markdown is rendered
///  into the page shell.
#[instrument(skip(state, session))]
pub async fn view(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    session: Session,
) -> Result<Response, PageError> {
    if !name.contains('.') {
        return Err(PageError::NotFound);
    }

    let document = match state.documents().resolve(&name).await {
        Ok(document) => document,
        Err(DocumentError::NotFound(name)) => match state.assets().path_of(&name) {
            Some(path) => return serve_asset(&path).await,
            None => return Err(PageError::flash(&session, DocumentError::NotFound(name))),
        },
        Err(e) => return Err(PageError::document(&session, e)),
    };

    // only reachable for files dropped into the data directory by hand
    let Some(kind) = document.kind() else {
        tracing::warn!(name = document.name(), "no renderer for document");
        return Err(PageError::NotFound);
    };

    let content = state
        .documents()
        .read(&document)
        .await
        .map_err(|e| PageError::document(&session, e))?;
    let rendered = render(kind, &content, state.markdown());

    if rendered.is_html() {
        let template = DocumentTemplate {
            page: session.page(),
            name: document.name().to_string(),
            body: rendered.body,
        };
        return Ok(template.into_response());
    }

    Ok((
        [(header::CONTENT_TYPE, rendered.content_type.to_string())],
        rendered.body,
    )
        .into_response())
}

async fn serve_asset(path: &FsPath) -> Result<Response, PageError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| PageError::Internal(e.to_string()))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], data).into_response())
}

#[instrument(skip(state, session))]
pub async fn edit(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    session: Session,
) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let document = resolve(&state, &session, &name).await?;
    let content = state
        .documents()
        .read(&document)
        .await
        .map_err(|e| PageError::document(&session, e))?;

    let template = EditTemplate {
        page: session.page(),
        name: document.name().to_string(),
        content: String::from_utf8_lossy(&content).into_owned(),
    };
    Ok(template.into_response())
}

#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    session: Session,
    Form(form): Form<EditForm>,
) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let document = resolve(&state, &session, &name).await?;
    state
        .documents()
        .write(&document, form.edited_content.as_bytes())
        .await
        .map_err(|e| PageError::document(&session, e))?;

    session.flash(format!("{} has been updated", document.name()));
    Ok(redirect_home())
}

#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    session: Session,
) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let document = resolve(&state, &session, &name).await?;
    state
        .documents()
        .delete(&document)
        .await
        .map_err(|e| PageError::document(&session, e))?;

    session.flash(format!("{} was deleted", document.name()));
    Ok(redirect_home())
}

#[instrument(skip(state, session))]
pub async fn duplicate(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    session: Session,
) -> Result<Response, PageError> {
    session.require_signed_in()?;

    state
        .documents()
        .duplicate(&name)
        .await
        .map_err(|e| PageError::document(&session, e))?;

    session.flash(format!("{} has been duplicated", name));
    Ok(redirect_home())
}
