use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Response;
use axum::Form;
use http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use common::validation::validate_new_image;

use super::{redirect_home, PageError};
use crate::daemon::session::{PageContext, Session};
use crate::daemon::ServiceState;

#[derive(Template)]
#[template(path = "new_image.html")]
pub struct NewImageTemplate {
    pub page: PageContext,
    pub new_image: String,
    pub image_description: String,
}

#[derive(Debug, Deserialize)]
pub struct NewImageForm {
    #[serde(default)]
    pub new_image: String,
    #[serde(default)]
    pub image_description: String,
}

#[instrument(skip_all)]
pub async fn form(session: Session) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let template = NewImageTemplate {
        page: session.page(),
        new_image: String::new(),
        image_description: String::new(),
    };
    Ok(template.into_response())
}

/// Reference an image from the public directory in a new markdown document
#[instrument(skip(state, session))]
pub async fn submit(
    State(state): State<ServiceState>,
    session: Session,
    Form(form): Form<NewImageForm>,
) -> Result<Response, PageError> {
    session.require_signed_in()?;

    let NewImageForm {
        new_image,
        image_description,
    } = form;

    if let Err(reason) = validate_new_image(&new_image, &image_description, state.assets()) {
        session.flash(reason.to_string());
        let template = NewImageTemplate {
            page: session.page(),
            new_image,
            image_description,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    state
        .documents()
        .create_image_reference(&new_image, &image_description)
        .await
        .map_err(|e| PageError::document(&session, e))?;

    session.flash("Image has been uploaded");
    Ok(redirect_home())
}
