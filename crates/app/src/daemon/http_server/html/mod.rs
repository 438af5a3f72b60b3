use askama_axum::IntoResponse;
use axum::response::{Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use http::StatusCode;

use common::prelude::{AccessError, CredentialError, DocumentError};

use super::handlers::NotFoundTemplate;
use crate::daemon::session::Session;
use crate::daemon::ServiceState;

mod document;
mod index;
mod new_document;
mod new_image;
mod users;

pub fn router() -> Router<ServiceState> {
    Router::new()
        .route("/", get(index::handler))
        .route("/new", get(new_document::form).post(new_document::submit))
        .route("/new_image", get(new_image::form).post(new_image::submit))
        .route("/users/signin", get(users::sign_in_form).post(users::sign_in))
        .route("/users/signout", post(users::sign_out))
        .route("/users/new", get(users::sign_up_form).post(users::sign_up))
        .route("/:name", get(document::view).post(document::update))
        .route("/:name/edit", get(document::edit))
        .route("/:name/delete", post(document::delete))
        .route("/:name/duplicate", post(document::duplicate))
}

/// Why a page handler stopped before rendering its own view
#[derive(Debug)]
pub enum PageError {
    /// Send the browser elsewhere. The reason, if any, is already flashed.
    Redirect(&'static str),
    NotFound,
    Internal(String),
}

impl PageError {
    /// Flash `reason` and send the browser back to the listing
    pub fn flash(session: &Session, reason: impl std::fmt::Display) -> Self {
        session.flash(reason.to_string());
        Self::Redirect("/")
    }

    /// Missing, colliding or exhausted names are the user's problem,
    ///  anything else is ours
    pub fn document(session: &Session, err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound(_)
            | DocumentError::AlreadyExists(_)
            | DocumentError::CopiesExhausted(_) => Self::flash(session, err),
            DocumentError::Io(e) => Self::Internal(e.to_string()),
        }
    }
}

/// The session guards flash their own message before failing
impl From<AccessError> for PageError {
    fn from(_: AccessError) -> Self {
        Self::Redirect("/")
    }
}

impl From<CredentialError> for PageError {
    fn from(err: CredentialError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Redirect(to) => Redirect::to(to).into_response(),
            PageError::NotFound => (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response(),
            PageError::Internal(reason) => {
                tracing::error!(reason = %reason, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

fn redirect_home() -> Response {
    Redirect::to("/").into_response()
}

pub mod filters {
    use url::Url;

    /// Percent-encode a document name so it links as one path segment
    pub fn url_segment<T: std::fmt::Display>(name: T) -> ::askama::Result<String> {
        let mut url = Url::parse("http://localhost/")
            .map_err(|e| ::askama::Error::Custom(Box::new(e)))?;
        url.path_segments_mut()
            .map_err(|_| ::askama::Error::Fmt(std::fmt::Error))?
            .pop_if_empty()
            .push(&name.to_string());
        Ok(url.path().trim_start_matches('/').to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_url_segment() {
            assert_eq!(url_segment("about.md").unwrap(), "about.md");
            assert_eq!(url_segment("what?.md").unwrap(), "what%3F.md");
            assert_eq!(url_segment("a#b.md").unwrap(), "a%23b.md");
            assert_eq!(url_segment("50%.txt").unwrap(), "50%25.txt");
            assert_eq!(url_segment("my notes.md").unwrap(), "my%20notes.md");
        }
    }
}
