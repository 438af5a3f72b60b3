use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Response;
use axum::Form;
use http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use common::prelude::{authenticate, AccessError, CredentialStore};
use common::validation::{validate_new_password, validate_new_username};

use super::{redirect_home, PageError};
use crate::daemon::session::{PageContext, Session};
use crate::daemon::ServiceState;

#[derive(Template)]
#[template(path = "sign_in.html")]
pub struct SignInTemplate {
    pub page: PageContext,
    pub username: String,
}

#[derive(Template)]
#[template(path = "sign_up.html")]
pub struct SignUpTemplate {
    pub page: PageContext,
    pub new_username: String,
}

/// Absent fields are distinguished from empty ones: only a form that
///  submitted something earns the "Invalid Credentials" message.
#[derive(Deserialize)]
pub struct SignInForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub new_username: String,
    #[serde(default)]
    pub new_password: String,
}

#[instrument(skip_all)]
pub async fn sign_in_form(session: Session) -> Result<Response, PageError> {
    session.require_signed_out()?;

    let template = SignInTemplate {
        page: session.page(),
        username: String::new(),
    };
    Ok(template.into_response())
}

#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<ServiceState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Result<Response, PageError> {
    session.require_signed_out()?;

    let submitted = form.username.is_some() || form.password.is_some();
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    if authenticate(state.credentials(), &username, &password).await? {
        tracing::info!(username = %username, "user signed in");
        session.update(|ctx| {
            ctx.sign_in(username);
            ctx.flash("Welcome!");
        });
        return Ok(redirect_home());
    }

    if submitted {
        session.flash(AccessError::InvalidCredentials.to_string());
    }
    let template = SignInTemplate {
        page: session.page(),
        username,
    };
    Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
}

#[instrument(skip_all)]
pub async fn sign_out(session: Session) -> Result<Response, PageError> {
    session.require_signed_in()?;

    session.update(|ctx| {
        if let Some(username) = ctx.sign_out() {
            tracing::info!(username = %username, "user signed out");
        }
        ctx.flash("You have been signed out");
    });
    Ok(redirect_home())
}

#[instrument(skip_all)]
pub async fn sign_up_form(session: Session) -> Result<Response, PageError> {
    session.require_signed_out()?;

    let template = SignUpTemplate {
        page: session.page(),
        new_username: String::new(),
    };
    Ok(template.into_response())
}

#[instrument(skip_all)]
pub async fn sign_up(
    State(state): State<ServiceState>,
    session: Session,
    Form(form): Form<SignUpForm>,
) -> Result<Response, PageError> {
    session.require_signed_out()?;

    let credentials = state.credentials().load().await?;
    let checked = validate_new_username(&form.new_username, &credentials)
        .and_then(|_| validate_new_password(&form.new_password));

    if let Err(reason) = checked {
        session.flash(reason.to_string());
        let template = SignUpTemplate {
            page: session.page(),
            new_username: form.new_username,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    state
        .credentials()
        .register(&form.new_username, &form.new_password)
        .await?;

    session.flash("User created successfully!");
    Ok(redirect_home())
}
