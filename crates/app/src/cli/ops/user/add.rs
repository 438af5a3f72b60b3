use clap::Args;

use common::prelude::{CredentialError, CredentialStore, ValidationError, YamlCredentialStore};
use common::validation::{validate_new_password, validate_new_username};
use folio::state::{AppState, StateError};

/// Register a user, with the same rules as the sign-up page
#[derive(Args, Debug, Clone)]
pub struct Add {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("credential error: {0}")]
    Credentials(#[from] CredentialError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Add {
    type Error = AddError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let store = YamlCredentialStore::new(&state.credentials_path);

        let credentials = store.load().await?;
        validate_new_username(&self.username, &credentials)?;
        validate_new_password(&self.password)?;

        store.register(&self.username, &self.password).await?;

        Ok(format!(
            "Added user {} to {}",
            self.username,
            state.credentials_path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::{Op, OpContext};

    fn add(username: &str, password: &str) -> Add {
        Add {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_user() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("site");
        AppState::init(Some(dir.clone()), None).unwrap();
        let ctx = OpContext::new(Some(dir));

        add("admin", "secret").execute(&ctx).await.unwrap();

        let state = AppState::load(ctx.config_path.clone()).unwrap();
        let store = YamlCredentialStore::new(&state.credentials_path);
        assert!(store.verify("admin", "secret").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_user_validates() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("site");
        AppState::init(Some(dir.clone()), None).unwrap();
        let ctx = OpContext::new(Some(dir));

        assert!(matches!(
            add("ab", "secret").execute(&ctx).await,
            Err(AddError::Invalid(ValidationError::UsernameTooShort))
        ));
        assert!(matches!(
            add("admin", "abc").execute(&ctx).await,
            Err(AddError::Invalid(ValidationError::PasswordTooShort))
        ));

        add("admin", "secret").execute(&ctx).await.unwrap();
        assert!(matches!(
            add("admin", "other").execute(&ctx).await,
            Err(AddError::Invalid(ValidationError::UsernameTaken))
        ));
    }
}
