use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;

use folio::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Address the site listens on
    #[arg(long, default_value = "0.0.0.0:4567")]
    pub listen_addr: String,

    /// Directory for daily rolling log files (stdout only if unset)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("invalid listen address: {0}")]
    InvalidListenAddr(String),
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(InitError::InvalidListenAddr(self.listen_addr.clone()));
        }

        let config = AppConfig {
            listen_addr: self.listen_addr.clone(),
            log_dir: self.log_dir.clone(),
        };
        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        Ok(format!(
            "Initialized folio directory at: {}\n\
             - Documents: {}\n\
             - Public images: {}\n\
             - Users: {}\n\
             - Config: {}\n\
             - Listen address: {}\n\
             Add a first user with `folio user add --username <name> --password <password>`",
            state.folio_dir.display(),
            state.data_path.display(),
            state.public_path.display(),
            state.credentials_path.display(),
            state.config_path.display(),
            state.config.listen_addr,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::{Op, OpContext};

    #[tokio::test]
    async fn test_init_writes_layout() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = OpContext::new(Some(temp.path().join("site")));
        let init = Init {
            listen_addr: "127.0.0.1:4000".to_string(),
            log_dir: None,
        };

        let output = init.execute(&ctx).await.unwrap();
        assert!(output.contains("127.0.0.1:4000"));

        let state = AppState::load(ctx.config_path.clone()).unwrap();
        assert_eq!(state.config.listen_addr, "127.0.0.1:4000");
    }

    #[tokio::test]
    async fn test_init_rejects_bad_address() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = OpContext::new(Some(temp.path().join("site")));
        let init = Init {
            listen_addr: "localhost".to_string(),
            log_dir: None,
        };

        assert!(matches!(
            init.execute(&ctx).await,
            Err(InitError::InvalidListenAddr(_))
        ));
        assert!(!temp.path().join("site").exists());
    }
}
