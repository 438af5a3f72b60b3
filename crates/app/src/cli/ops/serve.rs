use clap::Args;

use folio::state::{AppState, StateError};
use folio::spawn_service;

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Default log level, RUST_LOG directives take precedence
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Override the configured listen address
    #[arg(long)]
    pub listen_addr: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut state = AppState::load(ctx.config_path.clone())?;
        if let Some(listen_addr) = &self.listen_addr {
            state.config.listen_addr = listen_addr.clone();
        }

        let config = state.to_service_config(self.log_level)?;
        spawn_service(&config).await;

        Ok("folio stopped".to_string())
    }
}
