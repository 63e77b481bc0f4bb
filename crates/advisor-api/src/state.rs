//! Resolved configuration shared by every command.

use std::path::PathBuf;

use advisor_core::advisor::box_service::BoxAdvisorService;
use advisor_core::conversation::controller::SessionController;
use advisor_infra::config::{load_client_config, resolve_data_dir};
use advisor_infra::http::HttpAdvisorService;
use advisor_types::config::ClientConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    /// Effective configuration: `config.toml` plus the `--url` / env override.
    pub config: ClientConfig,
}

impl AppState {
    pub async fn init(base_url_override: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_client_config(&data_dir)
            .await
            .with_base_url_override(base_url_override);

        tracing::debug!(
            data_dir = %data_dir.display(),
            base_url = %config.base_url,
            "Configuration resolved"
        );

        Ok(Self { data_dir, config })
    }

    /// A fresh controller talking to the configured advisor service.
    pub fn controller(&self) -> anyhow::Result<SessionController<BoxAdvisorService>> {
        let service = HttpAdvisorService::new(&self.config)?;
        Ok(SessionController::new(BoxAdvisorService::new(service)))
    }
}
