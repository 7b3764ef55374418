use reqwest::Client;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::ui::{run_dashboard, run_login, DashboardOutcome, LoginOutcome};

/// Drives the two-screen navigation surface over a shared HTTP client.
pub struct AppController {
    config: AppConfig,
    client: Client,
}

impl AppController {
    pub fn new(config: AppConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(AppError::message("No API host configured."));
        }

        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, client })
    }

    pub async fn run(self) -> Result<()> {
        loop {
            match run_login(&self.client, &self.config).await? {
                LoginOutcome::Authenticated => {
                    log::info!("customer verified, entering dashboard");
                }
                LoginOutcome::Exit => return Ok(()),
            }

            match run_dashboard(&self.client, &self.config).await? {
                // Nothing to invalidate on logout; no session is ever established.
                DashboardOutcome::Logout => continue,
                DashboardOutcome::Exit => return Ok(()),
            }
        }
    }
}
