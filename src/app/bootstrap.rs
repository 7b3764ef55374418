use crate::app::controller::AppController;
use crate::config::AppConfig;
use crate::error::{Context, Result};

/// Entry point used by `main` to bootstrap the controller stack.
pub async fn run() -> Result<()> {
    let config = AppConfig::builtin();
    let controller = AppController::new(config).context("Failed to initialise HTTP client")?;
    controller.run().await
}
