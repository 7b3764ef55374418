use anyhow::Result;

use bullion_cli::app;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    app::bootstrap::run().await?;
    Ok(())
}
