use anyhow::Result;
use celora::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
