use atelier_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Atelier server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Run the HTTP server (state is initialized inside run)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        anyhow::bail!("server exited with error: {e}");
    }

    Ok(())
}
