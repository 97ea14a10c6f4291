use mcp_vm_server::config::ServerConfig;
use mcp_vm_server::logging;
use mcp_vm_server::server::McpServer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mcp-vm-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logger(config.log_format);
    tracing::info!(api_url = %config.api_url, "starting mcp-vm-server");

    let mut server = match McpServer::new(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("cannot build compute API client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
