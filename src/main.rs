//! Sum Server - Entry Point

use env_logger::Env;
use log::{error, info};

use sum_server::utils::validation::parse_port;
use sum_server::{Server, ServerConfig};

const USAGE: &str = "Enter command 'sum-server <port>' where port is an integer value more than 0 and less than 65536";

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default `info` level
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    let port = match parse_port(arg.as_deref()) {
        Ok(port) => port,
        Err(_) => {
            println!("{}", USAGE);
            return;
        }
    };

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Launching sum server...");

    match Server::bind(port, config).await {
        Ok(server) => server.start().await,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    }
}
