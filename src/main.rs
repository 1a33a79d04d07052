//! Main entry point for the backend server.
//!
//! Initializes logging and the actor system, then launches the HTTP server
//! with the WebSocket endpoint players connect to.

use actix::Actor;
use actix_web::{App, HttpServer, web};
use log::info;

use tictactoe_server::config::ServerConfig;
use tictactoe_server::server;
use tictactoe_server::server::matchmaking::server::MatchmakingServer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Log at info level unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Start the MatchmakingServer actor (pairs connections, starts game sessions).
    let matchmaking_addr = MatchmakingServer::new(config.idle_timeout).start();

    // Shared application state for WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(matchmaking_addr));

    info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(server::router::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
