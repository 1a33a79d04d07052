//! HTTP and WebSocket routing configuration.

use actix_web::web;
use crate::server::game_session::session::ws_play;

/// Configure the application's WebSocket routes.
///
/// Both paths upgrade to a player socket that joins matchmaking.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").to(ws_play))
        .service(web::resource("/ws").to(ws_play));
}
