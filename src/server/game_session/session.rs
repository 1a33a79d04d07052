//! WebSocket session handler for one player.
//!
//! On start the socket hands itself to the matchmaking server. Once paired,
//! text frames are forwarded to the game session; when the socket stops the
//! session is told so the remaining player can be awarded the game.

use actix::prelude::*;
use actix_http::ws::Item;
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_web_actors::ws;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::session::MAX_MESSAGE_BYTES;
use crate::server::connection::{ConnectionLink, PlayerHandle, SocketCommand};
use crate::server::game_session::messages::{Disconnected, Inbound};
use crate::server::matchmaking::messages::Accept;
use crate::server::matchmaking::server::MatchmakingServer;

pub struct PlayerSocket {
    player_id: Uuid,
    link: Arc<ConnectionLink>,
    matchmaking_addr: Addr<MatchmakingServer>,
    /// Payload of a fragmented message still being received.
    fragments: Option<Vec<u8>>,
}

impl PlayerSocket {
    pub fn new(matchmaking_addr: Addr<MatchmakingServer>) -> Self {
        Self {
            player_id: Uuid::new_v4(),
            link: Arc::new(ConnectionLink::new()),
            matchmaking_addr,
            fragments: None,
        }
    }

    fn forward(&self, payload: String) {
        match self.link.route() {
            Some(route) => route.session.do_send(Inbound {
                sender: route.symbol,
                payload,
            }),
            None => debug!("[PlayerSocket] Dropping payload from unpaired connection"),
        }
    }

    fn forward_bytes(&self, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.forward(text.to_string()),
            Err(_) => debug!("[PlayerSocket] Ignoring non UTF-8 payload"),
        }
    }

    /// Buffers continuation frames and forwards the message once complete.
    fn continuation(&mut self, item: Item, ctx: &mut ws::WebsocketContext<Self>) {
        let (chunk, last) = match item {
            Item::FirstText(bytes) | Item::FirstBinary(bytes) => {
                self.fragments = Some(Vec::with_capacity(bytes.len()));
                (bytes, false)
            }
            Item::Continue(bytes) => (bytes, false),
            Item::Last(bytes) => (bytes, true),
        };
        let Some(buffer) = self.fragments.as_mut() else {
            warn!("[PlayerSocket] Continuation frame without a first frame");
            return;
        };
        if buffer.len() + chunk.len() > MAX_MESSAGE_BYTES {
            warn!("[PlayerSocket] Player {} sent an oversized message", self.player_id);
            self.fragments = None;
            ctx.close(Some(ws::CloseCode::Size.into()));
            ctx.stop();
            return;
        }
        buffer.extend_from_slice(&chunk);
        if !last {
            return;
        }
        if let Some(message) = self.fragments.take() {
            self.forward_bytes(&message);
        }
    }
}

impl Actor for PlayerSocket {
    type Context = ws::WebsocketContext<Self>;

    /// Registers the connection with the matchmaking server.
    fn started(&mut self, ctx: &mut Self::Context) {
        let handle = PlayerHandle::new(self.player_id, ctx.address().recipient(), self.link.clone());
        info!("[PlayerSocket] Player {} connected", self.player_id);
        self.matchmaking_addr.do_send(Accept { handle });
    }

    /// Reports the disconnect to the game session, if paired.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(route) = self.link.mark_closed() {
            route.session.do_send(Disconnected {
                symbol: route.symbol,
            });
        }
        info!("[PlayerSocket] Player {} disconnected", self.player_id);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => self.forward(text.to_string()),
            Ok(ws::Message::Binary(bytes)) => self.forward_bytes(&bytes),
            Ok(ws::Message::Continuation(item)) => self.continuation(item, ctx),
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(e) => {
                warn!("[PlayerSocket] Protocol error: {}", e);
                ctx.stop();
            }
        }
    }
}

impl Handler<SocketCommand> for PlayerSocket {
    type Result = ();

    fn handle(&mut self, msg: SocketCommand, ctx: &mut Self::Context) {
        match msg {
            SocketCommand::Send(text) => ctx.text(text),
            SocketCommand::Terminate => {
                ctx.close(Some(ws::CloseCode::Normal.into()));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint: every upgraded connection joins matchmaking.
pub async fn ws_play(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        PlayerSocket::new(data.matchmaking_addr.clone()),
        &req,
        stream,
    )
}
