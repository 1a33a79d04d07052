use actix::prelude::*;
use log::{debug, info};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::session::IDLE_CHECK_INTERVAL_SECS;
use crate::game::Symbol;
use crate::server::connection::PlayerHandle;
use crate::server::game_session::messages::{Disconnected, Inbound};
use crate::server::game_session::protocol::SessionProtocol;

/// Actor owning one paired session and its game.
///
/// Stops itself as soon as the protocol reaches its terminal state.
pub struct GameSession {
    pub game_id: Uuid,
    protocol: SessionProtocol<PlayerHandle>,
    idle_timeout: Option<Duration>,
    last_activity: Instant,
}

impl GameSession {
    pub fn new(x: PlayerHandle, o: PlayerHandle, idle_timeout: Option<Duration>) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            protocol: SessionProtocol::new(x, o),
            idle_timeout,
            last_activity: Instant::now(),
        }
    }

    fn stop_if_terminal(&mut self, ctx: &mut Context<Self>) {
        if !self.protocol.is_terminal() {
            return;
        }
        match self.protocol.engine().winner() {
            Some(winner) => info!("[GameSession] Game {} over, winner={}", self.game_id, winner),
            None => info!("[GameSession] Game {} over, draw", self.game_id),
        }
        ctx.stop();
    }

    fn check_idle(&mut self, timeout: Duration, ctx: &mut Context<Self>) {
        if self.last_activity.elapsed() < timeout {
            return;
        }
        info!(
            "[GameSession] Game {} idle for {:?}, {} forfeits",
            self.game_id,
            timeout,
            self.protocol.engine().turn()
        );
        self.protocol.handle_idle_timeout();
        self.stop_if_terminal(ctx);
    }
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[GameSession] Game {} started: x={} o={}",
            self.game_id,
            self.protocol.connection(Symbol::X).id(),
            self.protocol.connection(Symbol::O).id()
        );
        self.protocol.start();
        if let Some(timeout) = self.idle_timeout {
            let every = Duration::from_secs(IDLE_CHECK_INTERVAL_SECS).min(timeout);
            ctx.run_interval(every, move |act, ctx| act.check_idle(timeout, ctx));
        }
        self.stop_if_terminal(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!("[GameSession] Game {} stopped", self.game_id);
    }
}

impl Handler<Inbound> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: Inbound, ctx: &mut Context<Self>) -> Self::Result {
        let before = self.protocol.engine().occupied();
        self.protocol.handle_payload(msg.sender, &msg.payload);
        if self.protocol.engine().occupied() != before {
            self.last_activity = Instant::now();
        }
        self.stop_if_terminal(ctx);
    }
}

impl Handler<Disconnected> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: Disconnected, ctx: &mut Context<Self>) -> Self::Result {
        info!("[GameSession] Player {} left game {}", msg.symbol, self.game_id);
        self.protocol.handle_disconnect(msg.symbol);
        self.stop_if_terminal(ctx);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::game::Snapshot;
    use crate::server::connection::{ConnectionLink, SocketCommand};
    use crate::server::game_session::messages::{MessageType, ServerMessage};
    use crate::server::game_session::protocol::SessionState;
    use std::sync::{Arc, Mutex};

    #[derive(Message)]
    #[rtype(result = "(SessionState, Snapshot)")]
    struct GetSessionState;

    impl Handler<GetSessionState> for GameSession {
        type Result = MessageResult<GetSessionState>;

        fn handle(&mut self, _msg: GetSessionState, _ctx: &mut Context<Self>) -> Self::Result {
            MessageResult((self.protocol.state(), self.protocol.engine().snapshot()))
        }
    }

    pub(crate) type Log = Arc<Mutex<Vec<SocketCommand>>>;

    /// Stands in for a socket actor and records what it is told.
    struct Probe {
        log: Log,
    }

    impl Actor for Probe {
        type Context = Context<Self>;
    }

    impl Handler<SocketCommand> for Probe {
        type Result = ();

        fn handle(&mut self, msg: SocketCommand, ctx: &mut Context<Self>) {
            let terminate = msg == SocketCommand::Terminate;
            self.log.lock().unwrap().push(msg);
            if terminate {
                ctx.stop();
            }
        }
    }

    pub(crate) fn probe() -> (PlayerHandle, Log) {
        let log = Log::default();
        let addr = Probe { log: log.clone() }.start();
        let handle = PlayerHandle::new(Uuid::new_v4(), addr.recipient(), Arc::new(ConnectionLink::new()));
        (handle, log)
    }

    /// Decoded messages, plus whether the socket was told to terminate last.
    pub(crate) fn received(log: &Log) -> (Vec<ServerMessage>, bool) {
        let commands = log.lock().unwrap().clone();
        let terminated = commands.last() == Some(&SocketCommand::Terminate);
        let messages = commands
            .into_iter()
            .filter_map(|command| match command {
                SocketCommand::Send(text) => Some(serde_json::from_str(&text).unwrap()),
                SocketCommand::Terminate => None,
            })
            .collect();
        (messages, terminated)
    }

    async fn settle() {
        actix::clock::sleep(Duration::from_millis(50)).await;
    }

    fn inbound(sender: Symbol, cell: usize) -> Inbound {
        Inbound {
            sender,
            payload: format!(r#"{{"move":{}}}"#, cell),
        }
    }

    #[actix::test]
    async fn test_session_plays_to_a_win() {
        let (x, x_log) = probe();
        let (o, o_log) = probe();
        let session = GameSession::new(x, o, None).start();

        for (sender, cell) in [(Symbol::X, 0), (Symbol::O, 1), (Symbol::X, 4), (Symbol::O, 2)] {
            session.send(inbound(sender, cell)).await.unwrap();
        }
        let (state, snapshot) = session.send(GetSessionState).await.unwrap();
        assert_eq!(state, SessionState::AwaitingMove(Symbol::X));
        assert!(!snapshot.game_over);

        session.do_send(inbound(Symbol::X, 8));
        settle().await;

        let (x_messages, x_terminated) = received(&x_log);
        let (o_messages, o_terminated) = received(&o_log);
        assert!(x_terminated && o_terminated);
        assert_eq!(x_messages.first().unwrap().kind, MessageType::Move);
        for stop in [x_messages.last().unwrap(), o_messages.last().unwrap()] {
            assert_eq!(stop.kind, MessageType::Stop);
            assert_eq!(stop.winner, Some(Symbol::X));
        }
        assert!(!session.connected());
    }

    #[actix::test]
    async fn test_disconnect_ends_session() {
        let (x, x_log) = probe();
        let (o, o_log) = probe();
        let session = GameSession::new(x, o, None).start();

        session.send(Disconnected { symbol: Symbol::X }).await.unwrap();
        settle().await;

        let (o_messages, o_terminated) = received(&o_log);
        assert!(o_terminated);
        assert_eq!(o_messages.len(), 1);
        assert_eq!(o_messages[0].winner, Some(Symbol::O));

        let (x_messages, x_terminated) = received(&x_log);
        assert_eq!(x_messages.len(), 1);
        assert_eq!(x_messages[0].kind, MessageType::Move);
        assert!(!x_terminated);
        assert!(!session.connected());
    }

    #[actix::test]
    async fn test_idle_reaper_forfeits_side_to_move() {
        let (x, x_log) = probe();
        let (o, o_log) = probe();
        let session = GameSession::new(x, o, Some(Duration::from_millis(100))).start();

        actix::clock::sleep(Duration::from_millis(400)).await;

        let (o_messages, o_terminated) = received(&o_log);
        assert!(o_terminated);
        assert_eq!(o_messages.last().unwrap().winner, Some(Symbol::O));
        let (x_messages, x_terminated) = received(&x_log);
        assert!(x_terminated);
        assert_eq!(x_messages.last().unwrap().kind, MessageType::Stop);
        assert!(!session.connected());
    }
}
