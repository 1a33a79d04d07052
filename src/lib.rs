//! Two-player tic-tac-toe server.
//!
//! Connections arriving over WebSocket are paired two at a time; each pair
//! plays one game refereed by the server, after which both sockets close.

pub mod config;
pub mod game;
pub mod server;
