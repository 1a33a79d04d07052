// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - The transport abstraction shared by matchmaking and sessions
//! - Matchmaking logic (pairing incoming connections)
//! - Game session orchestration (turn enforcement, game lifecycle)

pub mod connection;
pub mod game_session;
pub mod matchmaking;
pub mod router;
pub mod state;
pub mod ws_error;
