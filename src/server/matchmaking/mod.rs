/// Matchmaking module: pairs incoming connections two at a time.

pub mod matchmaker;
pub mod messages;
pub mod server;
