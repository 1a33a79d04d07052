pub mod messages;
pub mod protocol;
pub mod server;
pub mod session;

pub use server::GameSession;
