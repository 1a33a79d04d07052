//! Game session configuration constants.

/// Idle timeout (in seconds) after which the player to move forfeits.
/// `None` keeps sessions open for as long as both sockets stay connected.
pub const IDLE_TIMEOUT_SECS: Option<u64> = None;

/// How often (in seconds) an idle session is checked when the reaper is enabled.
pub const IDLE_CHECK_INTERVAL_SECS: u64 = 1;

/// Largest message (in bytes) reassembled from continuation frames.
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024;
