use actix::prelude::*;

use crate::server::connection::PlayerHandle;

/// A newly upgraded connection looking for an opponent.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct Accept {
    pub handle: PlayerHandle,
}
