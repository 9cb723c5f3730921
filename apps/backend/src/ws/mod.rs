pub mod hub;
pub mod outbox;
pub mod protocol;
pub mod session;

pub use hub::{
    ConnId, Connect, Disconnect, Dispatch, Hub, LiveConnections, DEFAULT_STALL_LIMIT,
};
pub use outbox::{Outbox, PushOutcome, DEFAULT_OUTBOX_CAPACITY};
pub use protocol::{ClientCommand, ProtocolError, ServerMsg};
pub use session::WsSession;
