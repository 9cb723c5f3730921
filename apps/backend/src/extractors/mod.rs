pub mod room_code;
pub mod session_id;
pub mod validated_json;

pub use room_code::RoomCode;
pub use session_id::SessionId;
pub use validated_json::ValidatedJson;
