//! UseCase layer: one use case per room registry operation.

mod change_nickname;
mod disconnect_participant;
mod error;
mod get_room_state;
mod join_room;
mod notify;
mod quit_room;
mod send_private_message;
mod send_room_message;
mod whois;

#[cfg(test)]
pub(crate) mod testing;

pub use change_nickname::ChangeNicknameUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    DisconnectError, GetRoomStateError, JoinError, PrivateMessageError, RenameError,
    RoomMessageError,
};
pub use get_room_state::GetRoomStateUseCase;
pub use join_room::JoinRoomUseCase;
pub use quit_room::QuitRoomUseCase;
pub use send_private_message::SendPrivateMessageUseCase;
pub use send_room_message::{MessageStyle, SendRoomMessageUseCase};
pub use whois::WhoisUseCase;
