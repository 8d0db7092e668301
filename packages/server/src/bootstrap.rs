//! Dependency wiring for the chat room server.
//!
//! Dependencies are created in order:
//! 1. Room and Repository
//! 2. MessagePusher
//! 3. UseCases
//! 4. Event loop and Server

use std::{collections::HashMap, sync::Arc};

use irori_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::{
    domain::{
        DEFAULT_MAX_PARTICIPANTS, GuestNumberSource, MessagePusher, RandomGuestNumberSource, Room,
        RoomRepository, Timestamp,
    },
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{RoomEventLoop, RoomUseCases, Server},
    usecase::{
        ChangeNicknameUseCase, DisconnectParticipantUseCase, GetRoomStateUseCase,
        JoinRoomUseCase, QuitRoomUseCase, SendPrivateMessageUseCase, SendRoomMessageUseCase,
        WhoisUseCase,
    },
};

/// Room policy chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSettings {
    pub max_participants: usize,
    /// Use the nickname a client declares in chat-msg / chat-action
    pub trust_declared_nickname: bool,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            trust_declared_nickname: false,
        }
    }
}

/// Build a server with the system clock and random guest names
pub fn build_server(settings: RoomSettings) -> Server {
    build_server_with(
        settings,
        Arc::new(SystemClock),
        Arc::new(RandomGuestNumberSource),
    )
}

/// Build a server with explicit clock and guest-number sources
pub fn build_server_with(
    settings: RoomSettings,
    clock: Arc<dyn Clock>,
    guest_numbers: Arc<dyn GuestNumberSource>,
) -> Server {
    // 1. Room と Repository
    let room = Room::with_capacity(Timestamp::new(clock.now_millis()), settings.max_participants);
    tracing::info!("Room created with capacity {}", room.capacity());
    let repository: Arc<dyn RoomRepository> =
        Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(room))));

    // 2. MessagePusher
    let message_pusher: Arc<dyn MessagePusher> =
        Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new()))));

    // 3. UseCases
    let usecases = RoomUseCases {
        join: Arc::new(JoinRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            guest_numbers,
            clock,
        )),
        quit: Arc::new(QuitRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        whois: Arc::new(WhoisUseCase::new(repository.clone(), message_pusher.clone())),
        disconnect: Arc::new(DisconnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        change_nickname: Arc::new(ChangeNicknameUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        send_private_message: Arc::new(SendPrivateMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        send_room_message: Arc::new(SendRoomMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            settings.trust_declared_nickname,
        )),
    };
    let get_room_state_usecase = Arc::new(GetRoomStateUseCase::new(repository));

    // 4. Event loop と Server
    let event_loop = RoomEventLoop::new(usecases, message_pusher.clone());
    Server::new(event_loop, message_pusher, get_room_state_usecase)
}
