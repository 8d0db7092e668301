//! Serialized event loop over the room.
//!
//! Every connection forwards its inbound events and its disconnect into one
//! channel. A single task drains it and runs the use cases one at a time, so
//! each operation observes and leaves a consistent room.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, MessagePusher, Notice},
    infrastructure::dto::websocket::ClientEvent,
    usecase::{
        ChangeNicknameUseCase, DisconnectError, DisconnectParticipantUseCase, JoinError,
        JoinRoomUseCase, MessageStyle, QuitRoomUseCase, SendPrivateMessageUseCase,
        SendRoomMessageUseCase, WhoisUseCase,
    },
};

/// What happened on a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// A well-formed event frame
    Inbound(ClientEvent),
    /// A text frame that is not a known event
    Malformed,
    /// The transport closed
    Disconnected,
}

/// An event tagged with the connection it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCommand {
    pub connection_id: ConnectionId,
    pub event: RoomEvent,
}

impl RoomCommand {
    pub fn new(connection_id: ConnectionId, event: RoomEvent) -> Self {
        Self {
            connection_id,
            event,
        }
    }
}

pub type CommandSender = mpsc::UnboundedSender<RoomCommand>;

/// Use cases driven by the event loop
pub struct RoomUseCases {
    pub join: Arc<JoinRoomUseCase>,
    pub quit: Arc<QuitRoomUseCase>,
    pub whois: Arc<WhoisUseCase>,
    pub disconnect: Arc<DisconnectParticipantUseCase>,
    pub change_nickname: Arc<ChangeNicknameUseCase>,
    pub send_private_message: Arc<SendPrivateMessageUseCase>,
    pub send_room_message: Arc<SendRoomMessageUseCase>,
}

pub struct RoomEventLoop {
    usecases: RoomUseCases,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomEventLoop {
    pub fn new(usecases: RoomUseCases, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            usecases,
            message_pusher,
        }
    }

    /// Start draining commands on a new task
    pub fn spawn(self) -> (CommandSender, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.run(rx));
        (tx, handle)
    }

    /// Run until every sender has been dropped
    pub async fn run(self, mut commands: mpsc::UnboundedReceiver<RoomCommand>) {
        while let Some(command) = commands.recv().await {
            self.dispatch(command).await;
        }
        tracing::debug!("Room event loop stopped");
    }

    pub async fn dispatch(&self, command: RoomCommand) {
        let RoomCommand {
            connection_id: id,
            event,
        } = command;
        let usecases = &self.usecases;

        match event {
            RoomEvent::Inbound(ClientEvent::Join { nick }) => {
                match usecases.join.execute(id.clone(), &nick).await {
                    Ok(_) => {}
                    Err(JoinError::RoomFull) => {
                        tracing::info!("Rejected '{}': room is full", id)
                    }
                    Err(e) => tracing::warn!("Join from '{}' failed: {}", id, e),
                }
            }
            RoomEvent::Inbound(ClientEvent::Quit { message }) => {
                usecases.quit.execute(&id, message).await;
            }
            RoomEvent::Inbound(ClientEvent::Whois { nick }) => {
                usecases.whois.execute(&id, &nick).await;
            }
            RoomEvent::Inbound(ClientEvent::Nick { nick }) => {
                if let Err(e) = usecases.change_nickname.execute(&id, &nick).await {
                    tracing::debug!("Rename from '{}' rejected: {}", id, e);
                }
            }
            RoomEvent::Inbound(ClientEvent::Pvt { to, message }) => {
                if let Err(e) = usecases
                    .send_private_message
                    .execute(&id, &to, &message)
                    .await
                {
                    tracing::debug!("pvt from '{}' rejected: {}", id, e);
                }
            }
            RoomEvent::Inbound(ClientEvent::ChatMsg { nick, message }) => {
                self.send_room_message(&id, &nick, &message, MessageStyle::Say)
                    .await
            }
            RoomEvent::Inbound(ClientEvent::ChatAction { nick, message }) => {
                self.send_room_message(&id, &nick, &message, MessageStyle::Action)
                    .await
            }
            RoomEvent::Malformed => {
                if let Err(e) = self
                    .message_pusher
                    .push_to(&id, &Notice::malformed_event())
                    .await
                {
                    tracing::warn!("Failed to push notice to '{}': {}", id, e);
                }
            }
            RoomEvent::Disconnected => match usecases.disconnect.execute(&id).await {
                Ok(_) => {}
                Err(DisconnectError::RoomAtCapacity) => {
                    tracing::warn!("Disconnect of '{}' ignored while room is full", id)
                }
                Err(DisconnectError::ParticipantNotFound(_)) => {
                    tracing::debug!("Connection '{}' closed without joining", id)
                }
            },
        }
    }

    async fn send_room_message(
        &self,
        id: &ConnectionId,
        nick: &str,
        message: &str,
        style: MessageStyle,
    ) {
        if let Err(e) = self
            .usecases
            .send_room_message
            .execute(id, nick, message, style)
            .await
        {
            tracing::debug!("Message from '{}' rejected: {}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            GuestNumberSource, Nickname, RoomRepository,
            guest_name::testing::ScriptedGuestNumberSource,
        },
        usecase::testing::{
            Delivery, RecordingMessagePusher, conn, create_test_repository, fixed_clock,
        },
    };

    fn create_event_loop(
        capacity: usize,
    ) -> (
        RoomEventLoop,
        Arc<dyn RoomRepository>,
        Arc<RecordingMessagePusher>,
    ) {
        let repository: Arc<dyn RoomRepository> = create_test_repository(capacity);
        let pusher = Arc::new(RecordingMessagePusher::default());
        let guest_numbers: Arc<dyn GuestNumberSource> =
            Arc::new(ScriptedGuestNumberSource::new([7]));
        let usecases = RoomUseCases {
            join: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                pusher.clone(),
                guest_numbers,
                fixed_clock(),
            )),
            quit: Arc::new(QuitRoomUseCase::new(repository.clone(), pusher.clone())),
            whois: Arc::new(WhoisUseCase::new(repository.clone(), pusher.clone())),
            disconnect: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                pusher.clone(),
            )),
            change_nickname: Arc::new(ChangeNicknameUseCase::new(
                repository.clone(),
                pusher.clone(),
            )),
            send_private_message: Arc::new(SendPrivateMessageUseCase::new(
                repository.clone(),
                pusher.clone(),
            )),
            send_room_message: Arc::new(SendRoomMessageUseCase::new(
                repository.clone(),
                pusher.clone(),
                false,
            )),
        };
        (
            RoomEventLoop::new(usecases, pusher.clone()),
            repository,
            pusher,
        )
    }

    fn join(id: &str, nick: &str) -> RoomCommand {
        RoomCommand::new(
            conn(id),
            RoomEvent::Inbound(ClientEvent::Join {
                nick: nick.to_string(),
            }),
        )
    }

    #[tokio::test]
    async fn test_malformed_event_notifies_sender_only() {
        // テスト項目: 解釈できないフレームは送信者にだけエラー通知される
        // given (前提条件):
        let (event_loop, _repository, pusher) = create_event_loop(10);

        // when (操作):
        event_loop
            .dispatch(RoomCommand::new(conn("a"), RoomEvent::Malformed))
            .await;

        // then (期待する結果):
        assert_eq!(
            pusher.deliveries(),
            vec![Delivery::To(conn("a"), Notice::malformed_event())]
        );
    }

    #[tokio::test]
    async fn test_quit_then_disconnect_reports_reason() {
        // テスト項目: bob が quit("brb") してから切断すると理由付きで通知される
        // given (前提条件):
        let (event_loop, repository, pusher) = create_event_loop(10);
        event_loop.dispatch(join("a", "alice")).await;
        event_loop.dispatch(join("b", "bob")).await;
        pusher.clear();

        // when (操作):
        event_loop
            .dispatch(RoomCommand::new(
                conn("b"),
                RoomEvent::Inbound(ClientEvent::Quit {
                    message: "brb".to_string(),
                }),
            ))
            .await;
        event_loop
            .dispatch(RoomCommand::new(conn("b"), RoomEvent::Disconnected))
            .await;

        // then (期待する結果):
        let deliveries = pusher.deliveries();
        assert_eq!(
            deliveries[0],
            Delivery::To(conn("b"), Notice::disconnected(Some("brb")))
        );
        assert_eq!(deliveries[1], Delivery::Terminate(conn("b")));
        assert!(deliveries.contains(&Delivery::Broadcast(
            vec![conn("a")],
            Notice::departed(&Nickname::new("bob").unwrap(), Some("brb"))
        )));
        assert_eq!(repository.get_roster().await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_second_quit_does_not_replace_first_reason() {
        // テスト項目: 切断の前に別の接続が quit しても、先に quit した接続の理由が使われる
        // given (前提条件):
        let (event_loop, repository, pusher) = create_event_loop(10);
        event_loop.dispatch(join("a", "alice")).await;
        event_loop.dispatch(join("b", "bob")).await;
        event_loop.dispatch(join("c", "carol")).await;
        pusher.clear();

        // when (操作):
        for (id, reason) in [("b", "brb"), ("c", "bye")] {
            event_loop
                .dispatch(RoomCommand::new(
                    conn(id),
                    RoomEvent::Inbound(ClientEvent::Quit {
                        message: reason.to_string(),
                    }),
                ))
                .await;
        }
        pusher.clear();
        event_loop
            .dispatch(RoomCommand::new(conn("b"), RoomEvent::Disconnected))
            .await;

        // then (期待する結果):
        assert_eq!(
            pusher.deliveries()[0],
            Delivery::Broadcast(
                vec![conn("a"), conn("c")],
                Notice::departed(&Nickname::new("bob").unwrap(), Some("brb"))
            )
        );
        assert_eq!(repository.get_roster().await, vec!["alice", "carol"]);
    }

    #[tokio::test]
    async fn test_spawned_loop_processes_commands_in_order() {
        // テスト項目: チャンネル経由のコマンドが送信順に処理される
        // given (前提条件):
        let (event_loop, repository, _pusher) = create_event_loop(10);
        let (commands, handle) = event_loop.spawn();

        // when (操作):
        commands.send(join("a", "alice")).unwrap();
        commands.send(join("b", "alice")).unwrap();
        commands
            .send(RoomCommand::new(
                conn("a"),
                RoomEvent::Inbound(ClientEvent::Nick {
                    nick: "ally".to_string(),
                }),
            ))
            .unwrap();
        drop(commands);
        handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(repository.get_roster().await, vec!["ally", "Guest7"]);
    }
}
