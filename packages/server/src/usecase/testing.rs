//! Test doubles shared by the use case tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use irori_shared::time::FixedClock;
use tokio::sync::Mutex as AsyncMutex;

use crate::{
    domain::{
        ConnectionId, GuestNumberSource, MessagePushError, MessagePusher, Notice,
        PusherChannel, Room, RoomRepository, Timestamp,
    },
    infrastructure::repository::InMemoryRoomRepository,
};

/// One observed side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    To(ConnectionId, Notice),
    Broadcast(Vec<ConnectionId>, Notice),
    Terminate(ConnectionId),
}

/// Records every push instead of sending it
#[derive(Default)]
pub struct RecordingMessagePusher {
    deliveries: Mutex<Vec<Delivery>>,
    unregistered: Mutex<Vec<ConnectionId>>,
}

impl RecordingMessagePusher {
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn unregistered(&self) -> Vec<ConnectionId> {
        self.unregistered.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut deliveries) = self.deliveries.lock() {
            deliveries.clear();
        }
    }

    fn record(&self, delivery: Delivery) {
        if let Ok(mut deliveries) = self.deliveries.lock() {
            deliveries.push(delivery);
        }
    }
}

#[async_trait]
impl MessagePusher for RecordingMessagePusher {
    async fn register_client(&self, _connection_id: ConnectionId, _sender: PusherChannel) {}

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        if let Ok(mut unregistered) = self.unregistered.lock() {
            unregistered.push(connection_id.clone());
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notice: &Notice,
    ) -> Result<(), MessagePushError> {
        self.record(Delivery::To(connection_id.clone(), notice.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notice: &Notice,
    ) -> Result<(), MessagePushError> {
        self.record(Delivery::Broadcast(targets, notice.clone()));
        Ok(())
    }

    async fn terminate(&self, connection_id: &ConnectionId) -> Result<(), MessagePushError> {
        self.record(Delivery::Terminate(connection_id.clone()));
        Ok(())
    }
}

pub fn conn(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(1672498800000))
}

pub fn create_test_repository(capacity: usize) -> Arc<InMemoryRoomRepository> {
    let room = Arc::new(AsyncMutex::new(Room::with_capacity(
        Timestamp::new(0),
        capacity,
    )));
    Arc::new(InMemoryRoomRepository::new(room))
}

/// Seat participants directly through the repository, bypassing notices
pub async fn seat(repository: &dyn RoomRepository, members: &[(&str, &str)]) {
    struct NoGuests;
    impl GuestNumberSource for NoGuests {
        fn draw(&self, _upper: usize) -> usize {
            1
        }
    }
    for (id, nickname) in members {
        repository
            .admit_participant(conn(id), nickname, &NoGuests, Timestamp::new(0))
            .await
            .unwrap();
    }
}

/// Quit reason still pending for `id`, read from a room snapshot
pub async fn pending_quit_reason(repository: &dyn RoomRepository, id: &str) -> Option<String> {
    let mut room = repository.get_room().await.unwrap();
    room.take_quit_reason(&conn(id))
}
