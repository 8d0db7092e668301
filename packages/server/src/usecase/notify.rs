//! Fire-and-forget helpers shared by the use cases.
//!
//! Push failures are logged and never abort the operation.

use crate::domain::{ConnectionId, MessagePusher, Notice, RoomRepository};

pub(super) async fn push_or_warn(
    pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    notice: &Notice,
) {
    if let Err(e) = pusher.push_to(connection_id, notice).await {
        tracing::warn!("Failed to push notice to '{}': {}", connection_id, e);
    }
}

/// Send `notice` to every participant currently in the room
pub(super) async fn broadcast_to_room(
    repository: &dyn RoomRepository,
    pusher: &dyn MessagePusher,
    notice: &Notice,
) {
    let targets = repository.get_all_connection_ids().await;
    if let Err(e) = pusher.broadcast(targets, notice).await {
        tracing::warn!("Failed to broadcast notice: {}", e);
    }
}

/// Send the current roster to every participant
pub(super) async fn broadcast_roster(repository: &dyn RoomRepository, pusher: &dyn MessagePusher) {
    let roster = repository.get_roster().await;
    broadcast_to_room(repository, pusher, &Notice::users(roster)).await;
}

pub(super) async fn terminate_or_warn(pusher: &dyn MessagePusher, connection_id: &ConnectionId) {
    if let Err(e) = pusher.terminate(connection_id).await {
        tracing::warn!("Failed to terminate connection '{}': {}", connection_id, e);
    }
}
