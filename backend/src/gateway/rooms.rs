//! Ephemeral, process-local room membership.
//!
//! Membership is mutated only by join and disconnect; broadcasts read a
//! snapshot, so the map is never iterated under modification.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::types::UserId;

/// Canonical identity of a 1:1 conversation: the unordered participant
/// pair ordered (low, high), so both sides derive the same room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId {
    low: UserId,
    high: UserId,
}

impl RoomId {
    /// `None` for a self-pair; a user has no room with themselves.
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn low(&self) -> UserId {
        self.low
    }

    pub fn high(&self) -> UserId {
        self.high
    }
}

pub type ConnId = Uuid;

/// Outbound channel to one connection's writer task.
pub type Outbound = mpsc::UnboundedSender<String>;

#[derive(Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, HashMap<ConnId, Outbound>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the connection in the room. Idempotent: re-joining
    /// replaces the existing entry, never duplicates it.
    pub async fn join(&self, room: RoomId, conn: ConnId, tx: Outbound) {
        self.rooms
            .write()
            .await
            .entry(room)
            .or_default()
            .insert(conn, tx);
    }

    /// Removes the connection from every room it joined. Called
    /// unconditionally when the socket closes, however it closes.
    pub async fn leave_all(&self, conn: ConnId) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, members| {
            members.remove(&conn);
            !members.is_empty()
        });
    }

    /// Snapshot of the room's members.
    pub async fn members(&self, room: RoomId) -> Vec<(ConnId, Outbound)> {
        self.rooms
            .read()
            .await
            .get(&room)
            .map(|members| {
                members
                    .iter()
                    .map(|(conn, tx)| (*conn, tx.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Delivers a payload to every member of the room.
    pub async fn broadcast(&self, room: RoomId, payload: &str) {
        for (_, tx) in self.members(room).await {
            // A closed receiver just means that connection is going away.
            let _ = tx.send(payload.to_string());
        }
    }

    /// Delivers a payload to every member except `skip`.
    pub async fn broadcast_except(&self, room: RoomId, skip: ConnId, payload: &str) {
        for (conn, tx) in self.members(room).await {
            if conn != skip {
                let _ = tx.send(payload.to_string());
            }
        }
    }
}
