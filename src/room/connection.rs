//! Live client connections.
//!
//! The transport layer wraps each socket in a [`Connection`]; the room only
//! needs to push [`Notice`]s through it. A failed send is never an error for
//! the room: the connection is dropped from its player's set.

use std::sync::mpsc::{self, Receiver, Sender};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one attached connection within a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Connection({})", self.0)
    }
}

/// Messages pushed to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notice {
    /// Someone nudged the player to move. Serializes as `{"ping": name}`.
    Ping { ping: String },
    /// Room state changed; clients refetch. Serializes as `{}`.
    StateChanged {},
}

impl Notice {
    #[must_use]
    pub fn ping(from: impl Into<String>) -> Self {
        Notice::Ping { ping: from.into() }
    }
}

/// Why a notice could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection closed")]
    Closed,

    #[error("send failed: {0}")]
    Send(String),
}

/// A push channel to one client.
pub trait Connection: Send + Sync {
    /// Deliver a notice. Errors mark the connection as dead.
    fn send(&self, notice: &Notice) -> Result<(), ConnectionError>;
}

/// In-process connection backed by an `mpsc` channel.
///
/// Sending fails with `Closed` once the receiving side is dropped.
///
/// ```
/// use drunkala::room::{ChannelConnection, Connection, Notice};
///
/// let (conn, rx) = ChannelConnection::new();
/// conn.send(&Notice::StateChanged {}).unwrap();
/// assert_eq!(rx.try_recv().unwrap(), Notice::StateChanged {});
///
/// drop(rx);
/// assert!(conn.send(&Notice::StateChanged {}).is_err());
/// ```
#[derive(Debug)]
pub struct ChannelConnection {
    tx: Mutex<Sender<Notice>>,
}

impl ChannelConnection {
    #[must_use]
    pub fn new() -> (Self, Receiver<Notice>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: Mutex::new(tx) }, rx)
    }
}

impl Connection for ChannelConnection {
    fn send(&self, notice: &Notice) -> Result<(), ConnectionError> {
        self.tx
            .lock()
            .send(notice.clone())
            .map_err(|_| ConnectionError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_wire_format() {
        assert_eq!(serde_json::to_string(&Notice::StateChanged {}).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&Notice::ping("ann")).unwrap(),
            r#"{"ping":"ann"}"#
        );
    }

    #[test]
    fn test_channel_connection_closes() {
        let (conn, rx) = ChannelConnection::new();
        assert!(conn.send(&Notice::ping("bob")).is_ok());
        assert_eq!(rx.recv().unwrap(), Notice::ping("bob"));

        drop(rx);
        assert_eq!(conn.send(&Notice::StateChanged {}), Err(ConnectionError::Closed));
    }
}
