//! Rooms: shared boards, rosters and live connections.
//!
//! ## Key Components
//!
//! - [`Room`]: one game behind a read/write lock, with notification fan-out
//! - [`RoomDirectory`]: code → room registry and code generation
//! - [`Connection`]: push channel to a client; dead ones are pruned on send
//! - [`RoomSnapshot`]: serializable state returned to clients
//! - `api`: request payloads and the entry points a transport calls

pub mod api;
mod connection;
mod directory;
mod roster;
#[allow(clippy::module_inception)]
mod room;
mod snapshot;

pub use api::{
    CreateRequest, CreateResponse, JoinRequest, MoveRequest, PingRequest, RuleRequest,
    StateRequest, StreamRequest,
};
pub use connection::{ChannelConnection, Connection, ConnectionError, ConnectionId, Notice};
pub use directory::RoomDirectory;
pub use roster::{Player, Roster};
pub use room::{ActionOutcome, MoveAction, Room};
pub use snapshot::{PlayerView, RoomSnapshot};
