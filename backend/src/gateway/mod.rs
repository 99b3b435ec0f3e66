//! Realtime session gateway: room membership, the wire protocol, the
//! silent-drop policy, and the per-connection socket loop.

pub mod policy;
pub mod protocol;
pub mod rooms;
pub mod socket;
