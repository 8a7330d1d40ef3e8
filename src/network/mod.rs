//! # Network
//!
//! Minimal Named Data Networking client: enough to express one Interest at a
//! time through a local forwarder and wait for the matching Data.
//!
//! * [`name`]: NDN names and their URI form
//! * [`tlv`]: TLV primitives of packet format v0.3
//! * [`packet`]: Interest, Data and NDNLPv2 Nack
//! * [`face`]: stream connection to the forwarder
//! * [`session`]: the traits the resolver and runtime program against

pub mod face;
pub mod name;
pub mod packet;
pub mod session;
pub mod tlv;

use std::time::Duration;

use thiserror::Error;

pub use face::{Face, FaceAddress, FaceConnector};
pub use name::Name;
pub use packet::{Data, Interest, Packet};
pub use session::{ContentSession, SessionConnector};

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("invalid face address `{0}`")]
    InvalidAddress(String),
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connecting to {address} timed out after {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },
    #[error("malformed NDN name `{0}`")]
    MalformedName(String),
    #[error("interest {name} timed out after {lifetime:?}")]
    Timeout { name: String, lifetime: Duration },
    #[error("interest {name} was nacked (reason {reason:?})")]
    Nack { name: String, reason: Option<u64> },
    #[error("malformed packet: {0}")]
    Decode(String),
    #[error("face closed by forwarder")]
    Closed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
