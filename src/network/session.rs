use async_trait::async_trait;

use super::packet::{Data, Interest};
use super::NetworkResult;

/// A live connection to the content network, owned by one run.
#[mockall::automock]
#[async_trait]
pub trait ContentSession: Send {
    /// Sends `interest` once and waits for the Data that satisfies it.
    async fn express_interest(&mut self, interest: &Interest) -> NetworkResult<Data>;

    async fn close(&mut self) -> NetworkResult<()>;
}

/// Opens sessions on demand. Failing to open one is not fatal to a run.
#[mockall::automock]
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn open(&self) -> NetworkResult<Box<dyn ContentSession>>;
}
