//! Source trait for raw datagrams

use crate::Result;

/// Supplies whole datagrams to the listener.
///
/// Sources abstract over where bytes come from (a UDP socket, a recording held
/// in memory) and handle their own timing internally.
#[async_trait::async_trait]
pub trait DatagramSource: Send + 'static {
    /// Wait for the next datagram.
    ///
    /// Returns:
    /// - `Ok(Some(bytes))` - One complete datagram
    /// - `Ok(None)` - Source ended (normal termination)
    /// - `Err(e)` - Receive failed; the listener retries with backoff
    async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>>;

    /// Short description for log lines, such as the bound address.
    fn describe(&self) -> String;
}
