//! In-memory source for recorded datagrams

use std::collections::VecDeque;

use tokio::time::{Duration, Interval, MissedTickBehavior, interval};
use tracing::debug;

use crate::Result;
use crate::source::DatagramSource;

/// Replays a fixed list of datagrams.
///
/// By default the source ends once every datagram has been handed out, which
/// lets the listener drain and finish on its own. [`MemorySource::hold_open`]
/// keeps it pending instead, the way a quiet socket would.
#[derive(Debug)]
pub struct MemorySource {
    datagrams: VecDeque<Vec<u8>>,
    pacing: Option<Interval>,
    hold_open: bool,
    delivered: usize,
}

impl MemorySource {
    pub fn new<I>(datagrams: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self { datagrams: datagrams.into_iter().collect(), pacing: None, hold_open: false, delivered: 0 }
    }

    /// Deliver at most one datagram per `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_pacing(mut self, period: Duration) -> Self {
        let mut pacing = interval(period);
        pacing.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.pacing = Some(pacing);
        self
    }

    /// Stay pending after the last datagram instead of ending.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.datagrams.len()
    }
}

#[async_trait::async_trait]
impl DatagramSource for MemorySource {
    async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(datagram) = self.datagrams.pop_front() else {
            if self.hold_open {
                std::future::pending::<()>().await;
            }
            debug!("Memory source exhausted after {} datagrams", self.delivered);
            return Ok(None);
        };
        if let Some(pacing) = self.pacing.as_mut() {
            pacing.tick().await;
        }
        self.delivered += 1;
        Ok(Some(datagram))
    }

    fn describe(&self) -> String {
        format!("memory ({} datagrams)", self.datagrams.len() + self.delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hands_out_datagrams_then_ends() -> Result<()> {
        let mut source = MemorySource::new(vec![vec![1], vec![2, 2]]);
        assert_eq!(source.describe(), "memory (2 datagrams)");
        assert_eq!(source.next_datagram().await?, Some(vec![1]));
        assert_eq!(source.next_datagram().await?, Some(vec![2, 2]));
        assert_eq!(source.next_datagram().await?, None);
        assert_eq!(source.remaining(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn held_open_source_stays_pending() {
        let mut source = MemorySource::new(Vec::new()).hold_open();
        let next = tokio::time::timeout(Duration::from_millis(20), source.next_datagram()).await;
        assert!(next.is_err(), "expected the source to still be waiting");
    }
}
