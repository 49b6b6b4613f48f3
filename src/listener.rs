//! Listener spawns and manages the receive and decode tasks
//!
//! Two tasks share a bounded queue:
//!
//! - the producer awaits datagrams from a [`DatagramSource`] and queues them
//!   as they arrive, waiting when the queue is full;
//! - the consumer takes datagrams in arrival order, decodes each one and hands
//!   the packet to a [`Consumer`].
//!
//! A datagram that fails to decode is logged and discarded; it never stops the
//! listener. [`ListenerHandle::stop`] discards whatever is still queued without
//! decoding it. When the source ends by itself, queued datagrams are delivered
//! first. Either way [`Consumer::cleanup`] runs exactly once.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::consumer::Consumer;
use crate::protocol::Packet;
use crate::source::DatagramSource;
use crate::{Result, TelemetryError};

/// Consecutive source failures tolerated before the producer gives up.
const MAX_SOURCE_ERRORS: u32 = 10;

/// Counters reported when a listener finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    /// Datagrams received from the source
    pub received: u64,
    /// Datagrams decoded and handed to the consumer
    pub decoded: u64,
    /// Datagrams that failed to decode
    pub rejected: u64,
    /// Datagrams received but dropped without decoding at stop
    pub discarded: u64,
    /// Packets the consumer returned an error for
    pub consumer_errors: u64,
    /// Failed receive attempts
    pub source_errors: u64,
}

#[derive(Debug, Default)]
struct ProducerStats {
    received: u64,
    /// Received but never queued because the listener stopped first
    discarded: u64,
    source_errors: u64,
}

/// Handle to a running listener.
#[derive(Debug)]
pub struct ListenerHandle {
    cancel: CancellationToken,
    task: JoinHandle<ListenerStats>,
}

impl ListenerHandle {
    /// Ask the listener to stop. Queued datagrams are discarded.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// `false` once both tasks have finished and the consumer has been cleaned up.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Token that stops the listener when cancelled. It is also cancelled once
    /// the listener finishes on its own.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the listener to finish.
    pub async fn join(self) -> Result<ListenerStats> {
        self.task
            .await
            .map_err(|e| TelemetryError::listener_failed_with_source("listener task failed", Box::new(e)))
    }

    /// Stop and wait for cleanup to finish.
    pub async fn shutdown(self) -> Result<ListenerStats> {
        self.stop();
        self.join().await
    }
}

/// Listener spawns the producer and consumer tasks.
pub struct Listener;

impl Listener {
    /// Start receiving from `source` and delivering to `consumer`.
    ///
    /// `queue_capacity` bounds how many datagrams may wait between the tasks.
    /// Must be called from within a tokio runtime.
    pub fn spawn<S, C>(source: S, consumer: C, queue_capacity: usize) -> ListenerHandle
    where
        S: DatagramSource,
        C: Consumer,
    {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let cancel = CancellationToken::new();

        info!("Listener starting on {}", source.describe());

        let producer = tokio::spawn(Self::producer_task(source, tx, cancel.clone()));
        let cancel_consumer = cancel.clone();
        let task = tokio::spawn(async move {
            let mut stats = Self::consumer_task(consumer, rx, cancel_consumer.clone()).await;
            match producer.await {
                Ok(produced) => {
                    stats.received = produced.received;
                    stats.discarded += produced.discarded;
                    stats.source_errors = produced.source_errors;
                }
                Err(e) => error!("Producer task failed: {}", e),
            }
            info!(
                "Listener stopped: {} received, {} decoded, {} rejected, {} discarded",
                stats.received, stats.decoded, stats.rejected, stats.discarded
            );
            // the token also tells holders the listener has finished
            cancel_consumer.cancel();
            stats
        });

        ListenerHandle { cancel, task }
    }

    /// Producer task - receives datagrams and queues them
    async fn producer_task<S>(
        mut source: S,
        tx: mpsc::Sender<Vec<u8>>,
        cancel: CancellationToken,
    ) -> ProducerStats
    where
        S: DatagramSource,
    {
        debug!("Producer task started");
        let mut stats = ProducerStats::default();
        let mut error_count = 0u32;

        loop {
            // Use select to allow cancellation while waiting on the source
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Producer cancelled during receive");
                    break;
                }
                result = source.next_datagram() => result,
            };

            match result {
                Ok(Some(datagram)) => {
                    stats.received += 1;
                    error_count = 0;
                    trace!("Datagram {}: {} bytes", stats.received, datagram.len());

                    let sent = tokio::select! {
                        _ = cancel.cancelled() => {
                            stats.discarded += 1;
                            break;
                        }
                        sent = tx.send(datagram) => sent,
                    };
                    if sent.is_err() {
                        stats.discarded += 1;
                        debug!("Datagram queue closed, shutting down producer");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Source ended after {} datagrams", stats.received);
                    break;
                }
                Err(e) => {
                    // Source error - don't stop on transient failures
                    stats.source_errors += 1;
                    error_count += 1;
                    error!("Source error ({}/{}): {}", error_count, MAX_SOURCE_ERRORS, e);

                    if error_count >= MAX_SOURCE_ERRORS {
                        error!("Too many source errors, shutting down");
                        break;
                    }

                    // Exponential backoff: 100ms, 200ms, 400ms, ...
                    let backoff = Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }

        debug!("Producer task ended");
        stats
    }

    /// Consumer task - decodes queued datagrams in order
    async fn consumer_task<C>(
        mut consumer: C,
        mut rx: mpsc::Receiver<Vec<u8>>,
        cancel: CancellationToken,
    ) -> ListenerStats
    where
        C: Consumer,
    {
        debug!("Consumer task started");
        let mut stats = ListenerStats::default();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    rx.close();
                    while rx.try_recv().is_ok() {
                        stats.discarded += 1;
                    }
                    debug!("Consumer cancelled, discarded {} queued datagrams", stats.discarded);
                    break;
                }
                next = rx.recv() => next,
            };

            // Producer finished and the queue is drained
            let Some(datagram) = next else {
                break;
            };

            match Packet::decode(&datagram) {
                Ok(packet) => {
                    stats.decoded += 1;
                    trace!("Decoded {} packet", packet.id());
                    if let Err(e) = consumer.consume(packet) {
                        stats.consumer_errors += 1;
                        warn!("Consumer failed on packet: {}", e);
                    }
                }
                Err(e) => {
                    stats.rejected += 1;
                    warn!("Discarding {} byte datagram: {}", datagram.len(), e);
                }
            }
        }

        if let Err(e) = consumer.cleanup() {
            error!("Consumer cleanup failed: {}", e);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PacketId;
    use crate::sources::MemorySource;
    use crate::test_utils::{all_fixtures, lap_data_fixture};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        kinds: Arc<Mutex<Vec<PacketId>>>,
        cleanups: Arc<Mutex<u32>>,
    }

    impl Consumer for Recorder {
        fn consume(&mut self, packet: Packet) -> Result<()> {
            self.kinds.lock().expect("lock").push(packet.id());
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            *self.cleanups.lock().expect("lock") += 1;
            Ok(())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl DatagramSource for FailingSource {
        async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>> {
            Err(TelemetryError::listener_failed("socket gone"))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[tokio::test]
    async fn delivers_in_order_then_cleans_up_once() -> Result<()> {
        let recorder = Recorder::default();
        let fixtures = all_fixtures();
        let expected: Vec<PacketId> = fixtures.iter().map(|(id, _)| *id).collect();
        let source = MemorySource::new(fixtures.into_iter().map(|(_, data)| data));

        let stats = Listener::spawn(source, recorder.clone(), 2).join().await?;

        assert_eq!(*recorder.kinds.lock().expect("lock"), expected);
        assert_eq!(*recorder.cleanups.lock().expect("lock"), 1);
        assert_eq!(stats.received, 12);
        assert_eq!(stats.decoded, 12);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_datagrams_are_skipped() -> Result<()> {
        let recorder = Recorder::default();
        let mut unknown = lap_data_fixture();
        unknown[5] = 42;
        let datagrams = vec![vec![0; 3], unknown, lap_data_fixture()[..100].to_vec(), lap_data_fixture()];

        let stats = Listener::spawn(MemorySource::new(datagrams), recorder.clone(), 8).join().await?;

        assert_eq!(*recorder.kinds.lock().expect("lock"), vec![PacketId::LapData]);
        assert_eq!((stats.decoded, stats.rejected), (1, 3));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_source_errors_stop_the_producer() -> Result<()> {
        let recorder = Recorder::default();
        let stats = Listener::spawn(FailingSource, recorder.clone(), 8).join().await?;
        assert_eq!(stats.source_errors, u64::from(MAX_SOURCE_ERRORS));
        assert_eq!(*recorder.cleanups.lock().expect("lock"), 1);
        Ok(())
    }

    /// Stops the listener from inside the receive, so the datagram it returns
    /// meets a cancelled token.
    struct StoppingSource {
        cancel: CancellationToken,
    }

    #[async_trait::async_trait]
    impl DatagramSource for StoppingSource {
        async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>> {
            self.cancel.cancel();
            Ok(Some(lap_data_fixture()))
        }

        fn describe(&self) -> String {
            "stopping".to_string()
        }
    }

    #[tokio::test]
    async fn datagram_dropped_while_queueing_counts_as_discarded() {
        let cancel = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel(1);
        tx.try_send(vec![0; 3]).expect("queue has room");

        let source = StoppingSource { cancel: cancel.clone() };
        let stats = Listener::producer_task(source, tx, cancel).await;

        assert_eq!((stats.received, stats.discarded), (1, 1));
        assert_eq!(rx.recv().await, Some(vec![0; 3]));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn every_received_datagram_is_accounted_for_at_stop() -> Result<()> {
        let recorder = Recorder::default();
        let datagrams = std::iter::repeat_with(lap_data_fixture).take(64);
        let handle = Listener::spawn(MemorySource::new(datagrams).hold_open(), recorder.clone(), 1);
        tokio::task::yield_now().await;

        let stats = handle.shutdown().await?;
        assert_eq!(stats.received, stats.decoded + stats.rejected + stats.discarded);
        Ok(())
    }

    #[tokio::test]
    async fn stop_ends_a_quiet_listener() -> Result<()> {
        let recorder = Recorder::default();
        let handle = Listener::spawn(MemorySource::new(Vec::new()).hold_open(), recorder.clone(), 8);
        assert!(handle.is_running());

        let stats = handle.shutdown().await?;
        assert_eq!(stats.decoded, 0);
        assert_eq!(*recorder.cleanups.lock().expect("lock"), 1);
        Ok(())
    }
}
