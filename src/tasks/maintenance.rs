//! Cache Maintenance Task
//!
//! Background task that runs the block hash cache's persistence check once
//! per accepted block.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::BlockHashCache;

/// Queue depth for pending block notifications.
const NOTIFY_QUEUE: usize = 1024;

/// A block was accepted by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAccepted {
    /// Height of the accepted block
    pub height: u64,
}

// == Block Notifier ==
/// Sending half handed to whatever accepts blocks.
#[derive(Debug, Clone)]
pub struct BlockNotifier {
    tx: mpsc::Sender<BlockAccepted>,
}

impl BlockNotifier {
    /// Queues a maintenance check. Drops the notification when the queue is
    /// full or the task has stopped; the next one covers it.
    pub fn block_accepted(&self, height: u64) -> bool {
        match self.tx.try_send(BlockAccepted { height }) {
            Ok(()) => true,
            Err(e) => {
                debug!("Maintenance notification for block {} dropped: {}", height, e);
                false
            }
        }
    }
}

/// Creates a notifier and the receiver for [`spawn_maintenance_task`].
pub fn maintenance_channel() -> (BlockNotifier, mpsc::Receiver<BlockAccepted>) {
    let (tx, rx) = mpsc::channel(NOTIFY_QUEUE);
    (BlockNotifier { tx }, rx)
}

/// Spawns the maintenance loop.
///
/// For every received [`BlockAccepted`] the task calls
/// [`BlockHashCache::maybe_persist`] on the blocking pool, since it takes
/// the cache lock and may write to disk. The task ends once every
/// [`BlockNotifier`] has been dropped.
///
/// # Example
/// ```ignore
/// let (notifier, rx) = maintenance_channel();
/// let handle = spawn_maintenance_task(cache.clone(), rx);
/// notifier.block_accepted(1);
/// drop(notifier);
/// handle.await?;
/// ```
pub fn spawn_maintenance_task(
    cache: Arc<BlockHashCache>,
    mut rx: mpsc::Receiver<BlockAccepted>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting block cache maintenance task");

        while let Some(block) = rx.recv().await {
            let cache = cache.clone();
            let outcome = tokio::task::spawn_blocking(move || cache.maybe_persist()).await;

            match outcome {
                Ok(Ok(true)) => debug!("Maintenance after block {}: snapshot saved", block.height),
                Ok(Ok(false)) => debug!("Maintenance after block {}: nothing to do", block.height),
                Ok(Err(e)) => warn!("Maintenance after block {}: {}", block.height, e),
                Err(e) => warn!("Maintenance after block {} aborted: {}", block.height, e),
            }
        }

        info!("Block cache maintenance task stopped");
    })
}
