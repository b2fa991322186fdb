//! Write-through writer
//!
//! Stores hand serialized snapshots to a background task and return
//! immediately. The task applies writes in submission order; failures are
//! logged and dropped.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::traits::KeyValueStore;

#[derive(Debug)]
enum WriteOp {
    Set { key: String, value: Vec<u8> },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer. Cloning shares the same task.
#[derive(Clone)]
pub struct WriteThrough {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl WriteThrough {
    /// Spawn the writer task on the current tokio runtime
    pub fn spawn(kv: Arc<dyn KeyValueStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteOp>();

        tokio::spawn(async move {
            while let Some(op) = rx.recv().await {
                match op {
                    WriteOp::Set { key, value } => {
                        if let Err(e) = kv.set(&key, value).await {
                            log::error!("Failed to persist {}: {}", key, e);
                        }
                    }
                    WriteOp::Remove { key } => {
                        if let Err(e) = kv.remove(&key).await {
                            log::error!("Failed to remove {}: {}", key, e);
                        }
                    }
                    WriteOp::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            log::debug!("Write-through channel closed");
        });

        Self { tx }
    }

    /// Queue a write; does not wait for it to land
    pub fn submit(&self, key: &str, value: Vec<u8>) {
        self.send(WriteOp::Set {
            key: key.to_string(),
            value,
        });
    }

    /// Queue a delete; does not wait for it to land
    pub fn submit_remove(&self, key: &str) {
        self.send(WriteOp::Remove {
            key: key.to_string(),
        });
    }

    /// Wait until every write queued before this call has been applied
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.send(WriteOp::Flush(ack));
        let _ = done.await;
    }

    fn send(&self, op: WriteOp) {
        if self.tx.send(op).is_err() {
            log::warn!("Write-through task is gone; dropping write");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, DomainResult};
    use crate::repository::MemoryKvStore;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> DomainResult<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: Vec<u8>) -> DomainResult<()> {
            Err(DomainError::Storage("disk full".to_string()))
        }

        async fn remove(&self, _key: &str) -> DomainResult<()> {
            Err(DomainError::Storage("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_last_write_wins_in_order() {
        let kv = Arc::new(MemoryKvStore::new());
        let writer = WriteThrough::spawn(kv.clone());

        for i in 0..50u8 {
            writer.submit("k", vec![i]);
        }
        writer.flush().await;

        assert_eq!(kv.get("k").await.unwrap(), Some(vec![49]));
    }

    #[tokio::test]
    async fn test_remove() {
        let kv = Arc::new(MemoryKvStore::new());
        let writer = WriteThrough::spawn(kv.clone());

        writer.submit("k", b"v".to_vec());
        writer.submit_remove("k");
        writer.flush().await;

        assert!(kv.is_empty().await);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let writer = WriteThrough::spawn(Arc::new(FailingStore));
        writer.submit("k", b"v".to_vec());
        writer.submit_remove("k");
        // Task survives the failed writes and still answers the barrier
        writer.flush().await;
    }
}
