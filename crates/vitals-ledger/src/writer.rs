//! Async single-writer task.
//!
//! A [`LedgerWriter`] owns the ledger inside a tokio task and serves commands
//! from an mpsc queue, one at a time. Every [`LedgerHandle`] clone talks to the
//! same task, so appends from many producers are serialized without a lock.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use vitals_ledger_core::{AuditReport, Block, Payload, ValidationResult};

use crate::clock::Clock;
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;

/// Commands served by the writer task.
#[derive(Debug)]
enum Command {
    Append {
        payload: Payload,
        reply: oneshot::Sender<Result<Block>>,
    },
    Latest {
        reply: oneshot::Sender<Block>,
    },
    Len {
        reply: oneshot::Sender<usize>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<Block>>,
    },
    Verify {
        reply: oneshot::Sender<ValidationResult>,
    },
    Audit {
        reply: oneshot::Sender<AuditReport>,
    },
    Shutdown,
}

/// Owner of the writer task.
pub struct LedgerWriter;

impl LedgerWriter {
    /// Move `ledger` into a new task.
    ///
    /// The task returns the ledger when it shuts down, either on
    /// [`LedgerHandle::shutdown`] or once every handle is dropped.
    pub fn spawn<C>(ledger: Ledger<C>) -> (LedgerHandle, JoinHandle<Ledger<C>>)
    where
        C: Clock + 'static,
    {
        let depth = ledger.config().writer_queue_depth.max(1);
        let (tx, rx) = mpsc::channel(depth);
        let task = tokio::spawn(run(ledger, rx));
        (LedgerHandle { tx }, task)
    }
}

async fn run<C: Clock>(mut ledger: Ledger<C>, mut rx: mpsc::Receiver<Command>) -> Ledger<C> {
    info!(schema = %ledger.schema(), blocks = ledger.len(), "ledger writer started");

    while let Some(command) = rx.recv().await {
        match command {
            Command::Append { payload, reply } => {
                let _ = reply.send(ledger.append(payload).cloned());
            }
            Command::Latest { reply } => {
                let _ = reply.send(ledger.latest().clone());
            }
            Command::Len { reply } => {
                let _ = reply.send(ledger.len());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(ledger.snapshot());
            }
            Command::Verify { reply } => {
                let _ = reply.send(ledger.verify());
            }
            Command::Audit { reply } => {
                let _ = reply.send(ledger.audit());
            }
            Command::Shutdown => {
                debug!("shutdown requested");
                break;
            }
        }
    }

    info!(blocks = ledger.len(), "ledger writer stopped");
    ledger
}

/// Cloneable client of a [`LedgerWriter`] task.
#[derive(Debug, Clone)]
pub struct LedgerHandle {
    tx: mpsc::Sender<Command>,
}

impl LedgerHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| LedgerError::WriterClosed)?;
        rx.await.map_err(|_| LedgerError::WriterClosed)
    }

    /// Append a payload; resolves to the new block.
    pub async fn append(&self, payload: Payload) -> Result<Block> {
        self.request(|reply| Command::Append { payload, reply })
            .await?
    }

    pub async fn latest(&self) -> Result<Block> {
        self.request(|reply| Command::Latest { reply }).await
    }

    pub async fn len(&self) -> Result<usize> {
        self.request(|reply| Command::Len { reply }).await
    }

    /// Blocks as of the moment the command is served.
    pub async fn snapshot(&self) -> Result<Vec<Block>> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    pub async fn verify(&self) -> Result<ValidationResult> {
        self.request(|reply| Command::Verify { reply }).await
    }

    pub async fn audit(&self) -> Result<AuditReport> {
        self.request(|reply| Command::Audit { reply }).await
    }

    /// Ask the task to stop after the commands already queued.
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| LedgerError::WriterClosed)
    }

    /// Whether the task has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
