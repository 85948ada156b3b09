//! In-process duplex pair.
//!
//! Both ends implement [`Duplex`], so endpoint code can run against one end while a
//! test (or an in-process client) drives the other through the same traits. Channels
//! are bounded, which lets a peer that stops reading stall the writer exactly like a
//! slow network peer would.
//!
//! Each direction also keeps a write log: send timestamps plus a count of sends
//! that started while another send on the same direction was still in progress.
//! A non-zero count means two writers were active on one stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::streaming::{
    error::{StreamError, StreamResult},
    traits::{Duplex, Frame, FrameSink, FrameSource},
};

/// Default per-direction queue depth used by [`MemoryDuplex::pair`].
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct WriteLog {
    active: AtomicUsize,
    overlaps: AtomicUsize,
    sent_at: Mutex<Vec<Instant>>,
}

/// Decrements the active-writer count even if the send future is dropped.
struct ActiveWrite<'a>(&'a WriteLog);

impl<'a> ActiveWrite<'a> {
    fn enter(log: &'a WriteLog) -> Self {
        if log.active.fetch_add(1, Ordering::SeqCst) > 0 {
            log.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        Self(log)
    }
}

impl Drop for ActiveWrite<'_> {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Read-only view of one direction's write log.
#[derive(Debug, Clone)]
pub struct WriteProbe {
    log: Arc<WriteLog>,
}

impl WriteProbe {
    /// Number of sends that completed.
    pub fn writes(&self) -> usize {
        self.log.sent_at.lock().len()
    }

    /// Completion time of every send, in order.
    pub fn write_times(&self) -> Vec<Instant> {
        self.log.sent_at.lock().clone()
    }

    /// Number of sends that began while another send was in progress.
    pub fn overlapping_writes(&self) -> usize {
        self.log.overlaps.load(Ordering::SeqCst)
    }
}

/// Send half of a [`MemoryDuplex`].
///
/// Cloning is allowed so that tests can deliberately break the single-writer rule
/// and observe it through [`WriteProbe::overlapping_writes`].
#[derive(Debug, Clone)]
pub struct MemorySink {
    tx: mpsc::Sender<Frame>,
    log: Arc<WriteLog>,
}

/// Receive half of a [`MemoryDuplex`].
#[derive(Debug)]
pub struct MemorySource {
    rx: mpsc::Receiver<Frame>,
}

/// One end of an in-process duplex stream.
#[derive(Debug)]
pub struct MemoryDuplex {
    sink: MemorySink,
    source: MemorySource,
}

impl MemoryDuplex {
    /// Two connected ends with [`DEFAULT_CAPACITY`] queued frames per direction.
    pub fn pair() -> (Self, Self) {
        Self::pair_with_capacity(DEFAULT_CAPACITY)
    }

    /// Two connected ends. A direction holding `capacity` unread frames makes the
    /// next send wait.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn pair_with_capacity(capacity: usize) -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::channel(capacity);
        let (b_tx, a_rx) = mpsc::channel(capacity);

        let a = Self {
            sink: MemorySink {
                tx: a_tx,
                log: Arc::default(),
            },
            source: MemorySource { rx: a_rx },
        };
        let b = Self {
            sink: MemorySink {
                tx: b_tx,
                log: Arc::default(),
            },
            source: MemorySource { rx: b_rx },
        };
        (a, b)
    }

    /// Probe for the frames this end sends.
    pub fn probe(&self) -> WriteProbe {
        self.sink.probe()
    }
}

impl MemorySink {
    /// Probe for the frames this sink sends.
    pub fn probe(&self) -> WriteProbe {
        WriteProbe {
            log: Arc::clone(&self.log),
        }
    }
}

impl Duplex for MemoryDuplex {
    type Sink = MemorySink;
    type Source = MemorySource;

    fn split(self) -> (Self::Sink, Self::Source) {
        (self.sink, self.source)
    }
}

impl FrameSink for MemorySink {
    async fn send(&mut self, frame: Frame) -> StreamResult<()> {
        let _active = ActiveWrite::enter(&self.log);
        // Give a concurrent writer the chance to interleave.
        tokio::task::yield_now().await;

        self.tx.send(frame).await.map_err(|_| StreamError::Closed)?;
        self.log.sent_at.lock().push(Instant::now());
        Ok(())
    }
}

impl FrameSource for MemorySource {
    async fn recv(&mut self) -> StreamResult<Frame> {
        match self.rx.recv().await {
            Some(Frame::Close(signal)) => Err(StreamError::PeerClosed {
                code: Some(signal.code),
            }),
            Some(frame) => Ok(frame),
            None => Err(StreamError::PeerClosed { code: None }),
        }
    }
}
