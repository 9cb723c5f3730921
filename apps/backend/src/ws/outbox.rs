//! Bounded per-connection outbound queue.
//!
//! The hub pushes without ever waiting. When the queue is full the oldest
//! frame is discarded, so a slow reader may skip intermediate room states
//! but always ends up with the newest one. Closing wakes the reader, which
//! drains what is left and then sees the end of the stream.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::protocol::ServerMsg;

pub const DEFAULT_OUTBOX_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Accepted,
    DroppedOldest,
    Closed,
}

struct Queue {
    items: VecDeque<ServerMsg>,
    closed: bool,
}

struct Inner {
    queue: Mutex<Queue>,
    notify: Notify,
    capacity: usize,
}

#[derive(Clone)]
pub struct Outbox {
    inner: Arc<Inner>,
}

impl Outbox {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(Queue {
                    items: VecDeque::with_capacity(capacity),
                    closed: false,
                }),
                notify: Notify::new(),
                capacity,
            }),
        }
    }

    pub fn push(&self, msg: ServerMsg) -> PushOutcome {
        let outcome = {
            let mut q = self.inner.queue.lock();
            if q.closed {
                return PushOutcome::Closed;
            }
            let outcome = if q.items.len() >= self.inner.capacity {
                q.items.pop_front();
                PushOutcome::DroppedOldest
            } else {
                PushOutcome::Accepted
            };
            q.items.push_back(msg);
            outcome
        };
        self.inner.notify.notify_one();
        outcome
    }

    pub fn close(&self) {
        self.inner.queue.lock().closed = true;
        self.inner.notify.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.queue.lock().closed
    }

    pub fn len(&self) -> usize {
        self.inner.queue.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Non-blocking pop.
    pub fn try_recv(&self) -> Option<ServerMsg> {
        self.inner.queue.lock().items.pop_front()
    }

    /// Next frame; `None` once the outbox is closed and drained.
    pub async fn recv(&self) -> Option<ServerMsg> {
        loop {
            {
                let mut q = self.inner.queue.lock();
                if let Some(msg) = q.items.pop_front() {
                    return Some(msg);
                }
                if q.closed {
                    return None;
                }
            }
            self.inner.notify.notified().await;
        }
    }

    /// Single-consumer stream view, used by the session's outbound pump.
    pub fn into_stream(self) -> impl Stream<Item = ServerMsg> {
        futures::stream::unfold(self, |outbox| async move {
            let msg = outbox.recv().await?;
            Some((msg, outbox))
        })
    }
}
