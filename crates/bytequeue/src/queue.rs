//! Growable circular byte queue shared by one producer and one consumer.
//!
//! The producer (a socket read loop) appends arbitrary-sized chunks with
//! [`ByteQueue::enqueue`]; the consumer (a framing parser) removes
//! exact-length slices with [`ByteQueue::dequeue`] or suspends on
//! [`ByteQueue::dequeue_async`] until enough bytes have accumulated. All
//! state mutations run under one internal lock, and the lock is never held
//! across an `.await`.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::Notify;

use crate::DEFAULT_CAPACITY;
use crate::error::QueueError;

/// Ring state guarded by the queue mutex.
struct Ring {
    /// Backing store; its length is the queue capacity.
    buf: Vec<u8>,

    /// Index of the first unread byte.
    head: usize,

    /// Number of unread bytes currently held.
    count: usize,

    /// Byte requirement of the registered pending wait, if any.
    waiting_for: Option<usize>,
}

impl Ring {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            head: 0,
            count: 0,
            waiting_for: None,
        }
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Copies the first `n` unread bytes into a fresh vector without
    /// advancing the read cursor. Requires `n <= self.count`.
    fn copy_front(&self, n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n);
        if n == 0 {
            return out;
        }
        let first = (self.buf.len() - self.head).min(n);
        out.extend_from_slice(&self.buf[self.head..self.head + first]);
        if n > first {
            out.extend_from_slice(&self.buf[..n - first]);
        }
        out
    }

    /// Removes and returns the first `n` unread bytes. Requires
    /// `n <= self.count`.
    fn take_front(&mut self, n: usize) -> Vec<u8> {
        let out = self.copy_front(n);
        if n > 0 {
            self.head = (self.head + n) % self.buf.len();
            self.count -= n;
        }
        out
    }

    /// Appends `bytes` after the last unread byte, wrapping past the end of
    /// the store when needed. Requires `self.count + bytes.len()` to fit the
    /// current capacity.
    fn write_back(&mut self, bytes: &[u8]) {
        let cap = self.buf.len();
        let tail = (self.head + self.count) % cap;
        let first = (cap - tail).min(bytes.len());
        self.buf[tail..tail + first].copy_from_slice(&bytes[..first]);
        self.buf[..bytes.len() - first].copy_from_slice(&bytes[first..]);
        self.count += bytes.len();
    }

    /// Reallocates the store to exactly `new_capacity` bytes, linearizing
    /// the unread bytes to index 0. Requires `new_capacity >= self.count`.
    fn relocate(&mut self, new_capacity: usize) {
        let mut fresh = vec![0u8; new_capacity];
        if self.count > 0 {
            let first = (self.buf.len() - self.head).min(self.count);
            fresh[..first].copy_from_slice(&self.buf[self.head..self.head + first]);
            fresh[first..self.count].copy_from_slice(&self.buf[..self.count - first]);
        }
        self.buf = fresh;
        self.head = 0;
    }

    /// Doubles the capacity until `required` total bytes fit, then
    /// reallocates.
    fn grow_for(&mut self, required: usize) {
        let mut new_capacity = self.buf.len().max(1);
        while new_capacity < required {
            new_capacity *= 2;
        }
        self.relocate(new_capacity);
    }
}

/// Growable, circular FIFO byte queue with an asynchronous wait.
///
/// Bytes are appended by [`enqueue`](Self::enqueue) and removed in FIFO
/// order by the dequeue family of methods. The backing store grows by
/// doubling whenever an enqueue would overflow it and never shrinks on its
/// own; [`set_capacity`](Self::set_capacity) resizes it explicitly.
///
/// Every method takes `&self`, so a producer task and a consumer task can
/// share the queue behind an `Arc` without additional locking:
///
/// ```
/// use std::sync::Arc;
/// use bytequeue::ByteQueue;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let queue = Arc::new(ByteQueue::new());
///
/// let producer = queue.clone();
/// tokio::spawn(async move {
///     producer.enqueue(&[0x01, 0x02, 0x03, 0x04]);
/// });
///
/// // Suspends until four bytes have been enqueued.
/// let frame = queue.dequeue_async(4).await.unwrap();
/// assert_eq!(frame, vec![0x01, 0x02, 0x03, 0x04]);
/// # }
/// ```
pub struct ByteQueue {
    ring: Mutex<Ring>,

    /// Wakes the registered waiter once its byte requirement is met.
    data_ready: Notify,
}

impl ByteQueue {
    /// Create an empty queue with [`DEFAULT_CAPACITY`] bytes of storage.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty queue with exactly `capacity` bytes of storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
            data_ready: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap()
    }

    /// Append `bytes` to the logical tail of the queue.
    ///
    /// Grows the backing store by doubling when the chunk does not fit;
    /// existing bytes are preserved in order and never overwritten. If a
    /// [`dequeue_async`](Self::dequeue_async) wait is pending and this chunk
    /// satisfies its requirement, the waiter is woken before this call
    /// returns. Appending an empty slice is a no-op.
    pub fn enqueue(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let mut ring = self.lock();
        let required = ring.count + bytes.len();
        if required > ring.capacity() {
            let old = ring.capacity();
            ring.grow_for(required);
            tracing::trace!(from = old, to = ring.capacity(), "grew backing store");
        }
        ring.write_back(bytes);
        if ring.waiting_for.is_some_and(|needed| ring.count >= needed) {
            self.data_ready.notify_one();
        }
    }

    /// Remove and return the first `count` bytes in FIFO order.
    ///
    /// Fails with [`QueueError::InsufficientData`] when fewer than `count`
    /// bytes are buffered, leaving the queue untouched. `count == 0` yields
    /// an empty vector. The backing store is never shrunk by a dequeue.
    pub fn dequeue(&self, count: usize) -> Result<Vec<u8>, QueueError> {
        let mut ring = self.lock();
        if count > ring.count {
            return Err(QueueError::InsufficientData {
                requested: count,
                available: ring.count,
            });
        }
        Ok(ring.take_front(count))
    }

    /// Return a copy of the first `count` bytes without removing them.
    ///
    /// Same precondition as [`dequeue`](Self::dequeue); repeated peeks
    /// return identical results and never mutate the queue.
    pub fn peek(&self, count: usize) -> Result<Vec<u8>, QueueError> {
        let ring = self.lock();
        if count > ring.count {
            return Err(QueueError::InsufficientData {
                requested: count,
                available: ring.count,
            });
        }
        Ok(ring.copy_front(count))
    }

    /// Return all buffered bytes, linearized into FIFO order.
    ///
    /// Stitches the two physical segments together when the data wraps past
    /// the end of the backing store. Mutates nothing.
    pub fn buffer(&self) -> Vec<u8> {
        let ring = self.lock();
        ring.copy_front(ring.count)
    }

    /// Remove and return the first `count` bytes, suspending until enough
    /// bytes have been enqueued.
    ///
    /// If the queue already holds `count` bytes the dequeue completes
    /// immediately. Otherwise the call registers a pending wait and suspends
    /// the task without blocking the executor; the [`enqueue`](Self::enqueue)
    /// call that raises the buffered count to `count` wakes it. There is no
    /// polling.
    ///
    /// The returned future is cancel-safe: dropping it mid-wait (for example
    /// when it loses a `tokio::select!`) deregisters the wait and consumes
    /// zero bytes, leaving the queue exactly as it was. Only one wait may be
    /// pending at a time; a second concurrent call fails with
    /// [`QueueError::WaitInProgress`]. `count == 0` fails with
    /// [`QueueError::ZeroLength`].
    pub async fn dequeue_async(&self, count: usize) -> Result<Vec<u8>, QueueError> {
        if count == 0 {
            return Err(QueueError::ZeroLength);
        }
        {
            let mut ring = self.lock();
            if ring.count >= count {
                return Ok(ring.take_front(count));
            }
            if ring.waiting_for.is_some() {
                return Err(QueueError::WaitInProgress);
            }
            ring.waiting_for = Some(count);
            tracing::trace!(requested = count, available = ring.count, "waiting for bytes");
        }
        let _wait = WaitGuard { queue: self };
        loop {
            self.data_ready.notified().await;
            let mut ring = self.lock();
            if ring.count >= count {
                return Ok(ring.take_front(count));
            }
        }
    }

    /// Like [`dequeue_async`](Self::dequeue_async), but gives up after
    /// `wait` has elapsed.
    ///
    /// On timeout the pending wait is deregistered, no bytes are consumed,
    /// and [`QueueError::Cancelled`] is returned; the queue stays fully
    /// usable.
    pub async fn dequeue_timeout(
        &self,
        count: usize,
        wait: Duration,
    ) -> Result<Vec<u8>, QueueError> {
        match tokio::time::timeout(wait, self.dequeue_async(count)).await {
            Ok(result) => result,
            Err(_) => Err(QueueError::Cancelled { requested: count }),
        }
    }

    /// Discard all buffered bytes and reset the cursors.
    ///
    /// Capacity is unchanged and the queue remains usable; clearing an empty
    /// queue is a no-op. A pending [`dequeue_async`](Self::dequeue_async)
    /// stays registered and completes against bytes enqueued afterwards.
    pub fn clear(&self) {
        let mut ring = self.lock();
        ring.head = 0;
        ring.count = 0;
        tracing::trace!("cleared");
    }

    /// Resize the backing store to exactly `capacity` bytes.
    ///
    /// Fails with [`QueueError::CapacityTooSmall`] when `capacity` cannot
    /// hold the bytes currently buffered. Callers that know a workload's
    /// size in advance can pre-size the store here and avoid repeated
    /// doubling during enqueue.
    pub fn set_capacity(&self, capacity: usize) -> Result<(), QueueError> {
        let mut ring = self.lock();
        if capacity < ring.count {
            return Err(QueueError::CapacityTooSmall {
                requested: capacity,
                buffered: ring.count,
            });
        }
        if capacity != ring.capacity() {
            tracing::trace!(from = ring.capacity(), to = capacity, "resized backing store");
            ring.relocate(capacity);
        }
        Ok(())
    }

    /// Number of unread bytes currently buffered.
    pub fn len(&self) -> usize {
        self.lock().count
    }

    /// Whether the queue currently holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current size of the backing store in bytes.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }
}

impl Default for ByteQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregisters the pending wait when the owning `dequeue_async` future
/// completes or is dropped mid-wait.
struct WaitGuard<'a> {
    queue: &'a ByteQueue,
}

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.queue.lock().waiting_for = None;
    }
}
