//! Error types for the byte queue.

use thiserror::Error;

/// Failure conditions reported by [`ByteQueue`](crate::ByteQueue) operations.
///
/// Every error is reported to the immediate caller and leaves the queue
/// unchanged; nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// A capacity was requested that cannot hold the bytes already buffered
    #[error("capacity {requested} is smaller than the {buffered} buffered bytes")]
    CapacityTooSmall {
        /// Capacity that was requested
        requested: usize,
        /// Bytes currently buffered
        buffered: usize,
    },

    /// A length of zero was passed where at least one byte must be requested
    #[error("requested length must be at least one byte")]
    ZeroLength,

    /// More bytes were requested than are currently buffered
    #[error("insufficient data: requested {requested}, available {available}")]
    InsufficientData {
        /// Bytes that were requested
        requested: usize,
        /// Bytes currently available
        available: usize,
    },

    /// The asynchronous wait was cancelled or timed out before enough bytes
    /// arrived
    #[error("wait for {requested} bytes was cancelled")]
    Cancelled {
        /// Bytes the cancelled wait was holding out for
        requested: usize,
    },

    /// Another task already has a pending asynchronous wait on this queue
    #[error("another dequeue wait is already in progress")]
    WaitInProgress,
}
