//! # bytequeue
//!
//! A growable, circular byte queue for plumbing an asynchronous socket read
//! loop into a protocol framing layer.
//!
//! This crate provides:
//! - FIFO byte storage in a wrap-around ring with on-demand doubling growth
//! - Exact-length `dequeue`/`peek` reads and a linearized full-content view
//! - An asynchronous, cancellable wait that suspends the consumer until the
//!   requested number of bytes has been enqueued
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                 socket read loop (producer)                │
//! │                      enqueue(chunk)                        │
//! ├────────────────────────────────────────────────────────────┤
//! │                         ByteQueue                          │
//! │      circular backing store + registered pending wait      │
//! ├────────────────────────────────────────────────────────────┤
//! │                 framing parser (consumer)                  │
//! │        peek(n) / dequeue(n) / dequeue_async(n).await       │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The queue never interprets byte content and performs no I/O of its own;
//! it is purely an in-memory storage and synchronization primitive shared by
//! one producer and one consumer, typically behind an `Arc`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod queue;

pub use error::QueueError;
pub use queue::ByteQueue;

/// Initial capacity in bytes when no explicit capacity is given
pub const DEFAULT_CAPACITY: usize = 1024;
