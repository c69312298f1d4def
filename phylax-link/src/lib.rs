//! Link layer for the security panel's serial automation interface
//!
//! The panel frames every binary message as hex-ASCII text, confirms each
//! one with a single ACK or NAK byte, and expects the peer to retransmit
//! on timeout. This crate implements that link layer: the per-link frame
//! codec ([`Link`]) and a bounded retransmission queue ([`SendQueue`])
//! that serializes outbound traffic so at most one message is ever in
//! flight.
//!
//! # Wire format
//!
//! ```text
//! ┌─────┬────────┬─────────────┬──────────┐
//! │ SOM │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 1B  │ 2 hex  │ 2×N hex     │ 2 hex    │
//! └─────┴────────┴─────────────┴──────────┘
//! ```
//!
//! LENGTH counts the payload bytes plus the trailing checksum byte.
//! CHECKSUM is the 8-bit wrapping sum of the LENGTH value and every
//! payload byte. When no handshake is outstanding a send is preceded by a
//! CR-LF preamble that flushes any partially buffered listener.
//!
//! # Execution model
//!
//! The engine performs no I/O and reads no clock of its own. Outbound
//! bytes go through a caller-supplied [`ByteSink`], inbound bytes are fed
//! in one at a time, and every time-dependent operation takes the current
//! monotonic time in milliseconds. All operations are non-blocking,
//! bounded-time state transitions over fixed-capacity buffers; drive them
//! from a single polling loop.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod frame;
pub mod link;
pub mod queue;

pub use frame::{
    checksum, ACK, MAX_FRAME_DATA, MAX_PAYLOAD, MIN_FRAME_DATA, NAK, PREAMBLE, START_OF_MESSAGE,
};
pub use link::{ByteSink, Link, MessageHandler, Readiness, RxStatus, SendError, REPLY_TIMEOUT_MS};
pub use queue::{EnqueueError, SendComplete, SendOutcome, SendQueue, MAX_ATTEMPTS, QUEUE_SIZE};
