//! # Shared Types Crate
//!
//! Value types exchanged between the notification transport, the hash
//! verifier and the correlation harness.
//!
//! ## Design Principles
//!
//! - **Immutable values**: a decoded `NotificationEnvelope` is consumed once
//!   and never mutated.
//! - **One hash convention**: `CanonicalHash` always holds bytes in display
//!   order, so comparing two hashes never needs to know where they came from.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::{NotificationEnvelope, PayloadFormat, RawFrame, Topic};
pub use errors::*;
