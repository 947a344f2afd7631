//! Domain Layer
//!
//! Pure logic, no I/O:
//! - `envelope`: multipart frame → `NotificationEnvelope`
//! - `hashing`: payload → `CanonicalHash`
//! - `correlation`: expected vs. observed hash comparison

pub mod correlation;
pub mod envelope;
pub mod hashing;

pub use correlation::{assert_hash_eq, assert_same_multiset, CheckKind};
pub use envelope::{decode_frame, MIN_FRAME_PARTS, TOPIC_TAG_LEN};
pub use hashing::{compute_hash, HashVerifier, BLOCK_HEADER_LEN};
