//! # Shared Crypto - Hash Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256d (SHA-256 applied twice) | Block and transaction ids |
//!
//! Digests are returned in internal byte order. Reversal into display order
//! is the caller's concern (see `shared_types::CanonicalHash`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{double_sha256, double_sha256_prefix, Sha256dHasher, DIGEST_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
