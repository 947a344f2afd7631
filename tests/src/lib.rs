//! # Feed Verifier Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── simulation/   # Node stand-in publishing real block/tx bytes
//! │   │   └── wire.rs   # Network serialization
//! │   └── integration/  # Harness end-to-end over the in-memory feed
//! └── benches/          # Decode and hash throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p feed-tests
//!
//! # End-to-end only
//! cargo test -p feed-tests integration::
//!
//! # Benchmarks
//! cargo bench -p feed-tests
//! ```

pub mod integration;
pub mod simulation;
