//! Integration tests: harness, simulated node and in-memory feed wired
//! together.

pub mod e2e_feed;
