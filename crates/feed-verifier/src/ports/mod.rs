//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for callers of the harness
//! - Driven Ports (outbound) - the node's command interface

pub mod inbound;
pub mod outbound;

pub use inbound::{CheckOutcome, FeedVerifierApi, VerificationReport};
pub use outbound::NodeCommands;
