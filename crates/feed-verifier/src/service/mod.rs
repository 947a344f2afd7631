//! Service Layer
//!
//! - `subscriber`: bounded receive over a `FrameSource`
//! - `harness`: issues node commands and correlates the resulting notifications

pub mod harness;
pub mod subscriber;

pub use harness::CorrelationHarness;
pub use subscriber::TopicSubscriber;
