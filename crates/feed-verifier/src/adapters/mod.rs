//! Adapters Layer
//!
//! Concrete transports behind the ports:
//! - `zmq`: SUB socket implementing `FrameSource`
//! - `rpc`: JSON-RPC client implementing `NodeCommands`

pub mod rpc;
pub mod zmq;

pub use rpc::{JsonRpcNodeClient, RpcCredentials};
pub use zmq::{frame_from_message, subscribe, ZmqFrameSource};
