//! HTTP transport
//!
//! The concrete [`Transport`](relay_application::Transport) used outside of
//! tests. Handlers describe requests; this module sends them.

pub mod transport;

pub use crate::config::HttpConfig;
pub use transport::ReqwestTransport;
