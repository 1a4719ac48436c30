//! Configuration types module

pub mod app;
pub mod http;
pub mod logging;

pub use app::RelayConfig;
pub use http::HttpConfig;
pub use logging::LoggingConfig;
