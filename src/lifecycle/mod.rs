//! Lifecycle management for the host server.
//!
//! # Data Flow
//! ```text
//! Ctrl+C or Shutdown::trigger
//!     → broadcast to subscribers
//!     → HttpServer stops accepting and drains in-flight requests
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
