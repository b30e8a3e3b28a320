//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! SIGTERM/SIGINT → Shutdown::trigger → ShutdownSignal::triggered
//!     → server stops accepting → in-flight requests drain → exit
//! ```

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownSignal};
