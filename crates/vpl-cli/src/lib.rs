//! Library side of the `vpl` runner: logging setup and session replay.

pub mod logging;
pub mod script;
pub mod session;
