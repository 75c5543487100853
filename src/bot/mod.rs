//! Chat command handling: parsing, subscription session and dispatch.

pub mod commands;
pub mod dispatch;
pub mod session;

pub use commands::Command;
pub use dispatch::{dispatch, Dispatch, Inbound};
pub use session::Session;
