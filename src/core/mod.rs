//! Core application primitives (cycle, scheduler, bot runtime, ops server)

pub mod cycle;
pub mod http;
pub mod runtime;
pub mod scheduler;

pub use cycle::*;
pub use runtime::*;
pub use scheduler::*;
