//! Process-flow trace domain
//!
//! The ordered record of steps taken while answering one request.

mod entities;

pub use entities::{Actor, TraceRecorder, TraceStep};
