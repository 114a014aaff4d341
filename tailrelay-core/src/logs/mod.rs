//! Log streaming pipeline
//!
//! Two ways of reading application logs:
//! - **Dump**: a bounded, one-shot fetch of the last N lines over HTTP. Ends
//!   when the response body ends.
//! - **Tail**: an unbounded live stream over a WebSocket that reconnects when
//!   the server drops it and stops when the operator interrupts it.
//!
//! Both share the same shape. A reader task pulls from the network and
//! pushes into a bounded relay buffer; a render task pops from it and writes
//! highlighted lines to the terminal. The buffer lets network reads and
//! terminal writes overlap, and blocks the reader instead of dropping lines
//! when the terminal falls behind.
//!
//! transport
//! LineFramer / envelope::decode
//! RelayBuffer
//! Highlighter
//! LineRenderer

pub mod constants;
pub mod dump;
pub mod envelope;
mod error;
pub mod framer;
pub mod handlers;
pub mod highlight;
pub mod record;
pub mod relay;
pub mod render;
pub mod tail;
#[cfg(test)]
mod tests;

pub use dump::{DumpOutcome, DumpRequest, dump};
pub use error::StreamError;
pub use handlers::{DeploymentFollowHandler, LogLinesHandler};
pub use render::LineRenderer;
pub use tail::{EventHandler, Flow, TailController, TailOptions, TailOutcome};
