//! Artifact handlers.
//!
//! Each handler consumes the engine's traversal events independently and
//! accumulates exactly one output artifact (or one slice of the shared
//! implementation file, in the case of the method handlers).

pub mod body;
pub mod harness;
pub mod header;

pub use body::{BodyBuilder, BodyFileHandler, DecodeHandler, EncodeHandler};
pub use harness::test_harness;
pub use header::HeaderHandler;
