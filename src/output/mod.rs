//! Serialization and storage of the range table.
//!
//! - [`emitter`] - renders entries as Go, Rust or JSON source text
//! - [`sink`] - writes the rendered text to disk

mod emitter;
mod sink;

pub use emitter::{emit, EmitConfig, TableFormat};
pub use sink::FileSink;
