//! Sample archive codec.
//!
//! This module decodes the multi-sample archive format:
//! - `ByteBuffer` - bounds-checked table reader
//! - `decode_archive` - entry/metadata tables, offset correction, pan remap
//! - `InstrumentDefaults` - default keysound tables
//! - `extract_archive` - per-sample audio extraction and the `metadata.json` sidecar

mod bytes;
mod codec;
mod defaults;
mod extract;
mod metadata;

pub use bytes::*;
pub use codec::*;
pub use defaults::*;
pub use extract::*;
pub use metadata::*;
