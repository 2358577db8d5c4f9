//! Chart format handlers.
//!
//! A handler converts one concrete chart format to and from the JSON
//! intermediate `ChartDocument`. Handlers are registered in a
//! `FormatRegistry` and looked up by name or by sniffing file content.

mod json;
mod registry;
mod request;

pub use json::*;
pub use registry::*;
pub use request::*;

use crate::chart::ChartDocument;
use crate::error::Result;

/// A chart format: name, content sniffing, decoding and encoding.
///
/// Handlers are stateless and shared between concurrently running
/// conversions.
pub trait FormatHandler: Send + Sync {
    /// Name used to select this handler explicitly (compared case-insensitively)
    fn format_name(&self) -> &'static str;

    /// Check whether `data` looks like this format.
    ///
    /// Must not panic on malformed input. `Err` means the probe itself
    /// failed; the registry treats that as "not this format".
    fn probe(&self, data: &[u8]) -> Result<bool>;

    /// Decode the request's input into the intermediate document.
    fn to_json(&self, request: &ConversionRequest) -> Result<ChartDocument>;

    /// Encode `document` to the request's output.
    fn to_chart(&self, document: &ChartDocument, request: &ConversionRequest) -> Result<()>;
}
