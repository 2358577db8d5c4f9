//! Chart intermediate model.
//!
//! This module contains the types exchanged between format handlers:
//! - `Difficulty`, `Part` - chart header indices
//! - `ChartDocument`, `ChartEntry` - the JSON intermediate document
//! - `Selection`, `filter_charts` - part/difficulty filtering

mod document;
mod enums;
mod filter;

pub use document::*;
pub use enums::*;
pub use filter::*;
