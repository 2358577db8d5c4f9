use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;

/// Bonus-note flags keyed by event timestamp
pub type EventMap = BTreeMap<u32, bool>;

/// Reads bonus-note events out of an event stream member.
pub trait EventExtractor: Send + Sync {
    /// `Ok(None)` when the member carries no event data.
    fn extract(&self, data: &[u8]) -> Result<Option<EventMap>>;
}

/// Extractor for builds without event stream support; never finds events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventExtractor;

impl EventExtractor for NullEventExtractor {
    fn extract(&self, data: &[u8]) -> Result<Option<EventMap>> {
        debug!("Skipping {} byte event stream", data.len());
        Ok(None)
    }
}
