use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::{FormatHandler, JsonHandler};

/// Outcome of probing one handler against a file
#[derive(Debug)]
pub enum Probe {
    Match,
    NoMatch,
    Failed(Error),
}

impl From<Result<bool>> for Probe {
    fn from(result: Result<bool>) -> Self {
        match result {
            Ok(true) => Self::Match,
            Ok(false) => Self::NoMatch,
            Err(e) => Self::Failed(e),
        }
    }
}

/// Registered format handlers, in probe order
#[derive(Clone)]
pub struct FormatRegistry {
    handlers: Vec<Arc<dyn FormatHandler>>,
}

impl FormatRegistry {
    pub fn new(handlers: Vec<Arc<dyn FormatHandler>>) -> Self {
        Self { handlers }
    }

    /// Registry with every handler shipped in this crate
    pub fn builtin() -> Self {
        Self::new(vec![Arc::new(JsonHandler)])
    }

    pub fn register(&mut self, handler: Arc<dyn FormatHandler>) {
        self.handlers.push(handler);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.format_name()).collect()
    }

    /// Find a handler by explicit format name, or else by sniffing `filename`.
    ///
    /// The name takes precedence whenever it is given. Probe failures count
    /// as a non-match for that handler only.
    pub fn resolve(
        &self,
        filename: Option<&Path>,
        format_name: Option<&str>,
    ) -> Option<Arc<dyn FormatHandler>> {
        if let Some(name) = format_name {
            return self
                .handlers
                .iter()
                .find(|h| h.format_name().eq_ignore_ascii_case(name))
                .cloned();
        }

        let path = filename?;
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Could not read {:?} for format detection: {}", path, e);
                return None;
            }
        };

        self.handlers
            .iter()
            .find(|handler| match Probe::from(handler.probe(&data)) {
                Probe::Match => true,
                Probe::NoMatch => false,
                Probe::Failed(e) => {
                    debug!("{} probe failed on {:?}: {}", handler.format_name(), path, e);
                    false
                }
            })
            .cloned()
    }

    /// Like `resolve`, but a missing handler is an error.
    pub fn require(
        &self,
        filename: Option<&Path>,
        format_name: Option<&str>,
    ) -> Result<Arc<dyn FormatHandler>> {
        self.resolve(filename, format_name).ok_or_else(|| {
            let target = match (format_name, filename) {
                (Some(name), _) => format!("format '{}'", name),
                (None, Some(path)) => format!("input file {:?}", path),
                (None, None) => "an unspecified format".to_string(),
            };
            Error::HandlerNotFound(target)
        })
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartDocument;
    use crate::format::ConversionRequest;

    /// Handler that matches files starting with its magic and can be told
    /// to fail while probing.
    struct MagicHandler {
        name: &'static str,
        magic: &'static [u8],
        broken: bool,
    }

    impl FormatHandler for MagicHandler {
        fn format_name(&self) -> &'static str {
            self.name
        }

        fn probe(&self, data: &[u8]) -> Result<bool> {
            if self.broken {
                return Err(Error::decode(0, "probe exploded"));
            }
            Ok(data.starts_with(self.magic))
        }

        fn to_json(&self, _request: &ConversionRequest) -> Result<ChartDocument> {
            Ok(ChartDocument::default())
        }

        fn to_chart(&self, _document: &ChartDocument, _request: &ConversionRequest) -> Result<()> {
            Ok(())
        }
    }

    fn registry() -> FormatRegistry {
        FormatRegistry::new(vec![
            Arc::new(MagicHandler {
                name: "broken",
                magic: b"SEQP",
                broken: true,
            }),
            Arc::new(MagicHandler {
                name: "sq3",
                magic: b"SEQP",
                broken: false,
            }),
            Arc::new(MagicHandler {
                name: "sq2",
                magic: b"SEQP",
                broken: false,
            }),
        ])
    }

    #[test]
    fn test_resolve_by_name_case_insensitive() {
        let registry = registry();
        let upper = registry.resolve(None, Some("SQ3")).unwrap();
        let lower = registry.resolve(None, Some("sq3")).unwrap();
        assert!(Arc::ptr_eq(&upper, &lower));
        assert_eq!(upper.format_name(), "sq3");
    }

    #[test]
    fn test_name_wins_over_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.bin");
        fs::write(&path, b"SEQP....").unwrap();

        let handler = registry().resolve(Some(&path), Some("sq2")).unwrap();
        assert_eq!(handler.format_name(), "sq2");
    }

    #[test]
    fn test_probe_failure_does_not_stop_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.bin");
        fs::write(&path, b"SEQP....").unwrap();

        let handler = registry().resolve(Some(&path), None).unwrap();
        assert_eq!(handler.format_name(), "sq3");
    }

    #[test]
    fn test_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.bin");
        fs::write(&path, b"RIFF").unwrap();

        let registry = registry();
        assert!(registry.resolve(Some(&path), None).is_none());
        assert!(registry.resolve(None, Some("dtx")).is_none());
        assert!(registry.resolve(None, None).is_none());
        assert!(registry.resolve(Some(&dir.path().join("missing")), None).is_none());
        assert!(matches!(
            registry.require(None, Some("dtx")),
            Err(Error::HandlerNotFound(_))
        ));
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(FormatRegistry::builtin().names(), vec!["json"]);
    }
}
