pub mod archive;
pub mod audio;
pub mod chart;
pub mod config;
pub mod container;
pub mod convert;
pub mod error;
pub mod format;

pub use archive::{extract_archive, ArchiveOptions, ArchiveType, SampleMetadata};
pub use audio::{AudioConverter, VgmstreamConverter};
pub use chart::{filter_charts, ChartDocument, Difficulty, DifficultyFilter, Part, PartFilter, Selection};
pub use config::{ContainerInput, RunConfig};
pub use container::{ContainerExtractor, ContainerTarget, EventExtractor, IfsToolsExtractor};
pub use convert::{process_file, run, RunReport, Toolkit};
pub use error::{Error, Result};
pub use format::{ConversionRequest, FormatHandler, FormatRegistry};
