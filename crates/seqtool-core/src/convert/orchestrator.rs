use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::archive::{extract_archive, load_sound_metadata, ArchiveOptions};
use crate::audio::AudioConverter;
use crate::chart::Part;
use crate::config::members::BGM_EXTENSION;
use crate::config::{ContainerInput, RunConfig};
use crate::container::{
    demux, list_members, member_extension, ContainerExtractor, EventExtractor, FileSet,
    NullEventExtractor,
};
use crate::convert::{process_file, ExecutionMode, RunReport, TaskSet, TempStore};
use crate::error::Result;
use crate::format::{ConversionRequest, FormatRegistry};

/// Collaborators shared by every task of a run
#[derive(Clone)]
pub struct Toolkit {
    pub registry: Arc<FormatRegistry>,
    pub converter: Arc<dyn AudioConverter>,
    pub extractor: Arc<dyn ContainerExtractor>,
    pub events: Arc<dyn EventExtractor>,
}

impl Toolkit {
    /// Builtin format handlers, no event stream support
    pub fn new(converter: Arc<dyn AudioConverter>, extractor: Arc<dyn ContainerExtractor>) -> Self {
        Self {
            registry: Arc::new(FormatRegistry::builtin()),
            converter,
            extractor,
            events: Arc::new(NullEventExtractor),
        }
    }

    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventExtractor>) -> Self {
        self.events = events;
        self
    }
}

/// Run a whole conversion: validate, launch every unit of work, wait for all
/// of them, then remove temporary files.
///
/// Errors returned here are configuration or discovery errors; failures of
/// individual units are collected in the `RunReport`.
pub fn run(config: &RunConfig, toolkit: &Toolkit) -> Result<RunReport> {
    config.validate()?;

    let temp = TempStore::new();
    let mut tasks = TaskSet::new(ExecutionMode::from_single_threaded(config.single_threaded));

    let launched = match &config.container {
        Some(container) => launch_container(config, container, toolkit, &temp, &mut tasks),
        None => launch_single(config, toolkit, &mut tasks),
    };

    let report = tasks.join();
    info!(
        "{} of {} tasks succeeded",
        report.succeeded.len(),
        report.task_count()
    );

    if let Err(e) = temp.cleanup() {
        warn!("Failed to remove temporary files: {}", e);
    }

    launched?;
    Ok(report)
}

fn base_request(config: &RunConfig, sound_folder: Option<PathBuf>) -> ConversionRequest {
    ConversionRequest {
        input: config.input.clone(),
        input_format: config.input_format.clone(),
        output: config.output.clone(),
        output_format: config.output_format.clone(),
        sound_folder,
        sound_metadata: None,
        events: Arc::default(),
        selection: config.selection.clone(),
        music_id: config.music_id,
        input_split: config.input_split.clone(),
        no_sounds: config.no_sounds,
    }
}

fn launch_single(config: &RunConfig, toolkit: &Toolkit, tasks: &mut TaskSet) -> Result<()> {
    let mut request = base_request(config, config.sound_folder.clone());
    request.sound_metadata = load_sound_metadata(config.sound_folder.as_deref())?;

    if let Some(event_file) = &config.event_file {
        let events = toolkit.events.extract(&fs::read(event_file)?)?;
        request.events = Arc::new(events.unwrap_or_default());
    }

    let registry = Arc::clone(&toolkit.registry);
    tasks.spawn("convert", move || process_file(&request, &registry).map(|_| ()));
    Ok(())
}

fn launch_container(
    config: &RunConfig,
    container: &ContainerInput,
    toolkit: &Toolkit,
    temp: &TempStore,
    tasks: &mut TaskSet,
) -> Result<()> {
    let members = list_members(&container.sequence, toolkit.extractor.as_ref(), temp)?;
    let sets = demux(
        &members,
        config.container_target()?,
        config.no_sounds,
        toolkit.events.as_ref(),
    )?;

    let sound_folder = match &config.sound_folder {
        Some(folder) => folder.clone(),
        None if !config.output.as_os_str().is_empty() => config.output.clone(),
        None => temp.make_dir("sounds")?,
    };
    if !config.no_sounds && !sound_folder.exists() {
        fs::create_dir_all(&sound_folder)?;
    }

    if let Some(bgm) = container.bgm.as_deref().filter(|_| !config.no_sounds) {
        for member in bgm_members(bgm, toolkit.extractor.as_ref(), temp)? {
            let output = sound_folder.join(wav_name(&member));
            info!("Converting {:?}...", output);
            let converter = Arc::clone(&toolkit.converter);
            tasks.spawn(format!("bgm {}", output.display()), move || {
                converter.bgm_to_wav(&member, &output)
            });
        }
    }

    for (part, files) in sets.into_sets() {
        let wanted = match part {
            Part::Drum => config.selection.includes_part(Part::Drum),
            _ => [Part::Guitar, Part::Bass, Part::Open]
                .into_iter()
                .any(|p| config.selection.includes_part(p)),
        };
        if !wanted {
            continue;
        }

        let job = PartJob {
            part,
            files,
            request: base_request(config, Some(sound_folder.clone())),
            sound_defaults: config.sound_defaults.clone(),
            toolkit: toolkit.clone(),
        };
        tasks.spawn(part.name(), move || job.run());
    }

    Ok(())
}

fn bgm_members(
    path: &Path,
    extractor: &dyn ContainerExtractor,
    temp: &TempStore,
) -> Result<Vec<PathBuf>> {
    let members = list_members(path, extractor, temp)?;
    Ok(members
        .into_iter()
        .filter(|m| member_extension(m).as_deref() == Some(BGM_EXTENSION))
        .collect())
}

fn wav_name(member: &Path) -> String {
    let stem = member
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.wav", stem)
}

/// Conversion of one part's file set, run as its own task
struct PartJob {
    part: Part,
    files: FileSet,
    request: ConversionRequest,
    sound_defaults: Option<PathBuf>,
    toolkit: Toolkit,
}

impl PartJob {
    fn run(self) -> Result<()> {
        let Some(sequence) = self.files.sequence else {
            debug!("No {} sequence in container", self.part);
            return Ok(());
        };

        let mut request = self.request;
        let sound_folder = request.sound_folder.clone();

        request.sound_metadata = match (&self.files.sound_archive, &sound_folder) {
            (Some(archive), Some(folder)) if !request.no_sounds => {
                info!("Parsing {:?}...", archive);
                let options = ArchiveOptions {
                    force_hex: false,
                    is_guitar: self.part.is_guitar_family(),
                };
                Some(extract_archive(
                    archive,
                    self.sound_defaults.as_deref(),
                    folder,
                    options,
                    self.toolkit.converter.as_ref(),
                )?)
            }
            _ => load_sound_metadata(sound_folder.as_deref())?,
        };

        request.input = Some(sequence);
        request.input_format = None;
        if let Some(events) = self.files.events {
            request.events = events;
        }

        process_file(&request, &self.toolkit.registry)?;
        Ok(())
    }
}
