//! The template bundle transform.

use std::path::{Component, Path, PathBuf};

use hogan_compiler::{compile_source, compile_template, Template};
use tracing::{debug, trace, warn};

use crate::error::{BundleError, BundleResult};
use crate::file::File;
use crate::map::TemplateMap;
use crate::module::generate_module;
use crate::options::{BundleConfig, BundleOptions};
use crate::stream::{EventSink, StreamEvent, Transform};

/// Where compiled templates go.
#[derive(Debug)]
pub enum Destination<'a> {
    /// Emit one generated module with this file name, placed under the
    /// first input's base directory.
    FileName(String),
    /// Store live templates in a caller-owned map and emit no output file.
    Container(&'a mut TemplateMap<Template>),
}

impl Destination<'_> {
    fn is_container(&self) -> bool {
        matches!(self, Destination::Container(_))
    }
}

impl From<&str> for Destination<'_> {
    fn from(name: &str) -> Self {
        Destination::FileName(name.to_string())
    }
}

impl From<String> for Destination<'_> {
    fn from(name: String) -> Self {
        Destination::FileName(name)
    }
}

impl<'a> From<&'a mut TemplateMap<Template>> for Destination<'a> {
    fn from(map: &'a mut TemplateMap<Template>) -> Self {
        Destination::Container(map)
    }
}

enum Accumulator<'a> {
    Sources {
        file_name: String,
        entries: TemplateMap<String>,
    },
    Container(&'a mut TemplateMap<Template>),
}

/// Directories of the first file that compiled; the output file is
/// placed relative to them.
#[derive(Debug, Clone)]
struct Origin {
    cwd: PathBuf,
    base: PathBuf,
}

/// Collects template files, compiles each one, and either emits a single
/// module bundling all of them or fills a caller-owned map.
///
/// Templates are keyed by name. A later file with the same name replaces
/// the earlier template but keeps its place in the output.
pub struct TemplateBundleTransform<'a> {
    accumulator: Accumulator<'a>,
    options: BundleOptions,
    origin: Option<Origin>,
    finished: bool,
}

impl<'a> TemplateBundleTransform<'a> {
    /// Build a transform. An empty file name is rejected.
    ///
    /// `options.template_options.as_string` is overwritten: a file name
    /// destination compiles to literals, a container to live templates.
    pub fn new(
        destination: impl Into<Destination<'a>>,
        mut options: BundleOptions,
    ) -> BundleResult<Self> {
        let destination = destination.into();
        options.template_options.as_string = !destination.is_container();

        let accumulator = match destination {
            Destination::FileName(file_name) if file_name.is_empty() => {
                return Err(BundleError::missing_destination());
            }
            Destination::FileName(file_name) => Accumulator::Sources {
                file_name,
                entries: TemplateMap::new(),
            },
            Destination::Container(map) => Accumulator::Container(map),
        };

        Ok(Self {
            accumulator,
            options,
            origin: None,
            finished: false,
        })
    }

    /// Like [`new`](Self::new), rejecting a missing destination.
    pub fn from_optional(
        destination: Option<Destination<'a>>,
        options: BundleOptions,
    ) -> BundleResult<Self> {
        match destination {
            Some(destination) => Self::new(destination, options),
            None => Err(BundleError::missing_destination()),
        }
    }

    /// Build with `config` merged over the default options.
    pub fn with_config(
        destination: impl Into<Destination<'a>>,
        config: &BundleConfig,
    ) -> BundleResult<Self> {
        Self::new(destination, BundleOptions::from_config(config))
    }

    /// The effective options, with `as_string` already forced.
    pub fn options(&self) -> &BundleOptions {
        &self.options
    }

    /// Number of templates the destination holds. A container counts
    /// the entries it already had before this transform.
    pub fn len(&self) -> usize {
        match &self.accumulator {
            Accumulator::Sources { entries, .. } => entries.len(),
            Accumulator::Container(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compiled literals, in output order. `None` for a container
    /// destination.
    pub fn sources(&self) -> Option<&TemplateMap<String>> {
        match &self.accumulator {
            Accumulator::Sources { entries, .. } => Some(entries),
            Accumulator::Container(_) => None,
        }
    }

    fn add(&mut self, file: &File) -> BundleResult<()> {
        let Some(bytes) = file.bytes() else {
            return Ok(());
        };
        let text = String::from_utf8_lossy(bytes);
        let name = (self.options.template_name)(file);
        let label = file.path.to_string_lossy();
        let template_options = &self.options.template_options;
        let compile_error = |source| BundleError::Compile {
            name: name.clone(),
            source,
        };

        let replaced = match &mut self.accumulator {
            Accumulator::Sources { entries, .. } => {
                let source =
                    compile_source(&label, &text, template_options).map_err(compile_error)?;
                entries.insert(name.clone(), source).is_some()
            }
            Accumulator::Container(map) => {
                let template =
                    compile_template(&label, &text, template_options).map_err(compile_error)?;
                map.insert(name.clone(), template).is_some()
            }
        };

        if replaced {
            debug!(template = %name, path = %file.path.display(), "replaced template");
        } else {
            debug!(template = %name, path = %file.path.display(), "added template");
        }
        Ok(())
    }

    fn output_file(&self) -> Option<File> {
        let Accumulator::Sources { file_name, entries } = &self.accumulator else {
            return None;
        };
        let origin = self.origin.as_ref()?;
        let module = generate_module(
            entries.iter().map(|(name, source)| (name, source.as_str())),
            &self.options,
        );
        Some(File::buffer(
            origin.cwd.clone(),
            origin.base.clone(),
            nest_under(&origin.base, file_name),
            module,
        ))
    }
}

/// `base` joined with `file_name`, where a rooted `file_name` still
/// lands under `base`.
fn nest_under(base: &Path, file_name: &str) -> PathBuf {
    let relative: PathBuf = Path::new(file_name)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    base.join(relative)
}

impl Transform for TemplateBundleTransform<'_> {
    fn on_item(&mut self, file: File, sink: &mut dyn EventSink) {
        if self.finished {
            warn!(path = %file.path.display(), "file received after completion; ignored");
            return;
        }
        if file.is_null() {
            trace!(path = %file.path.display(), "skipping file without contents");
            return;
        }
        if file.is_stream() {
            warn!(path = %file.path.display(), "streaming contents are not supported");
            sink.emit(StreamEvent::Error(BundleError::UnsupportedInput {
                path: file.path,
            }));
            return;
        }

        if let Err(err) = self.add(&file) {
            warn!(path = %file.path.display(), error = %err, "template skipped");
            sink.emit(StreamEvent::Error(err));
            return;
        }

        if self.origin.is_none() {
            self.origin = Some(Origin {
                cwd: file.cwd,
                base: file.base,
            });
        }
    }

    fn on_complete(&mut self, sink: &mut dyn EventSink) {
        if self.finished {
            return;
        }
        self.finished = true;

        if let Some(output) = self.output_file() {
            debug!(
                path = %output.path.display(),
                templates = self.len(),
                "emitting template bundle"
            );
            sink.emit(StreamEvent::Data(output));
        }
        sink.emit(StreamEvent::End);
    }
}
