//! The extraction pipeline
//!
//! scan sources -> read request list -> expand -> extract and merge -> write.
//! The output file is only touched once every earlier step has succeeded.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::closure::ClosureExpander;
use crate::error::{Error, Result};
use crate::extract::{ExportSet, Extractor};
use crate::options::ExtractOptions;
use crate::request::read_request_list;
use crate::resolver::PriorityResolver;
use crate::serialize::{OutputLayout, TextureOrdering, write_export};
use crate::unit::{ScanOptions, SourceUnit};
use crate::wad::{WadFile, expand_inputs};

/// Progress callback type
pub type ProgressCallback<'a> = &'a (dyn Fn(&ExtractProgress) + Sync + Send);

/// Stage of an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractPhase {
    /// Indexing the base and patch WADs
    Scanning,
    /// Reading the request list and expanding it
    Expanding,
    /// Copying definitions and lumps
    Extracting,
    /// Writing the output WAD
    Writing,
    Complete,
}

impl ExtractPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scanning => "Scanning",
            Self::Expanding => "Expanding request",
            Self::Extracting => "Extracting",
            Self::Writing => "Writing",
            Self::Complete => "Complete",
        }
    }
}

/// Progress update passed to a [`ProgressCallback`]
#[derive(Debug, Clone)]
pub struct ExtractProgress {
    pub phase: ExtractPhase,
    pub current: usize,
    pub total: usize,
    /// WAD being worked on, if any
    pub current_file: Option<String>,
}

impl ExtractProgress {
    #[must_use]
    pub fn new(phase: ExtractPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(phase: ExtractPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// What a run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub textures: usize,
    pub patches: usize,
    pub flats: usize,
    pub namespace_textures: usize,
    pub animated: usize,
    pub switches: usize,
}

impl ExtractionSummary {
    fn of(export: &ExportSet, scan: ScanOptions) -> Self {
        Self {
            textures: export.textures.len(),
            patches: export.patches.len(),
            flats: export.flats.len(),
            namespace_textures: export.namespace_textures.len(),
            animated: if scan.animated { export.animated.len() } else { 0 },
            switches: if scan.switches { export.switches.len() } else { 0 },
        }
    }
}

/// Runs extractions
pub struct TextureExtractor;

impl TextureExtractor {
    /// Extract what `request` lists according to `options`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoInputs`] if no patch WADs were given, and any scan,
    /// request list or IO error. Nothing is written on error.
    pub fn run<R: BufRead>(options: &ExtractOptions, request: R) -> Result<ExtractionSummary> {
        Self::run_with_progress(options, request, &|_| {})
    }

    /// Like [`run`](Self::run), reporting progress to `progress`
    pub fn run_with_progress<R: BufRead>(
        options: &ExtractOptions,
        request: R,
        progress: ProgressCallback,
    ) -> Result<ExtractionSummary> {
        let inputs = expand_inputs(&options.inputs);
        if inputs.is_empty() {
            return Err(Error::NoInputs);
        }
        let scan = options.scan_options();

        progress(&ExtractProgress::with_file(
            ExtractPhase::Scanning,
            0,
            inputs.len() + 1,
            label(&options.base),
        ));
        let base = open_unit(&options.base, &scan)?;
        let units = Self::build_units(&inputs, &scan, progress)?;
        let resolver = PriorityResolver::new(base, units);

        progress(&ExtractProgress::new(ExtractPhase::Expanding, 0, 1));
        let request = read_request_list(request)?;
        let expanded = ClosureExpander::new(&resolver, scan).expand(&request);
        info!(
            "Request: {} textures, {} flats after expansion",
            expanded.textures.len(),
            expanded.flats.len()
        );

        progress(&ExtractProgress::new(
            ExtractPhase::Extracting,
            0,
            expanded.textures.len() + expanded.flats.len(),
        ));
        let mut export = if options.keep_base_textures {
            ExportSet::with_textures(resolver.base().texture_set().clone())
        } else {
            ExportSet::new()
        };
        Extractor::new(&resolver, scan).extract(&expanded, &mut export)?;
        let summary = ExtractionSummary::of(&export, scan);

        progress(&ExtractProgress::with_file(ExtractPhase::Writing, 0, 1, label(&options.output)));
        let base = resolver.base();
        let layout = OutputLayout {
            format: base.texture_format(),
            texture1_names: base.texture1_names().cloned(),
            ordering: TextureOrdering::new(options.null_texture.as_deref()),
            write_animated: scan.animated,
            write_switches: scan.switches,
        };

        let mut output = if options.overwrite || !options.output.exists() {
            WadFile::create()
        } else {
            info!("Adding to existing {}", options.output.display());
            WadFile::open(&options.output)?
        };
        write_export(&mut output, export, &layout)?;
        output.save(&options.output)?;

        info!(
            "Wrote {} textures, {} patches, {} flats, {} namespace textures to {}",
            summary.textures,
            summary.patches,
            summary.flats,
            summary.namespace_textures,
            options.output.display()
        );
        progress(&ExtractProgress::new(ExtractPhase::Complete, 1, 1));
        Ok(summary)
    }

    /// Scan the patch WADs in parallel, keeping their order
    fn build_units(inputs: &[PathBuf], scan: &ScanOptions, progress: ProgressCallback) -> Result<Vec<SourceUnit>> {
        let total = inputs.len() + 1;
        let processed = AtomicUsize::new(1);

        inputs
            .par_iter()
            .map(|path| -> Result<SourceUnit> {
                let unit = open_unit(path, scan)?;
                let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(&ExtractProgress::with_file(ExtractPhase::Scanning, current, total, label(path)));
                Ok(unit)
            })
            .collect()
    }
}

fn label(path: &Path) -> String {
    path.display().to_string()
}

fn open_unit(path: &Path, scan: &ScanOptions) -> Result<SourceUnit> {
    let wad = WadFile::open(path)?;
    SourceUnit::build(wad, label(path), scan)
}
