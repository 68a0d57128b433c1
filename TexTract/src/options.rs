//! Extraction options
//!
//! Everything one extraction run needs besides the request list.

use std::path::PathBuf;

use crate::unit::ScanOptions;

/// Options for a [`TextureExtractor`](crate::TextureExtractor) run.
///
/// # Example
///
/// ```no_run
/// use textract::ExtractOptions;
///
/// let options = ExtractOptions::new("doom2.wad", "out.wad")
///     .with_input("mytextures.wad")
///     .with_input("more/")
///     .with_null_texture("BLANKTEX")
///     .with_no_switches(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Patch WADs (or directories of them), highest priority first
    pub inputs: Vec<PathBuf>,

    /// WAD whose texture layout the output follows; never extracted from
    pub base: PathBuf,

    /// Target WAD
    pub output: PathBuf,

    /// Skip animation expansion and do not read or write ANIMATED
    pub no_animated: bool,

    /// Skip switch expansion and do not read or write SWITCHES
    pub no_switches: bool,

    /// Replace the output instead of adding to it
    pub overwrite: bool,

    /// Texture pinned to index 0 of TEXTURE1
    pub null_texture: Option<String>,

    /// Seed the output with every base texture definition
    pub keep_base_textures: bool,
}

impl ExtractOptions {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Add a patch source with lower priority than those already added
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.inputs.push(input.into());
        self
    }

    #[must_use]
    pub fn with_inputs<I, P>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_no_animated(mut self, no_animated: bool) -> Self {
        self.no_animated = no_animated;
        self
    }

    #[must_use]
    pub fn with_no_switches(mut self, no_switches: bool) -> Self {
        self.no_switches = no_switches;
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_null_texture(mut self, name: impl Into<String>) -> Self {
        self.null_texture = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_keep_base_textures(mut self, keep: bool) -> Self {
        self.keep_base_textures = keep;
        self
    }

    /// Which optional tables are scanned, expanded and written
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            animated: !self.no_animated,
            switches: !self.no_switches,
        }
    }
}
