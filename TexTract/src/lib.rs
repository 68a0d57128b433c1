//! # `TexTract`
//!
//! Extracts wall textures and flats from Doom WAD files into a new WAD,
//! bringing along the patches the textures are built from and the ANIMATED
//! and SWITCHES entries that still apply to what was extracted.
//!
//! ## Supported Lumps
//!
//! - **TEXTURE1/TEXTURE2** - standard (Doom, Heretic, Hexen) and Strife layouts
//! - **PNAMES** - patch name table, rebuilt for the output
//! - **ANIMATED/SWITCHES** - Boom tables, with the stock tables as fallback
//! - **Namespaces** - `P_`/`PP_` patches, `F_`/`FF_` flats, `TX_` textures
//!
//! ## Quick Start
//!
//! ```no_run
//! use textract::{ExtractOptions, TextureExtractor};
//!
//! let options = ExtractOptions::new("doom2.wad", "out.wad").with_input("mytextures.wad");
//! let request = "-texture\nSTARTAN3\nSW1BRCOM\n-flat\nNUKAGE1\n";
//!
//! let summary = TextureExtractor::run(&options, request.as_bytes())?;
//! println!("{} textures, {} patches", summary.textures, summary.patches);
//! # Ok::<(), textract::Error>(())
//! ```
//!
//! ### Working with lumps directly
//!
//! ```no_run
//! use textract::prelude::*;
//!
//! let wad = WadFile::open("doom2.wad")?;
//! let unit = SourceUnit::build(wad, "doom2.wad", &ScanOptions::default())?;
//! println!("{} textures", unit.texture_set().len());
//! # Ok::<(), textract::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `textract` command-line binary

pub mod closure;
pub mod error;
pub mod extract;
pub mod formats;
pub mod operations;
pub mod options;
pub mod request;
pub mod resolver;
pub mod serialize;
pub mod unit;
pub mod wad;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use error::{Error, Result};
pub use operations::{ExtractionSummary, TextureExtractor};
pub use options::ExtractOptions;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::formats::{
        AnimatedEntry, AnimatedKind, AnimatedTable, PatchNames, SwitchEntry, SwitchTable, TextureDefinition,
        TextureFormat, TextureList, TextureSet,
    };
    pub use crate::wad::{Archive, Lump, WadFile};

    pub use crate::closure::ClosureExpander;
    pub use crate::extract::{ExportSet, Extractor};
    pub use crate::request::{ExtractionRequest, parse_request_list, read_request_list};
    pub use crate::resolver::PriorityResolver;
    pub use crate::serialize::{OutputLayout, TextureOrdering, write_export};
    pub use crate::unit::{ScanOptions, SourceUnit};

    pub use crate::operations::{ExtractPhase, ExtractProgress, ExtractionSummary, TextureExtractor};
    pub use crate::options::ExtractOptions;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
