//! Lump record codecs
//!
//! Byte-exact readers and writers for the texture-related lumps:
//!
//! - [`PatchNames`] - PNAMES
//! - [`TextureList`] - TEXTURE1/TEXTURE2, standard and reduced (Strife) variants
//! - [`AnimatedTable`] - Boom ANIMATED
//! - [`SwitchTable`] - Boom SWITCHES
//!
//! [`TextureSet`] joins texture lists with PNAMES so that patches are
//! referenced by name.

pub mod animated;
pub mod common;
pub mod pnames;
pub mod switches;
pub mod tables;
pub mod texture_list;
pub mod texture_set;

pub use animated::{AnimatedEntry, AnimatedKind, AnimatedTable};
pub use common::{NAME_LENGTH, compare_names, is_valid_name, name_key};
pub use pnames::PatchNames;
pub use switches::{SwitchEntry, SwitchTable};
pub use tables::{NULL_TEXTURE_NAMES, default_animated, default_switch_pair, default_switches, is_null_texture};
pub use texture_list::{PatchRecord, TextureEntry, TextureFormat, TextureList, detect_format};
pub use texture_set::{ExportedTextures, PatchPlacement, TextureDefinition, TextureSet};
