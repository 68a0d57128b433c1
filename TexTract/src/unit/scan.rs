//! Directory scan
//!
//! One pass over an archive's entries that indexes the patch, flat and
//! texture namespaces and notes where the texture lumps live.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::formats::name_key;
use crate::wad::Archive;

static PATCH_SUB_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P[0-9]*_(START|END)$").expect("valid patch marker regex"));
static FLAT_SUB_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^F[0-9]*_(START|END)$").expect("valid flat marker regex"));

/// Marker-delimited entry range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Patches,
    Flats,
    Textures,
}

impl Namespace {
    const ALL: [Namespace; 3] = [Namespace::Patches, Namespace::Flats, Namespace::Textures];

    /// Start markers, canonical one first
    #[must_use]
    pub fn start_markers(self) -> &'static [&'static str] {
        match self {
            Self::Patches => &["PP_START", "P_START"],
            Self::Flats => &["FF_START", "F_START"],
            Self::Textures => &["TX_START"],
        }
    }

    /// End markers, canonical one first
    #[must_use]
    pub fn end_markers(self) -> &'static [&'static str] {
        match self {
            Self::Patches => &["PP_END", "P_END"],
            Self::Flats => &["FF_END", "F_END"],
            Self::Textures => &["TX_END"],
        }
    }

    fn sub_marker(self) -> Option<&'static Regex> {
        match self {
            Self::Patches => Some(&*PATCH_SUB_MARKER),
            Self::Flats => Some(&*FLAT_SUB_MARKER),
            Self::Textures => None,
        }
    }

    fn opened_by(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.is_start(name))
    }

    fn is_start(self, name: &str) -> bool {
        self.start_markers().iter().any(|m| m.eq_ignore_ascii_case(name))
    }

    fn is_end(self, name: &str) -> bool {
        self.end_markers().iter().any(|m| m.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    InNamespace {
        namespace: Namespace,
        /// Where the range was opened
        marker: usize,
        ignore: Option<&'static Regex>,
    },
}

/// What a directory scan found
#[derive(Debug, Clone, Default)]
pub struct DirectoryScan {
    /// Name key -> entry index
    pub patches: HashMap<String, usize>,
    pub flats: HashMap<String, usize>,
    pub textures: HashMap<String, usize>,
    pub texture1: Option<usize>,
    pub texture2: Option<usize>,
    pub pnames: Option<usize>,
    pub animated: Option<usize>,
    pub switches: Option<usize>,
}

impl DirectoryScan {
    fn index_mut(&mut self, namespace: Namespace) -> &mut HashMap<String, usize> {
        match namespace {
            Namespace::Patches => &mut self.patches,
            Namespace::Flats => &mut self.flats,
            Namespace::Textures => &mut self.textures,
        }
    }

    fn note_outside(&mut self, name: &str, index: usize) {
        let slot = match name_key(name).as_str() {
            "TEXTURE1" => &mut self.texture1,
            "TEXTURE2" => &mut self.texture2,
            "PNAMES" => &mut self.pnames,
            "ANIMATED" => &mut self.animated,
            "SWITCHES" => &mut self.switches,
            _ => return,
        };
        slot.get_or_insert(index);
    }
}

/// Scan every entry of `archive` once.
///
/// # Errors
/// Returns [`Error::UnterminatedNamespace`] if the archive ends inside a range.
pub fn scan_directory<A: Archive>(archive: &A, label: &str) -> Result<DirectoryScan> {
    let mut scan = DirectoryScan::default();
    let mut state = ScanState::Outside;

    for index in 0..archive.entry_count() {
        let name = archive.entry_at(index)?.name;

        state = match state {
            ScanState::Outside => match Namespace::opened_by(&name) {
                Some(namespace) => ScanState::InNamespace {
                    namespace,
                    marker: index,
                    ignore: namespace.sub_marker(),
                },
                None => {
                    scan.note_outside(&name, index);
                    ScanState::Outside
                }
            },
            ScanState::InNamespace { namespace, .. } if namespace.is_end(&name) => ScanState::Outside,
            ScanState::InNamespace { namespace, ignore, .. } => {
                let key = name_key(&name);
                let skip = namespace.is_start(&name) || ignore.is_some_and(|re| re.is_match(&key));
                if !skip {
                    scan.index_mut(namespace).insert(key, index);
                }
                state
            }
        };
    }

    if let ScanState::InNamespace { marker, .. } = state {
        let marker = archive.entry_at(marker)?.name;
        return Err(Error::UnterminatedNamespace {
            archive: label.to_string(),
            marker,
        });
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wad::WadFile;

    fn archive(names: &[&str]) -> WadFile {
        let mut wad = WadFile::create();
        for name in names {
            wad.push(*name, vec![0]);
        }
        wad
    }

    #[test]
    fn test_namespaces_and_lumps() {
        let wad = archive(&[
            "TEXTURE1", "PNAMES", "P_START", "P1_START", "WALL00_1", "P1_END", "PP_START", "DOOR2_4", "PP_END",
            "FF_START", "FLOOR0_1", "F_END", "TX_START", "HITEX", "TX_END", "TEXTURE1",
        ]);
        let scan = scan_directory(&wad, "test.wad").unwrap();

        assert_eq!(scan.texture1, Some(0));
        assert_eq!(scan.pnames, Some(1));
        assert_eq!(scan.patches.len(), 2);
        assert_eq!(scan.patches.get("DOOR2_4"), Some(&7));
        assert_eq!(scan.flats.get("FLOOR0_1"), Some(&10));
        assert_eq!(scan.textures.get("HITEX"), Some(&13));
        assert!(scan.texture2.is_none());
    }

    #[test]
    fn test_later_entry_overrides_and_ranges_accumulate() {
        let wad = archive(&["F_START", "NUKAGE1", "F_END", "FF_START", "NUKAGE1", "NUKAGE2", "FF_END"]);
        let scan = scan_directory(&wad, "test.wad").unwrap();
        assert_eq!(scan.flats.len(), 2);
        assert_eq!(scan.flats.get("NUKAGE1"), Some(&4));
    }

    #[test]
    fn test_lumps_inside_namespace_are_not_tables() {
        let wad = archive(&["P_START", "PNAMES", "P_END"]);
        let scan = scan_directory(&wad, "test.wad").unwrap();
        assert!(scan.pnames.is_none());
        assert!(scan.patches.contains_key("PNAMES"));
    }

    #[test]
    fn test_unterminated_namespace() {
        let wad = archive(&["P_START", "WALL00_1"]);
        let err = scan_directory(&wad, "open.wad").unwrap_err();
        assert!(matches!(
            err,
            Error::UnterminatedNamespace { ref archive, ref marker } if archive == "open.wad" && marker == "P_START"
        ));
    }
}
