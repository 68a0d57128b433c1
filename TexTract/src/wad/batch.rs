//! Input path discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find all .wad files in a directory recursively, sorted by path
pub fn find_wad_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut wad_files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("wad"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    wad_files.sort();
    wad_files
}

/// Replace each directory in `paths` with the .wad files it contains.
///
/// Plain file paths are kept as given, so priority order is preserved.
pub fn expand_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .flat_map(|path| {
            if path.is_dir() {
                find_wad_files(path)
            } else {
                vec![path.clone()]
            }
        })
        .collect()
}
