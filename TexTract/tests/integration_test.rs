use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};
use textract::prelude::*;

fn texture(name: &str, patches: &[&str]) -> TextureDefinition {
    patches
        .iter()
        .fold(TextureDefinition::new(name, 64, 128), |t, p| t.with_patch(*p, 0, 0))
}

/// TEXTURE1 + PNAMES + a patch range
fn texture_wad(format: TextureFormat, textures: Vec<TextureDefinition>, patches: &[&str]) -> WadFile {
    let mut set = TextureSet::new();
    for t in textures {
        set.insert(t);
    }
    let exported = set.export(format, None);

    let mut wad = WadFile::create();
    wad.push("TEXTURE1", exported.texture1.encode());
    wad.push("PNAMES", exported.patch_names.encode());
    if !patches.is_empty() {
        wad.push("P_START", vec![]);
        for patch in patches {
            wad.push(*patch, patch.as_bytes().to_vec());
        }
        wad.push("P_END", vec![]);
    }
    wad
}

fn save(dir: &TempDir, name: &str, wad: &WadFile) -> PathBuf {
    let path = dir.path().join(name);
    wad.save(&path).unwrap();
    path
}

fn names(wad: &WadFile) -> Vec<String> {
    wad.lumps().iter().map(|l| l.name.clone()).collect()
}

fn output_textures(wad: &WadFile) -> TextureSet {
    let pnames = PatchNames::decode(&wad.read_named("PNAMES").unwrap().unwrap()).unwrap();
    let list = TextureList::decode(&wad.read_named("TEXTURE1").unwrap().unwrap()).unwrap();
    TextureSet::from_lists(&pnames, &list, None).unwrap()
}

fn base_and_patch(dir: &TempDir) -> (PathBuf, PathBuf) {
    let base = texture_wad(
        TextureFormat::Standard,
        vec![texture("A", &["p1", "p2"]), texture("B", &["p2"])],
        &["p1", "p2"],
    );
    let patch = texture_wad(
        TextureFormat::Standard,
        vec![texture("A", &["p3", "p1"]), texture("C", &["p1"])],
        &["p3"],
    );
    (save(dir, "base.wad", &base), save(dir, "patch.wad", &patch))
}

#[test]
fn test_redefined_texture_extracted_with_new_patch() {
    let dir = tempdir().unwrap();
    let (base, patch) = base_and_patch(&dir);
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(&patch);
    let summary = TextureExtractor::run(&options, "-texture\nA\n".as_bytes()).unwrap();
    assert_eq!(summary.textures, 1);
    assert_eq!(summary.patches, 1);

    let out = WadFile::open(&output).unwrap();
    let textures = output_textures(&out);
    assert_eq!(textures.len(), 1);
    let a = textures.get("A").unwrap();
    let patch_names: Vec<_> = a.patches.iter().map(|p| p.patch_name.to_ascii_uppercase()).collect();
    assert_eq!(patch_names, vec!["P3", "P1"]);
    assert!(!textures.contains("B"));
    assert!(!textures.contains("C"));

    assert_eq!(names(&out), vec!["TEXTURE1", "PNAMES", "PP_START", "P3", "PP_END"]);
    assert_eq!(out.read_named("P3").unwrap(), Some(b"p3".to_vec()));
}

#[test]
fn test_unknown_flat_is_skipped() {
    let dir = tempdir().unwrap();
    let (base, patch) = base_and_patch(&dir);
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(&patch);
    let summary = TextureExtractor::run(&options, "-flat\nNOSUCHFL\n".as_bytes()).unwrap();
    assert_eq!(summary.flats, 0);

    let out = WadFile::open(&output).unwrap();
    assert!(!out.contains("FF_START"));
    assert!(!out.contains("NOSUCHFL"));
}

#[test]
fn test_null_texture_written_first() {
    let dir = tempdir().unwrap();
    let base = save(&dir, "base.wad", &texture_wad(TextureFormat::Standard, vec![], &[]));
    let patch = save(
        &dir,
        "patch.wad",
        &texture_wad(
            TextureFormat::Standard,
            vec![texture("AAAA", &["p1"]), texture("BLANKTEX", &["p1"]), texture("MMMM", &["p1"])],
            &["p1"],
        ),
    );
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output)
        .with_input(&patch)
        .with_null_texture("BLANKTEX");
    TextureExtractor::run(&options, "-texture\nMMMM\nAAAA\nBLANKTEX\n".as_bytes()).unwrap();

    let out = WadFile::open(&output).unwrap();
    let order: Vec<_> = output_textures(&out).names().map(str::to_string).collect();
    assert_eq!(order, vec!["BLANKTEX", "AAAA", "MMMM"]);
}

#[test]
fn test_append_preserves_unrelated_entries() {
    let dir = tempdir().unwrap();
    let (base, patch) = base_and_patch(&dir);

    let mut existing = WadFile::create();
    existing.push("MAP01", vec![]);
    existing.push("THINGS", vec![1, 2, 3]);
    existing.push("PNAMES", vec![0, 0, 0, 0]);
    existing.push("DEMO1", vec![9; 32]);
    let output = save(&dir, "out.wad", &existing);

    let options = ExtractOptions::new(&base, &output).with_input(&patch);
    TextureExtractor::run(&options, "-texture\nA\n".as_bytes()).unwrap();

    let out = WadFile::open(&output).unwrap();
    assert_eq!(
        names(&out),
        vec!["MAP01", "THINGS", "PNAMES", "DEMO1", "TEXTURE1", "PP_START", "P3", "PP_END"]
    );
    assert_eq!(out.read_named("THINGS").unwrap(), Some(vec![1, 2, 3]));
    assert_eq!(out.read_named("DEMO1").unwrap(), Some(vec![9; 32]));

    // overwrite starts from an empty archive
    let options = options.with_overwrite(true);
    TextureExtractor::run(&options, "-texture\nA\n".as_bytes()).unwrap();
    let out = WadFile::open(&output).unwrap();
    assert!(!out.contains("THINGS"));
}

#[test]
fn test_switch_pair_and_animation_cycle_extracted() {
    let dir = tempdir().unwrap();
    let base = save(&dir, "base.wad", &texture_wad(TextureFormat::Standard, vec![], &[]));

    let cycle = ["WALL01", "WALL02", "WALL03", "WALL04", "WALL05"];
    let mut textures: Vec<_> = cycle.iter().map(|n| texture(n, &["wp"])).collect();
    textures.push(texture("SWOFF1", &["sp1"]));
    textures.push(texture("SWON1", &["sp2"]));
    textures.push(texture("WALL00", &["wp"]));
    textures.push(texture("WALL06", &["wp"]));
    let mut wad = texture_wad(TextureFormat::Standard, textures, &["wp", "sp1", "sp2"]);

    let animated = AnimatedTable {
        entries: vec![AnimatedEntry::texture("WALL01", "WALL05", 8)],
    };
    let switches = SwitchTable {
        entries: vec![SwitchEntry::new("SWOFF1", "SWON1", 1)],
    };
    wad.push("ANIMATED", animated.encode());
    wad.push("SWITCHES", switches.encode());
    let patch = save(&dir, "patch.wad", &wad);
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(&patch);
    let summary = TextureExtractor::run(&options, "-texture\nWALL03\nSWON1\n".as_bytes()).unwrap();
    assert_eq!(summary.textures, 7);
    assert_eq!(summary.animated, 1);
    assert_eq!(summary.switches, 1);

    let out = WadFile::open(&output).unwrap();
    let written = output_textures(&out);
    for name in cycle.iter().chain(&["SWOFF1", "SWON1"]) {
        assert!(written.contains(name), "{name} missing");
    }
    assert!(!written.contains("WALL00"));
    assert!(!written.contains("WALL06"));

    let table = AnimatedTable::decode(&out.read_named("ANIMATED").unwrap().unwrap()).unwrap();
    assert_eq!(table, animated);
    let table = SwitchTable::decode(&out.read_named("SWITCHES").unwrap().unwrap()).unwrap();
    assert_eq!(table, switches);
}

#[test]
fn test_disabled_tables_not_written() {
    let dir = tempdir().unwrap();
    let base = save(&dir, "base.wad", &texture_wad(TextureFormat::Standard, vec![], &[]));
    let mut wad = texture_wad(
        TextureFormat::Standard,
        vec![texture("SWOFF1", &["sp1"]), texture("SWON1", &["sp2"])],
        &["sp1", "sp2"],
    );
    let switches = SwitchTable {
        entries: vec![SwitchEntry::new("SWOFF1", "SWON1", 1)],
    };
    wad.push("SWITCHES", switches.encode());
    let patch = save(&dir, "patch.wad", &wad);
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output)
        .with_input(&patch)
        .with_no_switches(true);
    let summary = TextureExtractor::run(&options, "-texture\nSWON1\n".as_bytes()).unwrap();
    assert_eq!(summary.textures, 1);

    let out = WadFile::open(&output).unwrap();
    assert!(!out.contains("SWITCHES"));
}

#[test]
fn test_strife_base_keeps_reduced_format_and_texture2_split() {
    let dir = tempdir().unwrap();

    let mut set = TextureSet::new();
    set.insert(texture("A", &["p1"]));
    set.insert(texture("B", &["p1"]));
    let tex1 = ["A".to_string()].into_iter().collect();
    let exported = set.export(TextureFormat::Reduced, Some(&tex1));
    let mut base = WadFile::create();
    base.push("TEXTURE1", exported.texture1.encode());
    base.push("TEXTURE2", exported.texture2.unwrap().encode());
    base.push("PNAMES", exported.patch_names.encode());
    let base = save(&dir, "base.wad", &base);

    let patch = save(
        &dir,
        "patch.wad",
        &texture_wad(
            TextureFormat::Standard,
            vec![texture("A", &["np1"]), texture("NEW", &["np2"])],
            &["np1", "np2"],
        ),
    );
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(&patch);
    TextureExtractor::run(&options, "-texture\nA\nNEW\n".as_bytes()).unwrap();

    let out = WadFile::open(&output).unwrap();
    let tex1 = TextureList::decode(&out.read_named("TEXTURE1").unwrap().unwrap()).unwrap();
    let tex2 = TextureList::decode(&out.read_named("TEXTURE2").unwrap().unwrap()).unwrap();
    assert_eq!(tex1.format, TextureFormat::Reduced);
    assert_eq!(tex1.entries[0].name, "A");
    assert_eq!(tex2.entries[0].name, "NEW");
}

#[test]
fn test_keep_base_textures() {
    let dir = tempdir().unwrap();
    let (base, patch) = base_and_patch(&dir);
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output)
        .with_input(&patch)
        .with_keep_base_textures(true);
    TextureExtractor::run(&options, "-texture\nA\n".as_bytes()).unwrap();

    let textures = output_textures(&WadFile::open(&output).unwrap());
    assert_eq!(textures.len(), 2);
    assert_eq!(textures.get("A").unwrap().patches[0].patch_name.to_ascii_uppercase(), "P3");
    assert!(textures.contains("B"));
}

#[test]
fn test_request_before_mode_writes_nothing() {
    let dir = tempdir().unwrap();
    let (base, patch) = base_and_patch(&dir);
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(&patch);
    let err = TextureExtractor::run(&options, "A\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::RequestBeforeMode { line: 1 }));
    assert!(!output.exists());
}

#[test]
fn test_directory_input_and_priority() {
    let dir = tempdir().unwrap();
    let base = save(&dir, "base.wad", &texture_wad(TextureFormat::Standard, vec![], &[]));

    let first = save(&dir, "first.wad", &texture_wad(TextureFormat::Standard, vec![texture("A", &["p1"])], &["p1"]));
    let pack = dir.path().join("pack");
    std::fs::create_dir(&pack).unwrap();
    let late = texture_wad(TextureFormat::Standard, vec![texture("A", &["p9"]), texture("D", &["p9"])], &["p9"]);
    late.save(pack.join("late.wad")).unwrap();
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(&first).with_input(&pack);
    let summary = TextureExtractor::run(&options, "-texture\nA\nD\n".as_bytes()).unwrap();
    assert_eq!(summary.textures, 2);

    let textures = output_textures(&WadFile::open(&output).unwrap());
    assert_eq!(textures.get("A").unwrap().patches[0].patch_name.to_ascii_uppercase(), "P1");
    assert_eq!(textures.get("D").unwrap().patches[0].patch_name.to_ascii_uppercase(), "P9");
}

#[test]
fn test_bad_input_is_not_an_archive() {
    let dir = tempdir().unwrap();
    let (base, _) = base_and_patch(&dir);
    let junk = dir.path().join("junk.wad");
    std::fs::write(&junk, b"definitely not a wad").unwrap();
    let output = dir.path().join("out.wad");

    let options = ExtractOptions::new(&base, &output).with_input(Path::new(&junk));
    let err = TextureExtractor::run(&options, "-texture\nA\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::NotAnArchive { .. }));
    assert!(!output.exists());
}
