//! Built-in tables from the stock game executables
//!
//! Used when a WAD carries no ANIMATED or SWITCHES lump of its own.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::animated::{AnimatedEntry, AnimatedTable};
use super::common::name_key;
use super::switches::{SwitchEntry, SwitchTable};

/// Texture names that must stay first in TEXTURE1 (index 0 means "no texture")
pub const NULL_TEXTURE_NAMES: [&str; 4] = ["AASTINKY", "AASHITTY", "BADPATCH", "ABADONE"];

const DEFAULT_TICKS: i32 = 8;

/// (first, last) flat animations
const DEFAULT_FLAT_ANIMATIONS: [(&str, &str); 9] = [
    ("NUKAGE1", "NUKAGE3"),
    ("FWATER1", "FWATER4"),
    ("SWATER1", "SWATER4"),
    ("LAVA1", "LAVA4"),
    ("BLOOD1", "BLOOD3"),
    ("RROCK05", "RROCK08"),
    ("SLIME01", "SLIME04"),
    ("SLIME05", "SLIME08"),
    ("SLIME09", "SLIME12"),
];

/// (first, last) texture animations
const DEFAULT_TEXTURE_ANIMATIONS: [(&str, &str); 13] = [
    ("BLODGR1", "BLODGR4"),
    ("SLADRIP1", "SLADRIP3"),
    ("BLODRIP1", "BLODRIP4"),
    ("FIREWALA", "FIREWALL"),
    ("GSTFONT1", "GSTFONT3"),
    ("FIRELAV3", "FIRELAVA"),
    ("FIREMAG1", "FIREMAG3"),
    ("FIREBLU1", "FIREBLU2"),
    ("ROCKRED1", "ROCKRED3"),
    ("BFALL1", "BFALL4"),
    ("SFALL1", "SFALL4"),
    ("WFALL1", "WFALL4"),
    ("DBRAIN1", "DBRAIN4"),
];

/// Switch base names by game id; each expands to `SW1<name>` / `SW2<name>`
const DEFAULT_SWITCHES: [(u16, &[&str]); 3] = [
    (
        1,
        &[
            "BRCOM", "BRN1", "BRN2", "BRNGN", "BROWN", "COMM", "COMP", "DIRT", "EXIT", "GRAY", "GRAY1",
            "METAL", "PIPE", "SLAD", "STARG", "STON1", "STON2", "STONE", "STRTN",
        ],
    ),
    (
        2,
        &[
            "BLUE", "CMT", "GARG", "GSTON", "HOT", "LION", "SATYR", "SKIN", "VINE", "WOOD",
        ],
    ),
    (
        3,
        &[
            "PANEL", "ROCK", "MET2", "WDMET", "BRIK", "MOD1", "ZIM", "STON6", "TEK", "MARB", "SKULL",
        ],
    ),
];

static ANIMATED: LazyLock<AnimatedTable> = LazyLock::new(|| {
    let flats = DEFAULT_FLAT_ANIMATIONS
        .iter()
        .map(|(first, last)| AnimatedEntry::flat(*first, *last, DEFAULT_TICKS));
    let textures = DEFAULT_TEXTURE_ANIMATIONS
        .iter()
        .map(|(first, last)| AnimatedEntry::texture(*first, *last, DEFAULT_TICKS));
    AnimatedTable {
        entries: flats.chain(textures).collect(),
    }
});

static SWITCHES: LazyLock<SwitchTable> = LazyLock::new(|| {
    let entries = DEFAULT_SWITCHES
        .iter()
        .flat_map(|(game, names)| {
            names
                .iter()
                .map(move |name| SwitchEntry::new(format!("SW1{name}"), format!("SW2{name}"), *game))
        })
        .collect();
    SwitchTable { entries }
});

/// Name key -> paired name, both directions
static SWITCH_PAIRS: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    let mut pairs = HashMap::new();
    for entry in &SWITCHES.entries {
        pairs.insert(name_key(&entry.off_name), entry.on_name.clone());
        pairs.insert(name_key(&entry.on_name), entry.off_name.clone());
    }
    pairs
});

/// The stock animation table
#[must_use]
pub fn default_animated() -> &'static AnimatedTable {
    &ANIMATED
}

/// The stock switch table
#[must_use]
pub fn default_switches() -> &'static SwitchTable {
    &SWITCHES
}

/// Counterpart of a stock switch texture, if `name` is one
#[must_use]
pub fn default_switch_pair(name: &str) -> Option<&'static str> {
    SWITCH_PAIRS.get(&name_key(name)).map(String::as_str)
}

/// Whether `name` is one of the reserved null texture names
#[must_use]
pub fn is_null_texture(name: &str) -> bool {
    NULL_TEXTURE_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
}
